//! # 마이그레이터 실행
//!
//! 마이그레이션 계획을 적용하고, 마지막에 `sessions` 컬럼 목록을 읽어 돌려줍니다.
//! (운영자가 결과 모양을 눈으로 확인하는 용도이며, 이 조회는 아무것도 바꾸지 않습니다.)

use serde::Serialize;
use sqlx::PgPool;
use tracing::info;

use super::apply::{apply, Mode, Report};
use super::catalog;
use crate::error::SchemaError;
use crate::models::ColumnInfo;
use crate::plan::{Plan, PlanKind};
use crate::schema::{messages, sessions};

#[derive(Debug, Clone, Serialize)]
pub struct MigrationReport {
    #[serde(flatten)]
    pub report: Report,
    /// 마이그레이션 후 `sessions` 테이블의 컬럼 메타데이터
    pub sessions_columns: Vec<ColumnInfo>,
}

/// 마이그레이션 계획을 적용합니다.
///
/// ## 에러
/// - `MissingTable`: `sessions` 또는 `messages`가 없음 (아무 단계도 실행하지 않음)
/// - `Step`: 단계 실행 중 엔진 에러
pub async fn migrate(pool: &PgPool, mode: Mode) -> Result<MigrationReport, SchemaError> {
    // 마이그레이터는 테이블을 만들지 않습니다. 없으면 시작 전에 멈춥니다.
    for table in [sessions::TABLE, messages::TABLE] {
        if !catalog::table_exists(pool, table).await? {
            return Err(SchemaError::MissingTable(table.to_string()));
        }
    }

    let report = apply(pool, &Plan::build(PlanKind::Migrate), mode).await?;

    let sessions_columns = catalog::list_columns(pool, sessions::TABLE).await?;
    info!(
        table = sessions::TABLE,
        columns = sessions_columns.len(),
        "Listed current column metadata"
    );

    Ok(MigrationReport {
        report,
        sessions_columns,
    })
}
