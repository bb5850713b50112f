use sqlx::PgPool;

use super::apply::{apply, Mode, Report};
use crate::error::SchemaError;
use crate::plan::{Plan, PlanKind};

/// 초기화 계획을 적용합니다. 두 번 실행해도 두 번째는 아무것도 바꾸지 않습니다.
pub async fn initialize(pool: &PgPool, mode: Mode) -> Result<Report, SchemaError> {
    apply(pool, &Plan::build(PlanKind::Init), mode).await
}
