//! # 데이터베이스 접근 계층
//!
//! PostgreSQL과 직접 상호작용하는 함수들을 모아둔 모듈입니다.
//!
//! 각 하위 모듈:
//! - `apply`: 계획(Plan)의 단계를 가드 평가 후 실행
//! - `catalog`: 테이블/컬럼/인덱스 존재 여부와 컬럼 메타데이터 조회
//! - `initializer`: 초기화 계획 실행
//! - `migrator`: 마이그레이션 계획 실행 + `sessions` 컬럼 목록 확인

pub mod apply;
pub mod catalog;
pub mod initializer;
pub mod migrator;

pub use apply::{Mode, Outcome, Report, StepReport};
pub use initializer::initialize;
pub use migrator::{migrate, MigrationReport};

use std::time::Duration;

use sqlx::postgres::{PgPool, PgPoolOptions};
use tracing::info;

use crate::config::Config;
use crate::error::SchemaError;

/// 설정값으로 연결 풀을 만듭니다.
///
/// 단계는 순서대로 하나씩 실행되므로 연결은 한두 개면 충분합니다.
///
/// ## 에러
/// - `Database`: 접속 정보 파싱 실패, 연결 실패, 타임아웃
pub async fn connect(config: &Config) -> Result<PgPool, SchemaError> {
    // URL 문자열 대신 PgConnectOptions를 넘깁니다 (connect → connect_with)
    let options = config.connect_options()?;

    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections) // 동시에 유지할 최대 연결 수
        .acquire_timeout(Duration::from_secs(config.connect_timeout_secs)) // 연결 대기 한도
        .connect_with(options)
        .await?;

    info!(max_connections = config.max_connections, "Connected to PostgreSQL");
    Ok(pool)
}
