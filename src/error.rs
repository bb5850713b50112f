//! # 에러 처리 모듈
//!
//! 스키마 초기화/마이그레이션 중 발생할 수 있는 에러 타입을 정의합니다.
//!
//! 이 도구는 에러를 "복구"하지 않습니다. `users` 테이블 부재, 확장(extension) 설치 불가,
//! 권한 부족 같은 치명적 상황은 PostgreSQL이 돌려준 원본 에러를 그대로 담아 올려보내고,
//! 어느 단계(step)에서 실패했는지만 덧붙입니다.

use thiserror::Error; // #[error("...")]로 Display, #[from]/#[source]로 에러 연결을 자동 구현

// #[derive(Debug, Error)]: Debug는 {:?} 출력, Error는 std::error::Error 구현.
// main의 anyhow::Result가 이 에러를 그대로 받아 source() 체인까지 출력합니다.

/// 스키마 도구에서 발생할 수 있는 모든 에러 종류
#[derive(Debug, Error)]
pub enum SchemaError {
    /// 단계 실행과 무관한 데이터베이스 오류 (연결 실패, 카탈로그 조회 실패 등)
    /// #[from]: sqlx 함수에 `?`를 쓰면 자동으로 이 variant로 변환됩니다.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// 특정 단계의 가드 평가 또는 DDL 실행이 실패함
    ///
    /// `source`에는 엔진이 보고한 원본 에러가 그대로 들어 있습니다.
    /// (예: `relation "users" does not exist`)
    #[error("Step `{step}` failed: {source}")]
    Step {
        step: String,
        #[source]
        source: sqlx::Error,
    },

    /// 마이그레이터가 전제로 하는 테이블이 없음
    #[error("Required table `{0}` does not exist; run `init` first")]
    MissingTable(String),

    /// 열거형 컬럼에 알 수 없는 텍스트 값이 들어 있음
    #[error("Unknown {kind} value: {value:?}")]
    UnknownVariant { kind: &'static str, value: String },
}

impl SchemaError {
    /// 단계 이름을 붙여 sqlx 에러를 감쌉니다. `map_err(SchemaError::step(name))` 형태로 사용.
    pub fn step(name: &str) -> impl FnOnce(sqlx::Error) -> SchemaError + '_ {
        move |source| SchemaError::Step {
            step: name.to_string(),
            source,
        }
    }
}
