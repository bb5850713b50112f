//! # 인터뷰 세션 모델
//!
//! `sessions` 테이블 한 행에 대응하는 구조체와, 세션 상태/난이도 열거형을 정의합니다.
//!
//! ## 세션 라이프사이클
//! ```text
//! [시작] ACTIVE ⇄ PAUSED → COMPLETED | ABANDONED (ended_at 설정) → [사용자 삭제 시 CASCADE]
//! ```
//! 행의 생성과 상태 변경은 외부 애플리케이션 계층이 담당합니다.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::text_enum;

text_enum! {
    /// 세션 진행 상태 (기본값: `ACTIVE`)
    SessionStatus("session status") {
        Active => "ACTIVE",
        Completed => "COMPLETED",
        Abandoned => "ABANDONED",
        Paused => "PAUSED",
    }
}

text_enum! {
    /// 인터뷰 난이도 (기본값: `INTERMEDIATE`)
    DifficultyLevel("difficulty level") {
        Beginner => "BEGINNER",
        Intermediate => "INTERMEDIATE",
        Advanced => "ADVANCED",
    }
}

impl Default for SessionStatus {
    fn default() -> Self {
        SessionStatus::Active
    }
}

impl Default for DifficultyLevel {
    fn default() -> Self {
        DifficultyLevel::Intermediate
    }
}

/// 인터뷰 세션 엔티티. DB의 `sessions` 테이블 한 행에 대응합니다.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Session {
    /// 세션 고유 식별자 (DB가 `uuid_generate_v4()`로 생성)
    pub id: Uuid,
    /// 소유 사용자 ID. `users.id` 외래키, 사용자 삭제 시 함께 삭제됨
    pub user_id: Uuid,
    /// 인터뷰 주제 (최대 200자)
    pub topic: String,
    #[sqlx(try_from = "String")]
    pub difficulty_level: DifficultyLevel,
    pub max_duration_minutes: i32,
    pub enable_hints: bool,
    pub enable_real_time_feedback: bool,
    pub custom_requirements: Option<String>,
    #[sqlx(try_from = "String")]
    pub status: SessionStatus,
    pub started_at: DateTime<Utc>,
    /// 종료 시각. None이면 아직 진행 중인 세션
    pub ended_at: Option<DateTime<Utc>>,
    /// 총 소요 시간(초)
    pub total_duration: Option<i32>,
    /// 세션별 추가 설정 (JSONB, 기본값 `{}`)
    pub session_config: serde_json::Value,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
