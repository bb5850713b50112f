//! # 대화 메시지 모델
//!
//! 세션 안에서 오간 한 턴(turn)을 나타내는 `messages` 테이블 행입니다.
//! 메시지는 추가만 되며(append-only), 삭제는 부모 세션이 삭제될 때 CASCADE로만 일어납니다.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::text_enum;

text_enum! {
    /// 발화 주체
    MessageRole("message role") {
        User => "USER",
        System => "SYSTEM",
        Assistant => "ASSISTANT",
    }
}

text_enum! {
    /// 메시지 내용의 종류 (기본값: `TEXT`)
    MessageType("message type") {
        Text => "TEXT",
        Code => "CODE",
        Diagram => "DIAGRAM",
        Feedback => "FEEDBACK",
    }
}

impl Default for MessageType {
    fn default() -> Self {
        MessageType::Text
    }
}

/// 메시지 엔티티. DB의 `messages` 테이블 한 행에 대응합니다.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Message {
    pub id: Uuid,
    /// 소속 세션 ID. 세션 삭제 시 함께 삭제됨
    pub session_id: Uuid,
    #[sqlx(try_from = "String")]
    pub role: MessageRole,
    pub content: String,
    #[sqlx(try_from = "String")]
    pub message_type: MessageType,
    pub timestamp: DateTime<Utc>,
    pub tokens_used: i32,
    /// 자유 형식 메타데이터 (JSONB)
    ///
    /// 예전 스키마에서는 `metadata`라는 이름이었고, 마이그레이터가 이름을 바꿉니다.
    pub message_metadata: serde_json::Value,
}
