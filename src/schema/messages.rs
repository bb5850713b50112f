//! `messages` 테이블 정의
//!
//! 세션 안의 대화 한 턴. 부모 세션이 삭제되면 CASCADE로 함께 삭제됩니다.

use super::{sessions, Column, Index, IndexKey, Table};
use crate::models::{MessageRole, MessageType};

pub const TABLE: &str = "messages";

/// 메타데이터 컬럼의 현재 이름
pub const METADATA_COLUMN: &str = "message_metadata";

/// 예전 스키마의 메타데이터 컬럼 이름. 마이그레이터가 `message_metadata`로 바꿉니다.
pub const LEGACY_METADATA_COLUMN: &str = "metadata";

pub fn table() -> Table {
    Table {
        name: TABLE,
        columns: vec![
            Column::new("id", "UUID")
                .primary_key()
                .default_value("uuid_generate_v4()"),
            Column::new("session_id", "UUID")
                .not_null()
                .references(sessions::TABLE, "id"),
            Column::new("role", "VARCHAR(20)")
                .not_null()
                .one_of(MessageRole::ALL.iter().map(|r| r.as_str())),
            Column::new("content", "TEXT").not_null(),
            Column::new("message_type", "VARCHAR(20)")
                .not_null()
                .default_text(MessageType::default().as_str())
                .one_of(MessageType::ALL.iter().map(|t| t.as_str())),
            Column::new("timestamp", "TIMESTAMPTZ")
                .not_null()
                .default_value("NOW()"),
            Column::new("tokens_used", "INTEGER")
                .not_null()
                .default_value("0"),
            Column::new(METADATA_COLUMN, "JSONB")
                .not_null()
                .default_value("'{}'::jsonb"),
        ],
        indexes: vec![
            Index::btree(
                "idx_messages_session_id",
                TABLE,
                vec![IndexKey::asc("session_id")],
            ),
            Index::btree(
                "idx_messages_timestamp",
                TABLE,
                vec![IndexKey::asc("timestamp")],
            ),
            Index::btree("idx_messages_role", TABLE, vec![IndexKey::asc("role")]),
        ],
        touch_trigger: None,
    }
}
