//! `sessions` 테이블 정의
//!
//! 한 번의 인터뷰 연습을 나타냅니다. 모든 세션은 정확히 한 명의 사용자에게 속하며,
//! 사용자가 삭제되면 세션과 그 메시지가 모두 함께 삭제됩니다.

use super::{Column, Index, IndexKey, Table, TouchTrigger, USERS_TABLE};
use crate::models::{DifficultyLevel, SessionStatus};

pub const TABLE: &str = "sessions";

pub fn table() -> Table {
    Table {
        name: TABLE,
        columns: vec![
            Column::new("id", "UUID")
                .primary_key()
                .default_value("uuid_generate_v4()"),
            Column::new("user_id", "UUID")
                .not_null()
                .references(USERS_TABLE, "id"),
            // ── 세션 설정 ──
            Column::new("topic", "VARCHAR(200)").not_null(),
            Column::new("difficulty_level", "VARCHAR(20)")
                .not_null()
                .default_text(DifficultyLevel::default().as_str())
                .one_of(DifficultyLevel::ALL.iter().map(|d| d.as_str())),
            Column::new("max_duration_minutes", "INTEGER")
                .not_null()
                .default_value("60"),
            Column::new("enable_hints", "BOOLEAN")
                .not_null()
                .default_value("TRUE"),
            Column::new("enable_real_time_feedback", "BOOLEAN")
                .not_null()
                .default_value("TRUE"),
            Column::new("custom_requirements", "TEXT"),
            // ── 상태와 시간 ──
            Column::new("status", "VARCHAR(20)")
                .not_null()
                .default_text(SessionStatus::default().as_str())
                .one_of(SessionStatus::ALL.iter().map(|s| s.as_str())),
            Column::new("started_at", "TIMESTAMPTZ")
                .not_null()
                .default_value("NOW()"),
            Column::new("ended_at", "TIMESTAMPTZ"),
            Column::new("total_duration", "INTEGER"), // 초 단위
            Column::new("session_config", "JSONB")
                .not_null()
                .default_value("'{}'::jsonb"),
            Column::new("created_at", "TIMESTAMPTZ")
                .not_null()
                .default_value("NOW()"),
            Column::new("updated_at", "TIMESTAMPTZ")
                .not_null()
                .default_value("NOW()"),
        ],
        indexes: vec![
            Index::btree("idx_sessions_user_id", TABLE, vec![IndexKey::asc("user_id")]),
            Index::btree("idx_sessions_status", TABLE, vec![IndexKey::asc("status")]),
            Index::btree(
                "idx_sessions_created_at",
                TABLE,
                vec![IndexKey::desc("created_at")],
            ),
            Index::gin("idx_sessions_topic", TABLE, vec![IndexKey::trigram("topic")]),
        ],
        touch_trigger: Some(TouchTrigger {
            name: "trg_sessions_touch_updated_at",
            table: TABLE,
            column: "updated_at",
        }),
    }
}
