//! # 마이그레이션 계획 (Migrator)
//!
//! 이미 존재하는(혹은 예전 세대의) `sessions`/`messages` 스키마를 현재 모양으로 맞춥니다.
//! 데이터는 지우지 않습니다.
//!
//! ## 단계 순서
//! ```text
//! pg_trgm 확장 → sessions 컬럼 보충 → messages.metadata 이름 변경
//!             → messages 컬럼 보충 → 인덱스 7개 → updated_at 트리거
//! ```
//!
//! `metadata` → `message_metadata` 이름 변경은 반드시 `message_metadata` 보충 단계보다
//! **먼저** 실행됩니다. 순서가 바뀌면 빈 `message_metadata`가 먼저 생겨서
//! 예전 데이터가 `metadata`에 그대로 남게 됩니다.
//!
//! CHECK 제약조건은 추가하지 않습니다. 운영 DB의 일부 세대는 열거형을 네이티브 ENUM 타입으로
//! 강제하고 있어서, 같은 컬럼에 CHECK를 덧붙이면 세대마다 결과가 달라집니다.

use super::initializer::{index_step, trigger_step};
use super::{step_slug, Guard, Plan, PlanKind, Step};
use crate::schema::{self, ddl, messages, Table, TRIGRAM_EXTENSION};

/// 기존 스키마를 현재 모양으로 맞추는 마이그레이션 계획
pub fn plan() -> Plan {
    let tables = schema::tables();
    let mut steps = vec![Step::new(
        format!("create_extension_{}", step_slug(TRIGRAM_EXTENSION.name)),
        Guard::ExtensionMissing(TRIGRAM_EXTENSION.name),
        ddl::create_extension(&TRIGRAM_EXTENSION),
    )];

    for table in &tables {
        if table.name == messages::TABLE {
            steps.push(rename_legacy_metadata());
        }
        steps.extend(column_steps(table));
    }

    for index in tables.iter().flat_map(|t| &t.indexes) {
        steps.push(index_step(index));
    }

    steps.extend(tables.iter().filter_map(trigger_step));

    Plan {
        kind: PlanKind::Migrate,
        steps,
    }
}

/// 키가 아닌 모든 컬럼에 대해 "없으면 추가" 단계를 만듭니다.
fn column_steps(table: &Table) -> impl Iterator<Item = Step> + '_ {
    table
        .columns
        .iter()
        .filter(|column| !column.is_key())
        .map(move |column| {
            Step::new(
                format!("add_column_{}_{}", table.name, column.name),
                Guard::ColumnMissing {
                    table: table.name,
                    column: column.name,
                },
                ddl::add_column(table.name, column),
            )
        })
}

/// `metadata`가 있고 `message_metadata`가 아직 없을 때만 이름을 바꿉니다.
///
/// 두 컬럼이 모두 있으면 건너뜁니다. 어느 쪽 데이터를 살릴지는 운영자가 정할 일입니다.
fn rename_legacy_metadata() -> Step {
    Step::new(
        format!("rename_column_{}_{}", messages::TABLE, messages::LEGACY_METADATA_COLUMN),
        Guard::All(vec![
            Guard::ColumnPresent {
                table: messages::TABLE,
                column: messages::LEGACY_METADATA_COLUMN,
            },
            Guard::ColumnMissing {
                table: messages::TABLE,
                column: messages::METADATA_COLUMN,
            },
        ]),
        ddl::rename_column(
            messages::TABLE,
            messages::LEGACY_METADATA_COLUMN,
            messages::METADATA_COLUMN,
        ),
    )
}
