//! # 초기화 계획 (Initializer)
//!
//! 빈 데이터베이스에 확장을 켜고 `sessions`, `messages` 테이블과 인덱스, 트리거를 만듭니다.
//!
//! ## 단계 순서
//! ```text
//! 확장(vector, uuid-ossp, pg_trgm) → sessions → messages → 인덱스 7개 → updated_at 트리거
//! ```
//! `users` 테이블은 전제 조건입니다. 없으면 `create_table_sessions` 단계에서
//! 외래키 생성이 엔진 에러로 실패합니다.

use super::{step_slug, Guard, Plan, PlanKind, Step};
use crate::schema::{self, ddl, Index, Table, EXTENSIONS};

/// 빈 데이터베이스용 초기화 계획
pub fn plan() -> Plan {
    let tables = schema::tables();
    let mut steps = Vec::new();

    for ext in EXTENSIONS {
        steps.push(Step::new(
            format!("create_extension_{}", step_slug(ext.name)),
            Guard::ExtensionMissing(ext.name),
            ddl::create_extension(ext),
        ));
    }

    for table in &tables {
        steps.push(Step::new(
            format!("create_table_{}", table.name),
            Guard::TableMissing(table.name),
            ddl::create_table(table),
        ));
    }

    for index in tables.iter().flat_map(|t| &t.indexes) {
        steps.push(index_step(index));
    }

    steps.extend(tables.iter().filter_map(trigger_step));

    Plan {
        kind: PlanKind::Init,
        steps,
    }
}

pub(crate) fn index_step(index: &Index) -> Step {
    Step::new(
        format!("create_index_{}", index.name),
        Guard::IndexMissing(index.name),
        ddl::create_index(index),
    )
}

/// 함수는 `CREATE OR REPLACE`, 트리거는 가드로 보호합니다.
pub(crate) fn trigger_step(table: &Table) -> Option<Step> {
    let trigger = table.touch_trigger.as_ref()?;
    Some(Step::with_statements(
        format!("create_trigger_{}", trigger.name),
        Guard::TriggerMissing {
            table: trigger.table,
            trigger: trigger.name,
        },
        vec![
            ddl::create_touch_function(trigger.column),
            ddl::create_touch_trigger(trigger),
        ],
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extensions_come_first_then_tables_then_indexes() {
        let plan = plan();
        let names: Vec<&str> = plan.steps.iter().map(|s| s.name.as_str()).collect();

        assert_eq!(
            &names[..5],
            [
                "create_extension_vector",
                "create_extension_uuid_ossp",
                "create_extension_pg_trgm",
                "create_table_sessions",
                "create_table_messages",
            ]
        );
        assert_eq!(names.iter().filter(|n| n.starts_with("create_index_")).count(), 7);
        assert_eq!(names.last(), Some(&"create_trigger_trg_sessions_touch_updated_at"));
    }

    #[test]
    fn tables_are_guarded_by_existence() {
        let plan = plan();
        let step = plan.step("create_table_messages").unwrap();
        assert_eq!(step.guard, Guard::TableMissing("messages"));
        assert!(step.statements[0].starts_with("CREATE TABLE IF NOT EXISTS \"messages\""));
    }

    #[test]
    fn trigger_step_creates_function_before_trigger() {
        let plan = plan();
        let step = plan
            .step("create_trigger_trg_sessions_touch_updated_at")
            .unwrap();
        assert_eq!(step.statements.len(), 2);
        assert!(step.statements[0].starts_with("CREATE OR REPLACE FUNCTION"));
        assert!(step.statements[1].starts_with("CREATE TRIGGER"));
    }
}
