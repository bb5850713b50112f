//! # 실행 계획(Plan) 모듈
//!
//! 스키마 변경은 이름 붙은 **단계(Step)** 의 목록으로 표현합니다.
//! 각 단계는 다음 세 가지로 이루어집니다:
//! - `name`: 로그와 리포트에 찍히는 이름 (예: `add_column_sessions_status`)
//! - `guard`: 카탈로그를 조회하는 불리언 SQL 식. 참일 때만 단계를 실행합니다.
//! - `statements`: 실행할 DDL 문장들
//!
//! 같은 계획을 두 가지로 쓸 수 있습니다:
//! 1. `crate::db::apply`로 살아 있는 DB에 적용 (가드 평가 → 실행)
//! 2. `Plan::render_script`로 `psql -f`에 넘길 수 있는 독립 SQL 스크립트로 출력
//!
//! 가드 덕분에 두 방식 모두 몇 번을 반복 실행해도 결과가 같습니다(멱등성).

pub mod initializer;
pub mod migrator;

use serde::Serialize; // PlanKind를 리포트 JSON에 넣기 위한 직렬화

use crate::schema::ddl::quote_literal; // 가드 SQL 안의 이름은 문자열 리터럴로 넣습니다

// &'static str: 이름은 모두 스키마 정의의 상수라 프로그램 전체 수명 동안 유효합니다.
// PartialEq: 테스트에서 `assert_eq!(step.guard, Guard::TableMissing(...))`로 비교하기 위해 필요

/// 단계 실행 여부를 정하는 카탈로그 조건
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Guard {
    /// `pg_extension`에 확장이 없음
    ExtensionMissing(&'static str),
    /// 현재 스키마에 테이블이 없음
    TableMissing(&'static str),
    /// 테이블에 컬럼이 없음
    ColumnMissing {
        table: &'static str,
        column: &'static str,
    },
    /// 테이블에 컬럼이 있음 (이름 변경의 전제)
    ColumnPresent {
        table: &'static str,
        column: &'static str,
    },
    /// 현재 스키마에 인덱스가 없음
    IndexMissing(&'static str),
    /// 테이블에 트리거가 없음 (`pg_trigger` 기준)
    TriggerMissing {
        table: &'static str,
        trigger: &'static str,
    },
    /// 모든 조건이 참일 때만 참
    All(Vec<Guard>),
}

impl Guard {
    /// `SELECT <식>`으로 평가할 수 있는 불리언 SQL 식
    ///
    /// 스키마는 항상 `current_schema()`를 기준으로 봅니다.
    pub fn to_sql(&self) -> String {
        match self {
            Guard::ExtensionMissing(name) => format!(
                "NOT EXISTS (SELECT 1 FROM pg_extension WHERE extname = {})",
                quote_literal(name)
            ),
            Guard::TableMissing(table) => format!(
                "NOT EXISTS (SELECT 1 FROM information_schema.tables \
                 WHERE table_schema = current_schema() AND table_name = {})",
                quote_literal(table)
            ),
            Guard::ColumnMissing { table, column } => {
                format!("NOT {}", column_exists_sql(table, column))
            }
            Guard::ColumnPresent { table, column } => column_exists_sql(table, column),
            Guard::IndexMissing(name) => format!(
                "NOT EXISTS (SELECT 1 FROM pg_indexes \
                 WHERE schemaname = current_schema() AND indexname = {})",
                quote_literal(name)
            ),
            Guard::TriggerMissing { table, trigger } => format!(
                "NOT EXISTS (SELECT 1 FROM pg_trigger t \
                 JOIN pg_class c ON c.oid = t.tgrelid \
                 JOIN pg_namespace n ON n.oid = c.relnamespace \
                 WHERE n.nspname = current_schema() AND c.relname = {} AND t.tgname = {})",
                quote_literal(table),
                quote_literal(trigger)
            ),
            Guard::All(guards) => guards
                .iter()
                .map(|g| format!("({})", g.to_sql()))
                .collect::<Vec<_>>()
                .join(" AND "),
        }
    }
}

fn column_exists_sql(table: &str, column: &str) -> String {
    format!(
        "EXISTS (SELECT 1 FROM information_schema.columns \
         WHERE table_schema = current_schema() AND table_name = {} AND column_name = {})",
        quote_literal(table),
        quote_literal(column)
    )
}

/// 가드로 보호되는 DDL 단위
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    /// 로그와 리포트에 찍히는 이름. 계획 안에서 유일합니다.
    pub name: String,
    pub guard: Guard,
    /// 가드가 참일 때 순서대로 실행할 문장들
    pub statements: Vec<String>,
}

impl Step {
    /// 문장 하나짜리 단계
    ///
    /// `impl Into<String>`: `&str`과 `String`(format! 결과)을 모두 받습니다.
    pub fn new(name: impl Into<String>, guard: Guard, statement: String) -> Self {
        Self {
            name: name.into(),
            guard,
            statements: vec![statement],
        }
    }

    /// 여러 문장을 한 트랜잭션 안에서 실행하는 단계 (예: 트리거 함수 + 트리거)
    pub fn with_statements(name: impl Into<String>, guard: Guard, statements: Vec<String>) -> Self {
        Self {
            name: name.into(),
            guard,
            statements,
        }
    }

    /// 스크립트용 `DO` 블록. 각 문장은 문자열 리터럴로 감싸 `EXECUTE`합니다.
    fn render(&self) -> String {
        let body = self
            .statements
            .iter()
            .map(|stmt| format!("        EXECUTE {};", quote_literal(stmt)))
            .collect::<Vec<_>>()
            .join("\n");

        format!(
            "-- step: {}\nDO $step$\nBEGIN\n    IF {} THEN\n{}\n    END IF;\nEND\n$step$;\n",
            self.name,
            self.guard.to_sql(),
            body
        )
    }
}

/// 어떤 계획인지 구분합니다. CLI의 `render <init|migrate>` 인자이기도 합니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PlanKind {
    Init,
    Migrate,
}

impl PlanKind {
    pub fn as_str(self) -> &'static str {
        match self {
            PlanKind::Init => "init",
            PlanKind::Migrate => "migrate",
        }
    }
}

/// 순서가 있는 단계 목록
#[derive(Debug, Clone)]
pub struct Plan {
    pub kind: PlanKind,
    /// 실행 순서대로의 단계. 앞 단계가 뒤 단계의 전제를 만듭니다.
    pub steps: Vec<Step>,
}

impl Plan {
    /// 종류에 맞는 계획을 스키마 정의로부터 새로 만듭니다. DB에는 접근하지 않습니다.
    pub fn build(kind: PlanKind) -> Self {
        match kind {
            PlanKind::Init => initializer::plan(),
            PlanKind::Migrate => migrator::plan(),
        }
    }

    /// 이름으로 단계를 찾습니다.
    pub fn step(&self, name: &str) -> Option<&Step> {
        self.steps.iter().find(|s| s.name == name)
    }

    /// 단계의 실행 순서(0부터). 순서 관계를 확인할 때 씁니다.
    pub fn position(&self, name: &str) -> Option<usize> {
        self.steps.iter().position(|s| s.name == name)
    }

    /// 계획 전체를 하나의 SQL 스크립트로 출력합니다.
    ///
    /// 각 단계는 독립된 `DO` 블록이라, 스크립트가 중간에 실패해도 다시 실행하면
    /// 남은 단계부터 이어서 적용됩니다.
    pub fn render_script(&self) -> String {
        let mut script = format!(
            "-- sdcoach-schema: {} plan ({} steps)\n-- Safe to run repeatedly; every step is guarded.\n\n",
            self.kind.as_str(),
            self.steps.len()
        );
        for step in &self.steps {
            script.push_str(&step.render());
            script.push('\n');
        }
        script
    }
}

/// 단계 이름에 쓸 수 있도록 `-` 등을 `_`로 바꿉니다. (`uuid-ossp` → `uuid_ossp`)
pub(crate) fn step_slug(name: &str) -> String {
    name.chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect()
}
