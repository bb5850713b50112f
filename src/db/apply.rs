//! # 계획 실행기
//!
//! `Plan`의 단계를 순서대로 하나씩 실행합니다.
//!
//! ## 단계 하나의 흐름
//! ```text
//! BEGIN → 가드 평가 → (참) DDL 실행 → COMMIT   = Applied
//!                  → (거짓)          ROLLBACK = Skipped
//! ```
//! 단계마다 트랜잭션이 따로라서, 중간에 실패하면 그 이전 단계까지는 반영된 채로 남습니다.
//! 다시 실행하면 가드가 이미 끝난 단계를 건너뛰므로 실패한 지점부터 이어집니다.

use serde::Serialize; // 리포트를 `--json`으로 출력하기 위한 직렬화
use sqlx::PgPool; // PostgreSQL 연결 풀
use tracing::{debug, info}; // 구조화 로그 매크로 (필드 = 값 형태로 기록)

use super::catalog;
use crate::error::SchemaError;
use crate::plan::{Plan, PlanKind, Step};

// Copy: 작은 값 타입이라 함수에 넘길 때 복사해도 됩니다 (참조 불필요)
// Default + #[default]: `Mode::default()`는 Apply

/// 실행 방식
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// 가드가 참인 단계를 실제로 실행
    #[default]
    Apply,
    /// 가드만 평가하고 아무것도 바꾸지 않음
    DryRun,
}

/// 단계 하나의 실행 결과
///
/// JSON으로는 `"applied"`, `"skipped"`, `"pending"`처럼 소문자로 나갑니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")] // Applied → "applied"
pub enum Outcome {
    /// 가드가 참이었고 DDL을 실행함
    Applied,
    /// 가드가 거짓: 이미 원하는 모양임
    Skipped,
    /// (드라이런) 가드가 참: 실제 실행이었다면 적용됐을 단계
    Pending,
}

/// 리포트의 한 줄: 단계 이름과 결과
#[derive(Debug, Clone, Serialize)]
pub struct StepReport {
    /// 단계 이름 (예: `create_index_idx_sessions_topic`)
    pub step: String,
    pub outcome: Outcome,
}

/// 계획 하나를 실행한 결과
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    /// 어떤 계획을 실행했는지 (`init` / `migrate`)
    pub plan: PlanKind,
    /// 드라이런이었으면 true. 이때 결과에는 Applied가 없습니다.
    pub dry_run: bool,
    /// 계획 순서대로의 단계별 결과
    pub steps: Vec<StepReport>,
}

impl Report {
    /// 이름으로 단계 결과를 찾습니다. 계획에 없는 이름이면 None.
    pub fn outcome(&self, step: &str) -> Option<Outcome> {
        self.steps.iter().find(|s| s.step == step).map(|s| s.outcome)
    }

    /// 주어진 결과를 가진 단계 이름들을 계획 순서대로 돌려줍니다.
    ///
    /// `impl Iterator`: 벡터를 새로 만들지 않고 필요할 때 하나씩 꺼내는 지연 반복자
    pub fn with_outcome(&self, outcome: Outcome) -> impl Iterator<Item = &str> {
        self.steps
            .iter()
            .filter(move |s| s.outcome == outcome) // move: outcome 값을 클로저 안으로 복사
            .map(|s| s.step.as_str())
    }

    /// 아무 단계도 실행(또는 실행 대기)되지 않았으면 참
    pub fn is_noop(&self) -> bool {
        self.steps.iter().all(|s| s.outcome == Outcome::Skipped)
    }
}

/// 계획의 모든 단계를 순서대로 실행하고 리포트를 돌려줍니다.
///
/// ## 에러
/// - `Step`: 어떤 단계의 가드 평가나 DDL이 실패함. 그 뒤 단계는 실행하지 않습니다.
pub async fn apply(pool: &PgPool, plan: &Plan, mode: Mode) -> Result<Report, SchemaError> {
    let dry_run = mode == Mode::DryRun;
    info!(
        plan = plan.kind.as_str(),
        steps = plan.steps.len(),
        dry_run,
        "Applying schema plan"
    );

    let mut steps = Vec::with_capacity(plan.steps.len());
    for step in &plan.steps {
        let outcome = run_step(pool, step, mode).await?;
        steps.push(StepReport {
            step: step.name.clone(),
            outcome,
        });
    }

    let report = Report {
        plan: plan.kind,
        dry_run,
        steps,
    };
    info!(
        plan = plan.kind.as_str(),
        applied = report.with_outcome(Outcome::Applied).count(),
        pending = report.with_outcome(Outcome::Pending).count(),
        skipped = report.with_outcome(Outcome::Skipped).count(),
        "Schema plan finished"
    );
    Ok(report)
}

async fn run_step(pool: &PgPool, step: &Step, mode: Mode) -> Result<Outcome, SchemaError> {
    // pool.begin(): 연결 하나를 빌려 BEGIN. tx가 커밋 없이 drop되면 자동으로 ROLLBACK 됩니다.
    let mut tx = pool.begin().await.map_err(SchemaError::step(&step.name))?;

    // &mut *tx: 트랜잭션을 PgConnection으로 빌려 줍니다. 가드와 DDL이 같은 트랜잭션 안에서 실행됩니다.
    let needed = catalog::guard_holds(&mut *tx, &step.guard)
        .await
        .map_err(SchemaError::step(&step.name))?;

    if !needed || mode == Mode::DryRun {
        tx.rollback().await.map_err(SchemaError::step(&step.name))?;
        return Ok(if needed {
            debug!(step = %step.name, "Step pending");
            Outcome::Pending
        } else {
            debug!(step = %step.name, "Step already satisfied, skipping");
            Outcome::Skipped
        });
    }

    // raw_sql: 바인딩 없는 DDL을 단순 쿼리 프로토콜로 실행합니다 ($fn$ 본문 포함)
    for statement in &step.statements {
        sqlx::raw_sql(statement)
            .execute(&mut *tx)
            .await
            .map_err(SchemaError::step(&step.name))?;
    }
    tx.commit().await.map_err(SchemaError::step(&step.name))?;

    info!(step = %step.name, "Applied step");
    Ok(Outcome::Applied)
}
