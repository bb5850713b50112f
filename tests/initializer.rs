// 초기화 계획 통합 테스트
//
// PostgreSQL(pgvector 포함)이 필요합니다:
//   DATABASE_URL=postgres://postgres@localhost/postgres cargo test -- --ignored

mod common;

use sdcoach_schema::db::{self, catalog, Mode, Outcome};
use sdcoach_schema::error::SchemaError;
use sdcoach_schema::models::{DifficultyLevel, Session, SessionStatus};
use sdcoach_schema::schema;
use sqlx::PgPool;

#[sqlx::test(migrations = false)]
#[ignore = "requires PostgreSQL with pgvector (DATABASE_URL)"]
async fn running_twice_equals_running_once(pool: PgPool) -> anyhow::Result<()> {
    common::create_users_table(&pool).await;

    let first = db::initialize(&pool, Mode::Apply).await?;
    assert_eq!(first.outcome("create_table_sessions"), Some(Outcome::Applied));
    assert_eq!(first.outcome("create_table_messages"), Some(Outcome::Applied));
    let sessions_before = catalog::list_columns(&pool, "sessions").await?;
    let messages_before = catalog::list_columns(&pool, "messages").await?;

    let second = db::initialize(&pool, Mode::Apply).await?;
    assert!(second.is_noop(), "{:?}", second.steps);
    assert_eq!(catalog::list_columns(&pool, "sessions").await?, sessions_before);
    assert_eq!(catalog::list_columns(&pool, "messages").await?, messages_before);
    Ok(())
}

#[sqlx::test(migrations = false)]
#[ignore = "requires PostgreSQL with pgvector (DATABASE_URL)"]
async fn all_seven_indexes_exist(pool: PgPool) -> anyhow::Result<()> {
    common::create_users_table(&pool).await;
    db::initialize(&pool, Mode::Apply).await?;

    for index in schema::indexes() {
        assert!(catalog::index_exists(&pool, index.name).await?, "{}", index.name);
    }
    Ok(())
}

#[sqlx::test(migrations = false)]
#[ignore = "requires PostgreSQL with pgvector (DATABASE_URL)"]
async fn status_check_rejects_unknown_values(pool: PgPool) -> anyhow::Result<()> {
    common::create_users_table(&pool).await;
    db::initialize(&pool, Mode::Apply).await?;
    let user_id = common::insert_user(&pool).await;

    let id = common::insert_session(&pool, user_id, "ACTIVE").await?;
    let session = sqlx::query_as::<_, Session>("SELECT * FROM sessions WHERE id = $1")
        .bind(id)
        .fetch_one(&pool)
        .await?;
    assert_eq!(session.status, SessionStatus::Active);
    assert_eq!(session.difficulty_level, DifficultyLevel::Intermediate);
    assert_eq!(session.max_duration_minutes, 60);
    assert!(session.enable_hints && session.enable_real_time_feedback);
    assert_eq!(session.session_config, serde_json::json!({}));
    assert!(session.ended_at.is_none());

    let err = common::insert_session(&pool, user_id, "BOGUS")
        .await
        .expect_err("BOGUS status must be rejected");
    let db_err = err.as_database_error().expect("database error");
    assert_eq!(db_err.code().as_deref(), Some("23514")); // check_violation
    assert_eq!(db_err.constraint(), Some("ck_sessions_status"));
    Ok(())
}

#[sqlx::test(migrations = false)]
#[ignore = "requires PostgreSQL with pgvector (DATABASE_URL)"]
async fn message_role_check_rejects_unknown_values(pool: PgPool) -> anyhow::Result<()> {
    common::create_users_table(&pool).await;
    db::initialize(&pool, Mode::Apply).await?;
    let user_id = common::insert_user(&pool).await;
    let session_id = common::insert_session(&pool, user_id, "ACTIVE").await?;

    common::insert_message(&pool, session_id, "ASSISTANT", "Let's start with requirements.").await?;
    let err = common::insert_message(&pool, session_id, "MODERATOR", "hi")
        .await
        .expect_err("unknown role must be rejected");
    assert_eq!(
        err.as_database_error().and_then(|e| e.constraint().map(str::to_string)),
        Some("ck_messages_role".to_string())
    );
    Ok(())
}

#[sqlx::test(migrations = false)]
#[ignore = "requires PostgreSQL with pgvector (DATABASE_URL)"]
async fn deleting_user_cascades_to_sessions_and_messages(pool: PgPool) -> anyhow::Result<()> {
    common::create_users_table(&pool).await;
    db::initialize(&pool, Mode::Apply).await?;

    let doomed = common::insert_user(&pool).await;
    let kept = common::insert_user(&pool).await;
    for user in [doomed, kept] {
        let session_id = common::insert_session(&pool, user, "ACTIVE").await?;
        common::insert_message(&pool, session_id, "SYSTEM", "You are an interviewer.").await?;
        common::insert_message(&pool, session_id, "USER", "Hello").await?;
    }
    assert_eq!(common::count(&pool, "messages").await, 4);

    sqlx::query("DELETE FROM users WHERE id = $1")
        .bind(doomed)
        .execute(&pool)
        .await?;

    assert_eq!(common::count(&pool, "sessions").await, 1);
    assert_eq!(common::count(&pool, "messages").await, 2);
    Ok(())
}

#[sqlx::test(migrations = false)]
#[ignore = "requires PostgreSQL with pgvector (DATABASE_URL)"]
async fn missing_users_table_fails_and_rerun_resumes(pool: PgPool) -> anyhow::Result<()> {
    match db::initialize(&pool, Mode::Apply).await {
        Err(SchemaError::Step { step, .. }) => assert_eq!(step, "create_table_sessions"),
        other => panic!("expected step failure, got {other:?}"),
    }
    assert!(!catalog::table_exists(&pool, "sessions").await?);

    // 선행 조건을 채우고 다시 실행하면 확장은 건너뛰고 테이블부터 이어서 만듭니다
    common::create_users_table(&pool).await;
    let report = db::initialize(&pool, Mode::Apply).await?;
    assert_eq!(report.outcome("create_extension_pg_trgm"), Some(Outcome::Skipped));
    assert_eq!(report.outcome("create_table_sessions"), Some(Outcome::Applied));
    Ok(())
}

#[sqlx::test(migrations = false)]
#[ignore = "requires PostgreSQL with pgvector (DATABASE_URL)"]
async fn dry_run_changes_nothing(pool: PgPool) -> anyhow::Result<()> {
    common::create_users_table(&pool).await;

    let report = db::initialize(&pool, Mode::DryRun).await?;
    assert!(report.dry_run);
    assert_eq!(report.outcome("create_table_sessions"), Some(Outcome::Pending));
    assert_eq!(report.with_outcome(Outcome::Applied).count(), 0);
    assert!(!catalog::table_exists(&pool, "sessions").await?);
    Ok(())
}

#[sqlx::test(migrations = false)]
#[ignore = "requires PostgreSQL with pgvector (DATABASE_URL)"]
async fn updating_a_session_touches_updated_at(pool: PgPool) -> anyhow::Result<()> {
    common::create_users_table(&pool).await;
    db::initialize(&pool, Mode::Apply).await?;
    let user_id = common::insert_user(&pool).await;
    let id = common::insert_session(&pool, user_id, "ACTIVE").await?;

    sqlx::query("UPDATE sessions SET status = 'COMPLETED', ended_at = NOW() WHERE id = $1")
        .bind(id)
        .execute(&pool)
        .await?;

    let session = sqlx::query_as::<_, Session>("SELECT * FROM sessions WHERE id = $1")
        .bind(id)
        .fetch_one(&pool)
        .await?;
    assert_eq!(session.status, SessionStatus::Completed);
    assert!(session.updated_at > session.created_at);
    Ok(())
}
