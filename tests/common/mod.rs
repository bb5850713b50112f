// 통합 테스트 공용 도우미
//
// `#[sqlx::test]`가 테스트마다 새 데이터베이스를 만들어 줍니다.
// `users` 테이블은 이 도구가 만들지 않는 외부 의존성이므로 여기서 최소 형태로 만듭니다.

#![allow(dead_code)]

use sqlx::PgPool;
use uuid::Uuid;

pub async fn create_users_table(pool: &PgPool) {
    sqlx::raw_sql(
        r#"
        CREATE TABLE users (
            id UUID PRIMARY KEY,
            email VARCHAR(255) NOT NULL UNIQUE
        )
        "#,
    )
    .execute(pool)
    .await
    .unwrap();
}

pub async fn insert_user(pool: &PgPool) -> Uuid {
    let id = Uuid::new_v4();
    sqlx::query("INSERT INTO users (id, email) VALUES ($1, $2)")
        .bind(id)
        .bind(format!("{id}@example.com"))
        .execute(pool)
        .await
        .unwrap();
    id
}

/// 현재 스키마의 `sessions`에 행을 넣습니다. id는 DB 기본값으로 생성됩니다.
pub async fn insert_session(pool: &PgPool, user_id: Uuid, status: &str) -> Result<Uuid, sqlx::Error> {
    sqlx::query_scalar(
        r#"
        INSERT INTO sessions (user_id, topic, status)
        VALUES ($1, $2, $3)
        RETURNING id
        "#,
    )
    .bind(user_id)
    .bind("Design a URL shortener")
    .bind(status)
    .fetch_one(pool)
    .await
}

pub async fn insert_message(
    pool: &PgPool,
    session_id: Uuid,
    role: &str,
    content: &str,
) -> Result<Uuid, sqlx::Error> {
    sqlx::query_scalar(
        r#"
        INSERT INTO messages (session_id, role, content)
        VALUES ($1, $2, $3)
        RETURNING id
        "#,
    )
    .bind(session_id)
    .bind(role)
    .bind(content)
    .fetch_one(pool)
    .await
}

pub async fn count(pool: &PgPool, table: &str) -> i64 {
    sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {table}"))
        .fetch_one(pool)
        .await
        .unwrap()
}

/// 예전 세대의 스키마
///
/// - `sessions.status`는 네이티브 ENUM 타입, 설정/시간 컬럼 대부분이 없음
/// - `messages`는 메타데이터 컬럼 이름이 `metadata`, 유형/시간/토큰 컬럼이 없음
/// - 보조 인덱스와 트리거 없음
pub async fn create_legacy_schema(pool: &PgPool) {
    sqlx::raw_sql(
        r#"
        CREATE TYPE session_status AS ENUM ('ACTIVE', 'COMPLETED', 'ABANDONED', 'PAUSED');

        CREATE TABLE sessions (
            id UUID PRIMARY KEY,
            user_id UUID NOT NULL REFERENCES users (id) ON DELETE CASCADE,
            topic VARCHAR(200) NOT NULL,
            status session_status NOT NULL DEFAULT 'ACTIVE',
            created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
        );

        CREATE TABLE messages (
            id UUID PRIMARY KEY,
            session_id UUID NOT NULL REFERENCES sessions (id) ON DELETE CASCADE,
            role VARCHAR(20) NOT NULL,
            content TEXT NOT NULL,
            metadata JSONB NOT NULL DEFAULT '{}'::jsonb
        );
        "#,
    )
    .execute(pool)
    .await
    .unwrap();
}

pub async fn insert_legacy_session(pool: &PgPool, user_id: Uuid) -> Uuid {
    let id = Uuid::new_v4();
    sqlx::query("INSERT INTO sessions (id, user_id, topic) VALUES ($1, $2, $3)")
        .bind(id)
        .bind(user_id)
        .bind("Design a chat service")
        .execute(pool)
        .await
        .unwrap();
    id
}

pub async fn insert_legacy_message(
    pool: &PgPool,
    session_id: Uuid,
    metadata: serde_json::Value,
) -> Uuid {
    let id = Uuid::new_v4();
    sqlx::query(
        "INSERT INTO messages (id, session_id, role, content, metadata) VALUES ($1, $2, $3, $4, $5)",
    )
    .bind(id)
    .bind(session_id)
    .bind("USER")
    .bind("How would you shard this?")
    .bind(metadata)
    .execute(pool)
    .await
    .unwrap();
    id
}
