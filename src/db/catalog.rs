//! # 카탈로그 조회
//!
//! `information_schema`와 `pg_*` 시스템 카탈로그를 읽기만 하는 쿼리들입니다.
//! 모두 현재 스키마(`current_schema()`)를 기준으로 합니다.

use sqlx::{PgConnection, PgPool}; // PgConnection: 트랜잭션 안의 연결, PgPool: 독립 조회용

use crate::error::SchemaError;
use crate::models::ColumnInfo;
use crate::plan::Guard;

/// 가드 식을 평가합니다. 단계와 같은 트랜잭션 안에서 호출됩니다.
pub async fn guard_holds(conn: &mut PgConnection, guard: &Guard) -> Result<bool, sqlx::Error> {
    let sql = format!("SELECT {}", guard.to_sql());
    sqlx::query_scalar::<_, bool>(&sql).fetch_one(conn).await
}

/// 현재 스키마에 테이블이 있는지 확인합니다. 마이그레이터 사전 점검에 쓰입니다.
pub async fn table_exists(pool: &PgPool, table: &str) -> Result<bool, SchemaError> {
    // query_scalar: 결과가 컬럼 하나짜리일 때 구조체 없이 값만 꺼냅니다
    // $1: PostgreSQL 바인드 파라미터 (.bind()로 채움, SQL 인젝션 방지)
    let exists = sqlx::query_scalar::<_, bool>(
        r#"
        SELECT EXISTS (
            SELECT 1 FROM information_schema.tables
            WHERE table_schema = current_schema() AND table_name = $1
        )
        "#,
    )
    .bind(table)
    .fetch_one(pool)
    .await?;

    Ok(exists)
}

/// 테이블에 컬럼이 있는지 확인합니다.
pub async fn column_exists(pool: &PgPool, table: &str, column: &str) -> Result<bool, SchemaError> {
    let exists = sqlx::query_scalar::<_, bool>(
        r#"
        SELECT EXISTS (
            SELECT 1 FROM information_schema.columns
            WHERE table_schema = current_schema() AND table_name = $1 AND column_name = $2
        )
        "#,
    )
    .bind(table)
    .bind(column)
    .fetch_one(pool)
    .await?;

    Ok(exists)
}

/// 현재 스키마에 이름이 같은 인덱스가 있는지 확인합니다.
pub async fn index_exists(pool: &PgPool, index: &str) -> Result<bool, SchemaError> {
    let exists = sqlx::query_scalar::<_, bool>(
        r#"
        SELECT EXISTS (
            SELECT 1 FROM pg_indexes
            WHERE schemaname = current_schema() AND indexname = $1
        )
        "#,
    )
    .bind(index)
    .fetch_one(pool)
    .await?;

    Ok(exists)
}

/// 테이블의 컬럼 메타데이터를 순서대로 조회합니다.
///
/// `information_schema`의 도메인 타입(`sql_identifier`, `yes_or_no` 등)은
/// 모두 기본 타입으로 캐스팅해서 받습니다.
pub async fn list_columns(pool: &PgPool, table: &str) -> Result<Vec<ColumnInfo>, SchemaError> {
    let columns = sqlx::query_as::<_, ColumnInfo>(
        r#"
        SELECT column_name::text AS column_name,
               data_type::text AS data_type,
               (is_nullable = 'YES') AS is_nullable,
               column_default::text AS column_default,
               ordinal_position::int4 AS ordinal_position
        FROM information_schema.columns
        WHERE table_schema = current_schema() AND table_name = $1
        ORDER BY ordinal_position
        "#,
    )
    .bind(table)
    .fetch_all(pool)
    .await?;

    Ok(columns)
}
