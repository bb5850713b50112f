use serde::Serialize; // `columns --json` 출력용

// sqlx::FromRow: SELECT 결과의 컬럼 이름과 필드 이름을 맞춰 자동으로 구조체를 채웁니다.
// 그래서 catalog 쿼리는 `AS column_name`처럼 필드 이름으로 별칭을 붙입니다.

/// `information_schema.columns`의 한 행. 마이그레이션 후 운영자 확인용 출력에 쓰입니다.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct ColumnInfo {
    pub column_name: String,
    pub data_type: String,
    /// `information_schema`의 'YES'/'NO'를 불리언으로 바꾼 값
    pub is_nullable: bool,
    pub column_default: Option<String>,
    /// 테이블 안에서의 컬럼 순서 (1부터)
    pub ordinal_position: i32,
}
