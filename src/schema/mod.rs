//! # 스키마 정의 모듈
//!
//! `sessions`, `messages` 테이블과 확장, 인덱스, 트리거를 **선언적으로** 기술합니다.
//! 실제 DDL 문자열은 `ddl` 하위 모듈이 이 정의로부터 만들어냅니다.
//!
//! 초기화 계획과 마이그레이션 계획(`crate::plan`)은 모두 이 정의 하나를 바라봅니다.
//! 그래서 "초기 생성 시의 모양"과 "마이그레이션 후의 모양"이 따로 놀지 않습니다.
//!
//! - `sessions`: 인터뷰 세션 테이블
//! - `messages`: 세션 안의 대화 메시지 테이블

pub mod ddl;
pub mod messages;
pub mod sessions;

/// 외래키가 참조하는 사용자 테이블. 이 도구가 만들지 않는 외부 의존성입니다.
pub const USERS_TABLE: &str = "users";

/// 필요한 PostgreSQL 확장
///
/// - `vector`: 벡터 유사도 검색 (pgvector)
/// - `uuid-ossp`: `uuid_generate_v4()`
/// - `pg_trgm`: 주제(topic) 트라이그램 인덱스
pub const EXTENSIONS: &[Extension] = &[
    Extension { name: "vector" },
    Extension { name: "uuid-ossp" },
    Extension { name: "pg_trgm" },
];

/// 트라이그램 인덱스가 의존하는 확장
pub const TRIGRAM_EXTENSION: Extension = Extension { name: "pg_trgm" };

/// PostgreSQL 확장 하나 (`CREATE EXTENSION`의 대상)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Extension {
    pub name: &'static str,
}

/// 외래키 정의. 이 스키마의 외래키는 모두 `ON DELETE CASCADE`입니다.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForeignKey {
    /// 참조 대상 테이블
    pub table: &'static str,
    /// 참조 대상 컬럼 (항상 기본키)
    pub column: &'static str,
}

/// 컬럼 정의
///
/// 빌더 메서드로 조립합니다:
/// ```
/// use sdcoach_schema::schema::Column;
///
/// let col = Column::new("max_duration_minutes", "INTEGER")
///     .not_null()
///     .default_value("60");
/// assert!(col.has_default());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    pub name: &'static str,
    /// SQL 타입 그대로의 문자열 (예: `VARCHAR(200)`, `JSONB`)
    pub sql_type: &'static str,
    pub not_null: bool,
    /// 이미 SQL 표현식 형태인 기본값 (예: `'ACTIVE'`, `NOW()`, `60`)
    pub default: Option<String>,
    pub primary_key: bool,
    pub references: Option<ForeignKey>,
    /// 허용 값 목록. 있으면 CHECK 제약조건이 생성됩니다.
    pub allowed: Option<Vec<&'static str>>,
}

impl Column {
    /// NULL 허용, 기본값/키/허용 값 목록이 없는 컬럼에서 시작합니다.
    pub fn new(name: &'static str, sql_type: &'static str) -> Self {
        Self {
            name,
            sql_type,
            not_null: false,
            default: None,
            primary_key: false,
            references: None,
            allowed: None,
        }
    }

    // 빌더 메서드는 self를 값으로 받아(mut self) 고친 뒤 그대로 돌려줍니다.
    // 그래서 `Column::new(..).not_null().default_value(..)`처럼 이어 쓸 수 있습니다.

    pub fn not_null(mut self) -> Self {
        self.not_null = true;
        self
    }

    /// SQL 표현식 기본값 (예: `NOW()`, `60`, `'{}'::jsonb`)
    pub fn default_value(mut self, expr: impl Into<String>) -> Self {
        self.default = Some(expr.into());
        self
    }

    /// 텍스트 기본값. 작은따옴표로 감싸서 저장합니다.
    pub fn default_text(self, text: &str) -> Self {
        self.default_value(ddl::quote_literal(text))
    }

    pub fn primary_key(mut self) -> Self {
        self.primary_key = true;
        self
    }

    /// `ON DELETE CASCADE` 외래키를 붙입니다.
    pub fn references(mut self, table: &'static str, column: &'static str) -> Self {
        self.references = Some(ForeignKey { table, column });
        self
    }

    /// 허용 값 목록. `CREATE TABLE` 시 이름 붙은 CHECK 제약조건이 됩니다.
    pub fn one_of(mut self, values: impl IntoIterator<Item = &'static str>) -> Self {
        self.allowed = Some(values.into_iter().collect());
        self
    }

    pub fn has_default(&self) -> bool {
        self.default.is_some()
    }

    /// 키 컬럼(기본키/외래키)은 마이그레이터가 추가하지 않습니다.
    /// 데이터가 있는 테이블에 NOT NULL 외래키를 뒤늦게 붙일 수 없기 때문입니다.
    pub fn is_key(&self) -> bool {
        self.primary_key || self.references.is_some()
    }
}

/// 인덱스 접근 방식
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexMethod {
    BTree,
    Gin,
}

/// 인덱스 키 하나 (컬럼 + 정렬 방향 + 연산자 클래스)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexKey {
    pub column: &'static str,
    pub descending: bool,
    pub opclass: Option<&'static str>,
}

impl IndexKey {
    pub fn asc(column: &'static str) -> Self {
        Self {
            column,
            descending: false,
            opclass: None,
        }
    }

    pub fn desc(column: &'static str) -> Self {
        Self {
            descending: true,
            ..Self::asc(column)
        }
    }

    pub fn trigram(column: &'static str) -> Self {
        Self {
            opclass: Some("gin_trgm_ops"),
            ..Self::asc(column)
        }
    }
}

/// 보조 인덱스 정의
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Index {
    /// 인덱스 이름. 존재 여부를 이름으로 확인하므로 스키마 안에서 유일해야 합니다.
    pub name: &'static str,
    pub table: &'static str,
    pub method: IndexMethod,
    pub keys: Vec<IndexKey>,
}

impl Index {
    /// 기본 B-tree 인덱스 (`USING` 절 없음)
    pub fn btree(name: &'static str, table: &'static str, keys: Vec<IndexKey>) -> Self {
        Self {
            name,
            table,
            method: IndexMethod::BTree,
            keys,
        }
    }

    /// GIN 인덱스. 트라이그램 검색용 `gin_trgm_ops` 키와 함께 씁니다.
    pub fn gin(name: &'static str, table: &'static str, keys: Vec<IndexKey>) -> Self {
        Self {
            name,
            table,
            method: IndexMethod::Gin,
            keys,
        }
    }

    /// `pg_trgm` 확장이 먼저 켜져 있어야 하는 인덱스인지
    pub fn needs_trigram(&self) -> bool {
        self.keys.iter().any(|k| k.opclass == Some("gin_trgm_ops"))
    }
}

/// `BEFORE UPDATE` 트리거로 `updated_at`을 갱신합니다.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TouchTrigger {
    pub name: &'static str,
    pub table: &'static str,
    pub column: &'static str,
}

/// 트리거가 호출하는 공용 함수 이름
pub const TOUCH_FUNCTION: &str = "touch_updated_at";

/// 테이블 하나의 전체 정의: 컬럼, 인덱스, `updated_at` 트리거
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    pub name: &'static str,
    pub columns: Vec<Column>,
    pub indexes: Vec<Index>,
    pub touch_trigger: Option<TouchTrigger>,
}

impl Table {
    /// 이름으로 컬럼 정의를 찾습니다.
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// CHECK 제약조건 이름 (`ck_<table>_<column>`)
    pub fn check_name(&self, column: &Column) -> String {
        format!("ck_{}_{}", self.name, column.name)
    }
}

/// 생성 순서대로의 테이블 목록. `messages`가 `sessions`를 참조하므로 순서가 중요합니다.
pub fn tables() -> Vec<Table> {
    vec![sessions::table(), messages::table()]
}

/// 모든 테이블의 보조 인덱스 (테이블 순서 → 선언 순서)
pub fn indexes() -> Vec<Index> {
    tables().into_iter().flat_map(|t| t.indexes).collect()
}
