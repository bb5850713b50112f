//! # DDL 생성
//!
//! 스키마 정의(`Table`, `Column`, `Index` …)를 PostgreSQL DDL 문자열로 바꿉니다.
//! 식별자는 항상 큰따옴표로 감쌉니다. `timestamp`처럼 키워드와 겹치는 컬럼 이름도
//! 그대로 쓸 수 있습니다.

// 스키마 정의 타입들. 이 모듈은 정의를 읽기만 하고 문자열만 만듭니다 (DB 접근 없음).
use super::{Column, Extension, Index, IndexMethod, Table, TouchTrigger, TOUCH_FUNCTION};

/// 식별자를 큰따옴표로 감쌉니다. 내부의 `"`는 두 번 씁니다.
pub fn quote_ident(ident: &str) -> String {
    format!("\"{}\"", ident.replace('"', "\"\""))
}

/// 문자열 리터럴을 작은따옴표로 감쌉니다. 내부의 `'`는 두 번 씁니다.
pub fn quote_literal(text: &str) -> String {
    format!("'{}'", text.replace('\'', "''"))
}

/// `CREATE EXTENSION IF NOT EXISTS "<name>"`
pub fn create_extension(ext: &Extension) -> String {
    format!("CREATE EXTENSION IF NOT EXISTS {}", quote_ident(ext.name))
}

/// `CREATE TABLE` 안에 들어가는 컬럼 정의 한 줄
pub fn column_definition(column: &Column) -> String {
    let mut def = format!("{} {}", quote_ident(column.name), column.sql_type);
    if column.primary_key {
        def.push_str(" PRIMARY KEY");
    } else if column.not_null {
        def.push_str(" NOT NULL");
    }
    if let Some(default) = &column.default {
        def.push_str(" DEFAULT ");
        def.push_str(default);
    }
    if let Some(fk) = &column.references {
        def.push_str(&format!(
            " REFERENCES {} ({}) ON DELETE CASCADE",
            quote_ident(fk.table),
            quote_ident(fk.column)
        ));
    }
    def
}

/// 이름 붙은 CHECK 제약조건: `CONSTRAINT "ck_sessions_status" CHECK ("status" IN (...))`
pub fn check_constraint(table: &Table, column: &Column) -> Option<String> {
    let allowed = column.allowed.as_ref()?;
    let values = allowed
        .iter()
        .map(|v| quote_literal(v))
        .collect::<Vec<_>>()
        .join(", ");
    Some(format!(
        "CONSTRAINT {} CHECK ({} IN ({}))",
        quote_ident(&table.check_name(column)),
        quote_ident(column.name),
        values
    ))
}

/// 테이블 전체를 만드는 `CREATE TABLE IF NOT EXISTS`
///
/// 컬럼 정의 뒤에 CHECK 제약조건이 이어집니다. 한 줄에 하나씩, 4칸 들여쓰기.
pub fn create_table(table: &Table) -> String {
    // .map(column_definition): 함수 이름을 그대로 클로저 자리에 넘길 수 있습니다
    let mut lines: Vec<String> = table.columns.iter().map(column_definition).collect();
    lines.extend(
        table
            .columns
            .iter()
            .filter_map(|column| check_constraint(table, column)),
    );

    format!(
        "CREATE TABLE IF NOT EXISTS {} (\n    {}\n)",
        quote_ident(table.name),
        lines.join(",\n    ")
    )
}

/// 기존 테이블에 컬럼을 추가하는 `ALTER TABLE`
///
/// 기존 행이 있어도 실패하지 않도록, NOT NULL은 기본값이 있을 때만 붙입니다.
/// CHECK와 키 제약은 붙이지 않습니다.
pub fn add_column(table: &str, column: &Column) -> String {
    let mut def = format!(
        "ALTER TABLE {} ADD COLUMN {} {}",
        quote_ident(table),
        quote_ident(column.name),
        column.sql_type
    );
    if let Some(default) = &column.default {
        def.push_str(" DEFAULT ");
        def.push_str(default);
        if column.not_null {
            def.push_str(" NOT NULL");
        }
    }
    def
}

/// `ALTER TABLE .. RENAME COLUMN`. 데이터는 그대로 남습니다.
pub fn rename_column(table: &str, from: &str, to: &str) -> String {
    format!(
        "ALTER TABLE {} RENAME COLUMN {} TO {}",
        quote_ident(table),
        quote_ident(from),
        quote_ident(to)
    )
}

/// `CREATE INDEX IF NOT EXISTS`. 키마다 연산자 클래스와 DESC가 붙을 수 있습니다.
pub fn create_index(index: &Index) -> String {
    let keys = index
        .keys
        .iter()
        .map(|key| {
            let mut part = quote_ident(key.column);
            if let Some(opclass) = key.opclass {
                part.push(' ');
                part.push_str(opclass);
            }
            if key.descending {
                part.push_str(" DESC");
            }
            part
        })
        .collect::<Vec<_>>()
        .join(", ");

    let using = match index.method {
        IndexMethod::BTree => String::new(),
        IndexMethod::Gin => " USING gin".to_string(),
    };

    format!(
        "CREATE INDEX IF NOT EXISTS {} ON {}{} ({})",
        quote_ident(index.name),
        quote_ident(index.table),
        using,
        keys
    )
}

/// `updated_at`을 현재 시각으로 바꾸는 트리거 함수. `CREATE OR REPLACE`이므로 여러 번 실행해도 됩니다.
pub fn create_touch_function(column: &str) -> String {
    format!(
        "CREATE OR REPLACE FUNCTION {}() RETURNS trigger AS $fn$\n\
         BEGIN\n    NEW.{} = NOW();\n    RETURN NEW;\nEND;\n$fn$ LANGUAGE plpgsql",
        quote_ident(TOUCH_FUNCTION),
        quote_ident(column)
    )
}

/// 행 단위 `BEFORE UPDATE` 트리거. `CREATE TRIGGER`에는 IF NOT EXISTS가 없어서 가드로 보호합니다.
pub fn create_touch_trigger(trigger: &TouchTrigger) -> String {
    format!(
        "CREATE TRIGGER {} BEFORE UPDATE ON {} FOR EACH ROW EXECUTE FUNCTION {}()",
        quote_ident(trigger.name),
        quote_ident(trigger.table),
        quote_ident(TOUCH_FUNCTION)
    )
}
