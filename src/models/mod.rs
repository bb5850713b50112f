//! # 데이터 모델 모듈
//!
//! 스키마가 정의하는 테이블의 행(row) 구조체와 열거형 값들을 모아둔 모듈입니다.
//! - `session`: `sessions` 테이블 행과 상태/난이도 열거형
//! - `message`: `messages` 테이블 행과 역할/유형 열거형
//! - `column`: `information_schema.columns` 조회 결과
//!
//! 열거형은 DB에 대문자 텍스트(`'ACTIVE'`, `'USER'` 등)로 저장되고, 같은 값 목록이
//! CHECK 제약조건을 만드는 데에도 쓰입니다. Rust 쪽 값 목록과 DB 제약이 어긋날 수 없습니다.

pub mod column;
pub mod message;
pub mod session;

pub use column::*;
pub use message::*;
pub use session::*;

/// 대문자 텍스트로 저장되는 열거형을 정의합니다.
///
/// 생성되는 항목:
/// - `ALL`: 선언 순서대로의 전체 값 목록 (CHECK 제약조건에 사용)
/// - `as_str()` / `Display`: DB에 저장되는 텍스트
/// - `FromStr`, `TryFrom<String>`: 텍스트 → 열거형 (`#[sqlx(try_from = "String")]`용)
macro_rules! text_enum {
    (
        $(#[$meta:meta])*
        $name:ident ($kind:literal) {
            $( $(#[$vmeta:meta])* $variant:ident => $text:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
        pub enum $name {
            $( $(#[$vmeta])* #[serde(rename = $text)] $variant ),+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub const fn as_str(self) -> &'static str {
                match self {
                    $($name::$variant => $text),+
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $name {
            type Err = $crate::error::SchemaError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($text => Ok($name::$variant),)+
                    other => Err($crate::error::SchemaError::UnknownVariant {
                        kind: $kind,
                        value: other.to_string(),
                    }),
                }
            }
        }

        impl TryFrom<String> for $name {
            type Error = $crate::error::SchemaError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                value.parse()
            }
        }
    };
}

pub(crate) use text_enum;
