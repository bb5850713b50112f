//! # sdcoach-schema
//!
//! System Design Interview Coach의 PostgreSQL 스키마를 초기화하고 갱신하는 라이브러리입니다.
//!
//! - `schema`: 테이블/컬럼/인덱스/트리거의 선언적 정의와 DDL 생성
//! - `plan`: 가드로 보호되는 단계 목록 (초기화 계획, 마이그레이션 계획)
//! - `db`: 계획을 실제 DB에 적용하고 카탈로그를 조회
//! - `models`: 테이블 행 구조체와 열거형
//! - `config`, `error`: 설정과 에러 타입

pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod plan;
pub mod schema;
