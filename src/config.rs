//! # 설정(Configuration) 모듈
//!
//! 환경변수에서 접속 정보와 로깅 설정을 읽어옵니다.
//! `.env` 파일이나 시스템 환경변수에서 값을 가져옵니다.
//!
//! 설정 항목:
//! - `DATABASE_URL`: PostgreSQL 접속 문자열 (없으면 `DB_*` 값을 필드 단위로 사용)
//! - `DB_HOST`, `DB_PORT`, `DB_NAME`, `DB_USER`, `DB_PASSWORD`: 개별 접속 정보
//! - `DB_MAX_CONNECTIONS`: 연결 풀 크기
//! - `DB_CONNECT_TIMEOUT_SECS`: 연결 획득 타임아웃(초)
//! - `ENVIRONMENT`: `development`면 사람이 읽는 로그, 그 외에는 JSON 로그

use std::env;

use sqlx::postgres::PgConnectOptions; // 접속 정보를 URL 문자열 없이 필드 단위로 담는 구조체

const DEFAULT_HOST: &str = "localhost";
const DEFAULT_PORT: u16 = 5432;
const DEFAULT_NAME: &str = "system_design_coach";
const DEFAULT_USER: &str = "postgres";
const DEFAULT_MAX_CONNECTIONS: u32 = 2;
const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

/// `DB_*` 환경변수로 지정하는 개별 접속 정보
///
/// `DATABASE_URL`이 없을 때만 사용합니다.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DbParts {
    pub host: String,
    pub port: u16,
    pub name: String,
    pub user: String,
    /// 비어 있으면 비밀번호 없이 접속합니다 (peer/trust 인증 등)
    pub password: Option<String>,
}

// #[derive(Debug, Clone)]: 설정은 main에서 한 번 만들고, 필요하면 복제해서 넘깁니다.

/// 도구 전체 설정
///
/// 실행 시작 시 환경변수에서 한 번 읽어옵니다.
#[derive(Debug, Clone)]
pub struct Config {
    /// PostgreSQL 접속 문자열 (예: "postgres://postgres@localhost:5432/system_design_coach")
    /// None이면 `db`의 개별 값으로 접속합니다.
    pub database_url: Option<String>,
    /// 개별 접속 정보 (`DB_HOST`, `DB_PORT` ...)
    pub db: DbParts,
    /// 연결 풀 최대 연결 수
    /// 단계는 하나씩 순서대로 실행되므로 큰 값이 필요 없습니다.
    pub max_connections: u32,
    /// 연결을 얻기까지 기다리는 최대 시간(초)
    pub connect_timeout_secs: u64,
    /// 실행 환경 이름 (기본값: "development")
    pub environment: String,
}

impl Config {
    /// 환경변수에서 설정값을 읽어 Config 인스턴스를 생성합니다.
    ///
    /// 필수 항목이 없습니다. `DATABASE_URL`이 없으면 `DB_*` 값(또는 기본값)을 씁니다.
    pub fn from_env() -> Self {
        // env::var()는 Result<String, VarError>를 반환합니다.
        // .ok()로 Option으로 바꾸면 "없음"과 "잘못된 유니코드"를 같이 None으로 다룹니다.
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// 임의의 조회 함수로 설정을 만듭니다. 테스트에서 전역 환경변수를 건드리지 않기 위해 분리했습니다.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            database_url: lookup("DATABASE_URL").filter(|url| !url.trim().is_empty()),
            db: DbParts {
                host: lookup("DB_HOST").unwrap_or_else(|| DEFAULT_HOST.to_string()),
                // 숫자 파싱에 실패하면 기본값을 사용합니다
                port: lookup("DB_PORT")
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(DEFAULT_PORT),
                name: lookup("DB_NAME").unwrap_or_else(|| DEFAULT_NAME.to_string()),
                user: lookup("DB_USER").unwrap_or_else(|| DEFAULT_USER.to_string()),
                password: lookup("DB_PASSWORD").filter(|p| !p.is_empty()),
            },
            max_connections: lookup("DB_MAX_CONNECTIONS")
                .and_then(|v| v.parse().ok())
                .filter(|n| *n > 0)
                .unwrap_or(DEFAULT_MAX_CONNECTIONS),
            connect_timeout_secs: lookup("DB_CONNECT_TIMEOUT_SECS")
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_CONNECT_TIMEOUT_SECS),
            environment: lookup("ENVIRONMENT").unwrap_or_else(|| "development".to_string()),
        }
    }

    /// 개발 환경 여부. 로그 포맷 선택에 사용합니다.
    pub fn is_development(&self) -> bool {
        self.environment.eq_ignore_ascii_case("development")
    }

    /// 연결 풀에 넘길 접속 옵션
    ///
    /// `DATABASE_URL`이 있으면 그 문자열을 파싱하고, 없으면 `DB_*` 값을 필드 단위로 채웁니다.
    /// 필드 단위로 넘기므로 비밀번호에 `/`, `#`, `?`, `:` 같은 문자가 있어도 인코딩할 필요가 없습니다.
    ///
    /// ## 에러
    /// - `DATABASE_URL` 형식이 잘못된 경우 sqlx의 `Configuration` 에러
    pub fn connect_options(&self) -> Result<PgConnectOptions, sqlx::Error> {
        if let Some(url) = &self.database_url {
            // FromStr 구현 덕분에 .parse()로 URL → PgConnectOptions 변환
            return url.parse();
        }

        let db = &self.db;
        let options = PgConnectOptions::new()
            .host(&db.host)
            .port(db.port)
            .username(&db.user)
            .database(&db.name);

        Ok(match &db.password {
            Some(password) => options.password(password),
            None => options,
        })
    }
}
