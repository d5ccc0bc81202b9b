//! # 애플리케이션 설정(Configuration) 모듈
//!
//! 환경변수에서 서버 설정값을 읽어오는 모듈입니다.
//! `main`에서 `dotenvy`로 `.env` 파일을 먼저 로딩한 뒤 호출합니다.
//!
//! 설정 항목:
//! - `DATABASE_URL`: SQLite 데이터베이스 경로 (필수)
//! - `JWT_SECRET`: Bearer 토큰 서명에 사용할 비밀키 (필수)
//! - `HOST`: 서버 바인딩 주소 (기본값 `0.0.0.0`)
//! - `PORT`: 서버 포트 번호 (기본값 3000)
//! - `DB_MAX_CONNECTIONS`: 연결 풀 최대 크기 (기본값 5)
//! - `TOKEN_TTL_MINUTES`: 발급한 토큰의 유효 시간(분) (기본값 1440, 하루)

use std::env;

/// 애플리케이션 전체 설정을 담는 구조체
///
/// 서버 시작 시 한 번 읽어온 뒤 필요한 값만 `AppState`로 옮겨 공유합니다.
#[derive(Debug, Clone)]
pub struct Config {
    /// SQLite 데이터베이스 URL (예: "sqlite:data/brewlog.db")
    pub database_url: String,
    pub jwt_secret: String,
    pub host: String,
    pub port: u16,
    pub db_max_connections: u32,
    pub token_ttl_minutes: i64,
}

impl Config {
    /// 환경변수에서 설정값을 읽어 Config 인스턴스를 생성합니다.
    ///
    /// # 에러
    /// `DATABASE_URL`과 `JWT_SECRET`이 없으면 `VarError`를 반환합니다.
    /// 나머지 값은 없거나 숫자로 읽을 수 없으면 기본값을 씁니다.
    pub fn from_env() -> Result<Self, env::VarError> {
        Ok(Self {
            database_url: env::var("DATABASE_URL")?,
            jwt_secret: env::var("JWT_SECRET")?,
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: parse_or("PORT", 3000),
            db_max_connections: parse_or("DB_MAX_CONNECTIONS", 5),
            token_ttl_minutes: parse_or("TOKEN_TTL_MINUTES", 24 * 60),
        })
    }
}

/// 환경변수를 읽어 `T`로 파싱합니다. 변수가 없거나 파싱에 실패하면 `default`.
///
/// `T: std::str::FromStr`: 문자열에서 만들 수 있는 타입(u16, u32, i64 등)이면 무엇이든 됩니다.
fn parse_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|value| value.parse().ok())
        .unwrap_or(default)
}
