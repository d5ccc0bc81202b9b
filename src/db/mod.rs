//! # 데이터베이스 접근 계층 (Data Access Layer)
//!
//! 데이터베이스와 직접 상호작용하는 함수들을 모아둔 모듈입니다.
//! 라우트 핸들러(routes/)에서 이 모듈의 함수를 호출하여 DB 작업을 수행합니다.
//!
//! 각 하위 모듈:
//! - `brews`: 브루 애그리거트(댓글 포함)의 조회/생성/저장/삭제
//! - `users`: 사용자 계정 조회/생성

pub mod brews;
pub mod users;

pub use brews::*;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::str::FromStr;

/// 연결 풀을 만들고 `migrations/`의 마이그레이션을 실행합니다.
///
/// 파일 DB는 없으면 새로 만듭니다(`create_if_missing`).
/// `sqlite::memory:`를 쓰는 테스트에서는 연결마다 DB가 따로 생기므로
/// `max_connections`를 1로 넘겨야 합니다.
pub async fn init_pool(
    database_url: &str,
    max_connections: u32,
) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(max_connections)
        .connect_with(options)
        .await?;

    tracing::info!("Running database migrations...");
    sqlx::migrate!("./migrations").run(&pool).await?;

    Ok(pool)
}
