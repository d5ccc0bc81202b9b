//! # brewlog 웹 서버 진입점
//!
//! 이 파일이 수행하는 작업:
//! 1. 환경변수(.env) 로딩
//! 2. 로깅(tracing) 초기화
//! 3. SQLite 연결 풀 생성 및 마이그레이션 실행
//! 4. API 라우터 설정
//! 5. HTTP 서버 시작

use anyhow::Result; // anyhow::Result: 어떤 에러 타입이든 담을 수 있는 범용 Result 타입
use brewlog::{config::Config, db, routes};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

// #[tokio::main]: 비동기 런타임을 만들고 그 안에서 main을 실행하는 어트리뷰트 매크로
#[tokio::main]
async fn main() -> Result<()> {
    // ── 1단계: 환경변수 로딩 ──
    // .ok(): .env 파일이 없어도 에러 없이 넘어갑니다.
    dotenvy::dotenv().ok();

    // ── 2단계: 로깅(tracing) 초기화 ──
    // RUST_LOG가 없으면 brewlog, tower_http, axum을 debug 레벨로 출력합니다.
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "brewlog=debug,tower_http=debug,axum=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // ── 3단계: 설정 로딩 ──
    // `?`: DATABASE_URL이나 JWT_SECRET이 없으면 여기서 종료합니다.
    let config = Config::from_env()?;
    tracing::info!("Starting brewlog server on {}:{}", config.host, config.port);

    // ── 4단계: 연결 풀 생성 + 마이그레이션 ──
    let pool = db::init_pool(&config.database_url, config.db_max_connections).await?;

    // ── 5단계: 애플리케이션 상태(State) 생성 ──
    // SqlitePool은 내부적으로 Arc라서 clone해도 같은 풀을 가리킵니다.
    let state = routes::AppState {
        pool,
        jwt_secret: config.jwt_secret.clone(),
        token_ttl_minutes: config.token_ttl_minutes,
    };

    // ── 6단계: 라우터 + 미들웨어(CORS, 요청 로깅) ──
    let app = routes::router(state);

    // ── 7단계: 서버 시작 ──
    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", addr);

    // Ctrl+C로 종료할 때까지 요청을 처리합니다.
    axum::serve(listener, app).await?;

    Ok(())
}
