//! # 라우트 핸들러 모듈
//!
//! HTTP 요청을 처리하는 핸들러 함수들과, 이들을 URL에 연결하는 라우터를 모아둔 모듈입니다.
//!
//! 각 하위 모듈:
//! - `auth`: 회원가입, 로그인, 내 정보
//! - `brews`: 브루 CRUD 핸들러 (+ `AppState`)
//! - `comments`: 브루 안에 포함된 댓글 CRUD 핸들러
//! - `health`: 서버 상태 확인

pub mod auth;
pub mod brews;
pub mod comments;
pub mod health;

pub use brews::AppState;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

/// 전체 API 라우터를 만듭니다.
///
/// `main`과 통합 테스트가 같은 라우터를 쓰도록 한 곳에서 조립합니다.
/// 경로 파라미터는 axum 0.8 문법인 `{id}`를 씁니다.
pub fn router(state: AppState) -> Router {
    let auth_routes = Router::new()
        .route("/auth/register", post(auth::register))
        .route("/auth/login", post(auth::login))
        .route("/auth/me", get(auth::me));

    let api_routes = Router::new()
        .merge(auth_routes)
        .route("/brews", get(brews::list_brews).post(brews::create_brew))
        .route(
            "/brews/{id}",
            get(brews::get_brew)
                .patch(brews::update_brew)
                .delete(brews::delete_brew),
        )
        .route("/comments", get(comments::list_comments))
        // POST의 {id}는 부모 브루 ID, 나머지는 댓글 ID입니다.
        .route(
            "/comments/{id}",
            get(comments::get_comment)
                .post(comments::create_comment)
                .patch(comments::update_comment)
                .delete(comments::delete_comment),
        )
        .route("/health", get(health::health_check))
        .with_state(state);

    // 개발 편의를 위해 모든 출처를 허용합니다. 배포 시에는 허용 도메인을 좁혀야 합니다.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    api_routes.layer(cors).layer(TraceLayer::new_for_http())
}
