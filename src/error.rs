//! # 에러 처리 모듈
//!
//! 애플리케이션에서 발생할 수 있는 모든 에러 종류를 `AppError` 하나로 모읍니다.
//! 핸들러는 에러를 직접 처리하지 않고 `?`로 그대로 올려보내며,
//! 여기의 `IntoResponse` 구현이 상태 코드와 JSON 본문으로 바꿔 줍니다.
//!
//! | 에러 | 상태 코드 |
//! |------|-----------|
//! | `NotFound` | 404 |
//! | `Forbidden` | 403 (소유자가 아닌 사용자의 수정/삭제) |
//! | `Validation` | 422 |
//! | `BadRequest` | 400 |
//! | `Unauthorized` | 401 |
//! | `Conflict` | 409 (중복 이메일, 오래된 버전으로 저장 시도) |
//! | `Database` / `Internal` | 500 |

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// 애플리케이션에서 발생할 수 있는 모든 에러 종류
///
/// `#[derive(Error)]`(thiserror)가 `#[error("...")]` 문구로 Display를 만들어 줍니다.
#[derive(Debug, Error)]
pub enum AppError {
    /// 요청한 브루 또는 댓글이 없음
    #[error("Resource not found")]
    NotFound,

    /// 인증은 되었지만 리소스의 소유자가 아님
    #[error("You do not own this resource")]
    Forbidden,

    /// 필수 필드 누락 등 요청 내용이 규칙에 맞지 않음
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Internal error: {0}")]
    Internal(String),

    /// #[from]: `sqlx::Error`에 `?`를 쓰면 자동으로 `AppError::Database`가 됩니다.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Conflict: {0}")]
    Conflict(String),
}

impl IntoResponse for AppError {
    /// AppError를 HTTP 응답으로 변환합니다.
    ///
    /// 500 계열(Database, Internal)은 실제 원인을 로그에만 남기고
    /// 클라이언트에는 일반적인 메시지만 보냅니다.
    fn into_response(self) -> Response {
        let (status, code, message) = match self {
            AppError::NotFound => (StatusCode::NOT_FOUND, "not_found", self.to_string()),
            AppError::Forbidden => (StatusCode::FORBIDDEN, "forbidden", self.to_string()),
            AppError::Validation(ref msg) => {
                (StatusCode::UNPROCESSABLE_ENTITY, "validation_error", msg.clone())
            }
            AppError::BadRequest(ref msg) => {
                (StatusCode::BAD_REQUEST, "bad_request", msg.clone())
            }
            AppError::Internal(ref msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    "An internal error occurred".to_string(),
                )
            }
            AppError::Database(ref e) => {
                tracing::error!("Database error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "database_error",
                    "A database error occurred".to_string(),
                )
            }
            AppError::Unauthorized(ref msg) => {
                (StatusCode::UNAUTHORIZED, "unauthorized", msg.clone())
            }
            AppError::Conflict(ref msg) => (StatusCode::CONFLICT, "conflict", msg.clone()),
        };

        // 결과: { "error": { "code": "not_found", "message": "Resource not found" } }
        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}
