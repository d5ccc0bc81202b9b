//! # JSON 본문 Extractor
//!
//! `axum::Json`은 본문을 읽지 못하면 일반 텍스트 응답을 돌려줍니다.
//! `AppJson`은 같은 일을 하되, 실패를 `AppError`로 바꿔
//! 다른 에러와 똑같은 `{ "error": { "code", "message" } }` 본문으로 응답합니다.
//!
//! | 실패 | 에러 |
//! |------|------|
//! | 필드 누락, 타입 불일치 | `Validation` (422) |
//! | 깨진 JSON, Content-Type 누락 등 | `BadRequest` (400) |

use axum::extract::{rejection::JsonRejection, FromRequest};

use crate::error::AppError;

/// 요청 본문용 JSON Extractor. 응답에는 그대로 `axum::Json`을 씁니다.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct AppJson<T>(pub T);

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        match rejection {
            JsonRejection::JsonDataError(e) => AppError::Validation(e.body_text()),
            other => AppError::BadRequest(other.body_text()),
        }
    }
}
