//! # 미들웨어 모듈
//!
//! - `auth`: Bearer 토큰을 검증해 `AuthUser`를 꺼내는 Extractor와 토큰 발급 함수
//! - `json`: 본문 파싱 실패도 `AppError` JSON으로 응답하는 `AppJson` Extractor

pub mod auth;
pub mod json;
