//! # 데이터 모델 모듈
//!
//! 애플리케이션에서 사용하는 데이터 구조체(struct)들을 정의합니다.
//! 각 하위 모듈은 특정 도메인의 데이터 타입을 담당합니다:
//! - `brew`: 브루 애그리거트와 생성/수정 요청
//! - `comment`: 브루 안에 포함되는 댓글
//! - `user`: 사용자(User) 관련 구조체
//!
//! `pub use X::*;`로 하위 모듈 항목을 재공개하므로
//! `crate::models::brew::Brew` 대신 `crate::models::Brew`로 접근할 수 있습니다.

pub mod brew;
pub mod comment;
pub mod user;

pub use brew::*;
pub use comment::*;
pub use user::*;

use chrono::Utc;

/// 현재 UTC 시각을 `2026-01-01T12:00:00.000Z` 형식의 문자열로 반환합니다.
///
/// 브루와 댓글의 `createdAt`/`updatedAt`은 모두 이 형식을 씁니다.
/// 댓글은 JSON 컬럼 안에 저장되어 SQL 기본값을 쓸 수 없으므로 Rust에서 시각을 만듭니다.
pub fn timestamp_now() -> String {
    Utc::now().format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string()
}
