//! # 서비스 모듈
//!
//! 라우트 핸들러가 공통으로 쓰는 순수 로직을 모아 둡니다.
//! - `ownership`: 소유자만 수정/삭제할 수 있도록 검사
//! - `sanitize`: 수정 요청에서 빈 문자열 필드 제거

pub mod ownership;
pub mod sanitize;

pub use ownership::check_ownership;
pub use sanitize::strip_blank_fields;
