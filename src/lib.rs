//! # brewlog
//!
//! 홈브루잉 기록 애플리케이션의 REST 백엔드입니다.
//! 사용자는 브루(레시피와 침출/끓임 단계)를 기록하고, 브루에 댓글을 남깁니다.
//!
//! ## 구성
//! - [`config`]: 환경변수 기반 설정
//! - [`db`]: SQLite 저장소 (브루 애그리거트, 사용자)
//! - [`error`]: `AppError`와 HTTP 에러 응답 변환
//! - [`middleware`]: Bearer 토큰 인증, JSON 본문 Extractor
//! - [`models`]: 브루/댓글/사용자 데이터 구조체
//! - [`routes`]: HTTP 핸들러와 라우터 조립
//! - [`services`]: 소유권 검사, 빈 필드 제거
//!
//! 바이너리(`main.rs`)는 설정을 읽고 [`routes::router`]로 만든 라우터를 띄우기만 합니다.

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
