//! # 소유권 검사 (Ownership Guard)
//!
//! 수정/삭제 요청에서 "요청한 사용자가 리소스의 소유자인가"를 판단합니다.
//! 조회(GET)에는 적용하지 않습니다.

use crate::error::AppError;

/// 요청자 ID와 리소스에 기록된 소유자 ID를 비교합니다.
///
/// 같으면 `Ok(())`, 다르면 `AppError::Forbidden`(HTTP 403)을 반환합니다.
/// 핸들러에서는 저장소를 건드리기 전에 `check_ownership(..)?;`으로 호출하므로,
/// 거절된 요청은 아무것도 바꾸지 않습니다.
pub fn check_ownership(requester_id: &str, owner_id: &str) -> Result<(), AppError> {
    if requester_id == owner_id {
        Ok(())
    } else {
        tracing::warn!(requester_id, owner_id, "ownership check failed");
        Err(AppError::Forbidden)
    }
}
