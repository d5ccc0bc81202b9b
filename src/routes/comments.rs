//! # 댓글(Comment) 라우트 핸들러
//!
//! 댓글은 브루 안에 포함되어 있으므로, 모든 변경은
//! "부모 브루를 불러오기 → 댓글 목록 고치기 → 브루 통째로 저장" 순서로 이루어집니다.
//! 저장은 버전 검사를 거치므로 같은 브루에 대한 동시 변경은 한쪽이 409를 받습니다.
//!
//! ## 엔드포인트
//! | 메서드 | 경로 | 인증 | 설명 |
//! |--------|------|------|------|
//! | GET | /comments | 없음 | 모든 브루의 댓글을 펼친 목록 |
//! | GET | /comments/:id | 없음 | 댓글 ID로 조회 (전체 브루 검색) |
//! | POST | /comments/:brew_id | 필요 | 브루에 댓글 추가 |
//! | PATCH | /comments/:id | 필요 | 댓글 수정, 본문에 `brewId` 필요 |
//! | DELETE | /comments/:id | 필요 | 댓글 삭제, 본문에 `brewId` 필요 |

use crate::{
    db,
    error::AppError,
    middleware::{auth::AuthUser, json::AppJson},
    models::*,
    routes::brews::AppState,
    services::{check_ownership, strip_blank_fields},
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde_json::{json, Value};

/// `GET /comments` → `{ "comments": [...] }`
///
/// 브루 순서대로, 각 브루 안에서는 작성 순서대로 펼칩니다. 페이지네이션은 없습니다.
pub async fn list_comments(
    State(state): State<AppState>,
) -> Result<Json<Value>, AppError> {
    let comments = db::list_comments(&state.pool).await?;
    Ok(Json(json!({ "comments": comments })))
}

/// `GET /comments/:id` → `{ "comment": {...} }`
///
/// `:id`는 댓글 ID입니다. 어느 브루에 속했는지 모르므로 모든 브루를 검색합니다.
pub async fn get_comment(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, AppError> {
    let comment = db::find_comment(&state.pool, &id)
        .await?
        .ok_or(AppError::NotFound)?;
    Ok(Json(json!({ "comment": comment })))
}

/// `POST /comments/:brew_id` + `{ "comment": { "text": "..." } }` → `201 Created`
///
/// 작성자는 본문과 상관없이 `{호출자 ID, 호출자 이메일}`로 기록됩니다.
/// 응답에는 방금 만든 댓글 하나만 담깁니다.
pub async fn create_comment(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(brew_id): Path<String>,
    AppJson(payload): AppJson<CommentPayload<CreateCommentRequest>>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    let mut brew = db::get_brew(&state.pool, &brew_id)
        .await?
        .ok_or(AppError::NotFound)?;

    let text = payload.comment.text;
    if text.trim().is_empty() {
        return Err(AppError::Validation("Comment text is required".to_string()));
    }

    let comment = Comment::new(text, auth_user.as_comment_owner());
    let comment_id = comment.id.clone();
    brew.push_comment(comment);

    let saved = db::save_brew(&state.pool, &brew).await?;
    // 마지막 원소가 아니라 ID로 찾습니다. 저장된 애그리거트 기준의 값을 돌려주기 위해서입니다.
    let created = saved
        .comment(&comment_id)
        .cloned()
        .ok_or(AppError::Internal("Saved brew is missing the new comment".to_string()))?;
    tracing::info!(brew_id = %brew_id, comment_id = %comment_id, "created comment");

    Ok((StatusCode::CREATED, Json(json!({ "comment": created }))))
}

/// `PATCH /comments/:id` + `{ "brewId": "...", "comment": { "text": "..." } }` → `204`
///
/// 빈 문자열 필드는 먼저 제거되므로 `"text": ""`는 "변경 없음"으로 처리됩니다.
/// 댓글 작성자만 수정할 수 있습니다.
pub async fn update_comment(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<String>,
    AppJson(body): AppJson<Value>,
) -> Result<StatusCode, AppError> {
    // brewId가 본문에 있으므로 본문을 먼저 읽어야 부모 브루를 찾을 수 있습니다.
    let req: UpdateCommentRequest = serde_json::from_value(strip_blank_fields(body))
        .map_err(|e| AppError::Validation(format!("Invalid comment payload: {}", e)))?;

    let mut brew = db::get_brew(&state.pool, &req.brew_id)
        .await?
        .ok_or(AppError::NotFound)?;
    let comment = brew.comment_mut(&id).ok_or(AppError::NotFound)?;
    check_ownership(&auth_user.id, &comment.owner.id)?;

    if let Some(text) = req.comment.unwrap_or_default().text {
        if text.trim().is_empty() {
            return Err(AppError::Validation("Comment text cannot be blank".to_string()));
        }
        comment.edit(text);
    }

    db::save_brew(&state.pool, &brew).await?;
    tracing::debug!(brew_id = %req.brew_id, comment_id = %id, "updated comment");

    Ok(StatusCode::NO_CONTENT)
}

/// `DELETE /comments/:id` + `{ "brewId": "..." }` → `204`
pub async fn delete_comment(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<String>,
    AppJson(req): AppJson<DeleteCommentRequest>,
) -> Result<StatusCode, AppError> {
    let mut brew = db::get_brew(&state.pool, &req.brew_id)
        .await?
        .ok_or(AppError::NotFound)?;
    let comment = brew.comment(&id).ok_or(AppError::NotFound)?;
    check_ownership(&auth_user.id, &comment.owner.id)?;

    brew.remove_comment(&id);
    db::save_brew(&state.pool, &brew).await?;
    tracing::info!(brew_id = %req.brew_id, comment_id = %id, "deleted comment");

    Ok(StatusCode::NO_CONTENT)
}
