//! # 댓글(Comment) 모델 정의
//!
//! 댓글은 항상 어떤 브루 안에 포함되어 존재합니다.
//! 독립적으로 저장되지 않으므로 DB 테이블도 따로 없습니다.
//!
//! ## 구조체 역할
//! - `Comment`: 브루의 `comments` 배열 한 칸
//! - `CommentOwner`: 작성 시점의 작성자 `{id, email}` 스냅샷
//! - `CommentPayload`: 요청 본문의 `{ "comment": { ... } }` 래퍼
//! - `UpdateCommentRequest` / `DeleteCommentRequest`: 부모 브루 ID(`brewId`)를 본문으로 받는 요청

use serde::{Deserialize, Serialize};

use super::timestamp_now;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    /// 댓글 식별자 (UUIDv7). 부모 브루 안에서만 고유하면 됩니다.
    pub id: String,
    pub text: String,
    /// 작성자 스냅샷: 생성 이후 바뀌지 않습니다.
    pub owner: CommentOwner,
    pub created_at: String,
    pub updated_at: String,
}

impl Comment {
    /// 새 댓글을 만듭니다. ID와 생성/수정 시각이 함께 채워집니다.
    pub fn new(text: String, owner: CommentOwner) -> Self {
        let now = timestamp_now();
        Self {
            id: uuid::Uuid::now_v7().to_string(),
            text,
            owner,
            created_at: now.clone(),
            updated_at: now,
        }
    }

    /// 본문을 바꾸고 수정 시각을 갱신합니다.
    pub fn edit(&mut self, text: String) {
        self.text = text;
        self.updated_at = timestamp_now();
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommentOwner {
    pub id: String,
    pub email: String,
}

#[derive(Debug, Deserialize)]
pub struct CommentPayload<T> {
    pub comment: T,
}

/// 댓글 생성 요청: `POST /comments/:brew_id`
#[derive(Debug, Deserialize)]
pub struct CreateCommentRequest {
    #[serde(default)]
    pub text: String,
}

/// 댓글 수정 요청: `PATCH /comments/:id`
///
/// `brewId`로 부모 브루를 지정해야 합니다.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCommentRequest {
    pub brew_id: String,
    #[serde(default)]
    pub comment: Option<CommentChanges>,
}

#[derive(Debug, Default, Deserialize)]
pub struct CommentChanges {
    pub text: Option<String>,
}

/// 댓글 삭제 요청: `DELETE /comments/:id`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteCommentRequest {
    pub brew_id: String,
}
