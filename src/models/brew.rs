//! # 브루(Brew) 모델 정의
//!
//! 브루는 이 애플리케이션의 **애그리거트 루트(aggregate root)**입니다.
//! 레시피 정보와 단계(steep/boil/postBoil) 목록, 그리고 댓글 목록을
//! 하나의 단위로 묶어 저장하고 불러옵니다.
//!
//! 댓글은 독립된 테이블이 아니라 브루 안에 포함(embedded)되어 있으므로,
//! 댓글을 추가/수정/삭제하는 모든 작업은 "브루를 불러와서 고친 뒤 통째로 저장"하는
//! 흐름을 따릅니다. 이 모듈의 메서드들이 그 "고치는" 부분을 담당합니다.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::comment::Comment;

/// 브루 엔티티: DB의 `brews` 테이블 한 행에 대응합니다.
///
/// `#[serde(rename_all = "camelCase")]`: JSON에서는 `postBoil`, `tastingNotes`처럼
/// camelCase 이름을 사용합니다. Rust 필드는 snake_case 그대로 둡니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Brew {
    /// 브루 고유 식별자 (UUIDv7)
    pub id: String,
    pub name: String,
    pub style: String,
    /// 생성한 사용자의 ID. 생성 시 한 번만 설정되며 이후 변경할 수 없습니다.
    pub owner: String,
    pub date_started: Option<String>,
    pub boil_time: Option<String>,
    /// 1차 발효 정보
    pub primary: Option<String>,
    /// 2차 발효 정보
    pub secondary: Option<String>,
    pub tasting_notes: Option<String>,
    /// 단계 레코드는 형식이 자유로우므로 `serde_json::Value` 그대로 보관합니다.
    pub steep: Vec<Value>,
    pub boil: Vec<Value>,
    pub post_boil: Vec<Value>,
    /// 포함된 댓글 목록 (작성 순서 유지)
    pub comments: Vec<Comment>,
    /// 낙관적 동시성 제어용 버전. 저장에 성공할 때마다 1씩 증가합니다.
    pub version: i64,
    pub created_at: String,
    pub updated_at: String,
}

impl Brew {
    /// 부분 업데이트(PATCH)를 적용합니다.
    ///
    /// `None`인 필드는 건드리지 않습니다. `owner`는 요청 구조체에 필드 자체가 없으므로
    /// 어떤 경로로도 바뀌지 않습니다.
    pub fn apply_update(&mut self, req: UpdateBrewRequest) {
        if let Some(name) = req.name {
            self.name = name;
        }
        if let Some(style) = req.style {
            self.style = style;
        }
        if let Some(date_started) = req.date_started {
            self.date_started = Some(date_started);
        }
        if let Some(boil_time) = req.boil_time {
            self.boil_time = Some(boil_time);
        }
        if let Some(primary) = req.primary {
            self.primary = Some(primary);
        }
        if let Some(secondary) = req.secondary {
            self.secondary = Some(secondary);
        }
        if let Some(tasting_notes) = req.tasting_notes {
            self.tasting_notes = Some(tasting_notes);
        }
        if let Some(steep) = req.steep {
            self.steep = steep;
        }
        if let Some(boil) = req.boil {
            self.boil = boil;
        }
        if let Some(post_boil) = req.post_boil {
            self.post_boil = post_boil;
        }
    }

    /// 댓글을 목록 맨 뒤에 추가합니다.
    pub fn push_comment(&mut self, comment: Comment) {
        self.comments.push(comment);
    }

    /// 이 브루 안에서 ID로 댓글을 찾습니다.
    /// 댓글 ID는 브루 하나 안에서만 고유합니다.
    pub fn comment(&self, comment_id: &str) -> Option<&Comment> {
        self.comments.iter().find(|c| c.id == comment_id)
    }

    pub fn comment_mut(&mut self, comment_id: &str) -> Option<&mut Comment> {
        self.comments.iter_mut().find(|c| c.id == comment_id)
    }

    /// 댓글을 목록에서 제거하고 제거된 댓글을 돌려줍니다.
    /// 해당 ID가 없으면 `None`.
    pub fn remove_comment(&mut self, comment_id: &str) -> Option<Comment> {
        let index = self.comments.iter().position(|c| c.id == comment_id)?;
        Some(self.comments.remove(index))
    }
}

/// 요청 본문의 `{ "brew": { ... } }` 래퍼
#[derive(Debug, Deserialize)]
pub struct BrewPayload<T> {
    pub brew: T,
}

/// 브루 생성 요청: `POST /brews`
///
/// `owner` 필드가 없다는 점이 중요합니다. 클라이언트가 `owner`를 보내도
/// serde가 모르는 필드로 무시하고, 서버가 인증된 사용자 ID로 채웁니다.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBrewRequest {
    #[serde(default)]
    pub name: String,
    pub style: String,
    pub date_started: Option<String>,
    pub boil_time: Option<String>,
    pub primary: Option<String>,
    pub secondary: Option<String>,
    pub tasting_notes: Option<String>,
    #[serde(default)]
    pub steep: Vec<Value>,
    #[serde(default)]
    pub boil: Vec<Value>,
    #[serde(default)]
    pub post_boil: Vec<Value>,
}

/// 브루 수정 요청: `PATCH /brews/:id`
///
/// 모든 필드가 Option입니다. 빠진 필드는 기존 값을 유지합니다.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateBrewRequest {
    pub name: Option<String>,
    pub style: Option<String>,
    pub date_started: Option<String>,
    pub boil_time: Option<String>,
    pub primary: Option<String>,
    pub secondary: Option<String>,
    pub tasting_notes: Option<String>,
    pub steep: Option<Vec<Value>>,
    pub boil: Option<Vec<Value>>,
    pub post_boil: Option<Vec<Value>>,
}
