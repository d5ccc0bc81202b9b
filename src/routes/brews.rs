//! # 브루(Brew) 라우트 핸들러
//!
//! 브루의 CRUD(생성/조회/수정/삭제)를 처리하는 HTTP 핸들러 함수들입니다.
//! 모든 엔드포인트는 인증이 필요합니다.
//!
//! ## 엔드포인트
//! - `GET    /brews`      → 브루 목록 조회 (소유자 필터 없음)
//! - `POST   /brews`      → 새 브루 생성 (소유자는 호출자로 고정)
//! - `GET    /brews/:id`  → 단일 브루 조회
//! - `PATCH  /brews/:id`  → 브루 수정 (소유자만, 부분 업데이트)
//! - `DELETE /brews/:id`  → 브루 삭제 (소유자만)
//!
//! ## Axum 핸들러 패턴
//! - `State(state)`: 앱 전역 상태 (DB 풀, 설정 등)
//! - `auth_user: AuthUser`: Bearer 토큰에서 꺼낸 호출자. 토큰이 없으면 핸들러 전에 401
//! - `Path(id)`: URL 경로 파라미터
//! - `AppJson(body)`: 요청 본문. 본문 추출자는 항상 마지막 인자여야 합니다.

use crate::{
    db,
    error::AppError,
    middleware::{auth::AuthUser, json::AppJson},
    models::*,
    services::{check_ownership, strip_blank_fields},
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde_json::{json, Value};
use sqlx::SqlitePool;

/// 애플리케이션 공유 상태
///
/// 모든 요청 핸들러가 `State(state): State<AppState>`로 접근합니다.
/// 요청 사이에 공유되는 것은 DB 풀과 읽기 전용 설정뿐입니다.
#[derive(Clone)]
pub struct AppState {
    /// SQLite 연결 풀 (내부적으로 Arc로 공유)
    pub pool: SqlitePool,
    /// 토큰 서명/검증용 비밀키
    pub jwt_secret: String,
    /// 발급하는 토큰의 유효 시간(분)
    pub token_ttl_minutes: i64,
}

/// `GET /brews`: 전체 브루 목록을 조회합니다.
///
/// 응답: `{ "brews": [...] }`. 각 브루에는 댓글이 포함됩니다.
pub async fn list_brews(
    State(state): State<AppState>,
    _auth_user: AuthUser,
) -> Result<Json<Value>, AppError> {
    let brews = db::list_brews(&state.pool).await?;
    Ok(Json(json!({ "brews": brews })))
}

/// `GET /brews/:id`: 단일 브루를 조회합니다.
pub async fn get_brew(
    State(state): State<AppState>,
    _auth_user: AuthUser,
    Path(id): Path<String>,
) -> Result<Json<Value>, AppError> {
    let brew = db::get_brew(&state.pool, &id)
        .await?
        .ok_or(AppError::NotFound)?;
    Ok(Json(json!({ "brew": brew })))
}

/// `POST /brews`: 새 브루를 생성합니다.
///
/// 요청 본문: `{ "brew": { "name": "Pale Ale", "style": "IPA", ... } }`
///
/// 본문에 `owner`가 있어도 무시하고 인증된 호출자의 ID를 소유자로 씁니다.
/// 성공 시 201 Created와 `{ "brew": {...} }`를 반환합니다.
pub async fn create_brew(
    State(state): State<AppState>,
    auth_user: AuthUser,
    AppJson(payload): AppJson<BrewPayload<CreateBrewRequest>>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    let req = payload.brew;
    if req.name.trim().is_empty() {
        return Err(AppError::Validation("Brew name is required".to_string()));
    }

    let brew = db::create_brew(&state.pool, &auth_user.id, &req).await?;
    tracing::info!(brew_id = %brew.id, owner = %brew.owner, "created brew");

    Ok((StatusCode::CREATED, Json(json!({ "brew": brew }))))
}

/// `PATCH /brews/:id`: 브루를 수정합니다 (부분 업데이트).
///
/// ## 처리 흐름
/// 1. 브루를 불러오고 (없으면 404) 소유자인지 확인합니다 (아니면 403)
/// 2. 빈 문자열 필드와 `owner` 키를 제거합니다 (소유자는 생성 후 변경 불가)
/// 3. 남은 필드를 검사한 뒤 병합해 저장합니다 (그 사이 다른 저장이 있었으면 409)
///
/// 본문은 먼저 `Value`로 받습니다. 빈 필드를 걸러낸 다음에 타입으로 바꿔야 하기 때문입니다.
/// 성공 시 204 No Content.
pub async fn update_brew(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<String>,
    AppJson(body): AppJson<Value>,
) -> Result<StatusCode, AppError> {
    let mut brew = db::get_brew(&state.pool, &id)
        .await?
        .ok_or(AppError::NotFound)?;
    check_ownership(&auth_user.id, &brew.owner)?;

    let mut body = strip_blank_fields(body);
    if let Some(fields) = body.get_mut("brew").and_then(Value::as_object_mut) {
        fields.remove("owner");
    }
    let payload: BrewPayload<UpdateBrewRequest> = serde_json::from_value(body)
        .map_err(|e| AppError::Validation(format!("Invalid brew payload: {}", e)))?;
    let changes = payload.brew;
    if changes.name.as_deref().is_some_and(|name| name.trim().is_empty()) {
        return Err(AppError::Validation("Brew name cannot be blank".to_string()));
    }

    brew.apply_update(changes);
    db::save_brew(&state.pool, &brew).await?;
    tracing::debug!(brew_id = %id, "updated brew");

    Ok(StatusCode::NO_CONTENT)
}

/// `DELETE /brews/:id`: 브루를 삭제합니다.
///
/// 포함된 댓글도 함께 사라집니다. 소유자만 삭제할 수 있습니다.
pub async fn delete_brew(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    let brew = db::get_brew(&state.pool, &id)
        .await?
        .ok_or(AppError::NotFound)?;
    check_ownership(&auth_user.id, &brew.owner)?;

    let deleted = db::delete_brew(&state.pool, &id).await?;
    if !deleted {
        return Err(AppError::NotFound);
    }
    tracing::info!(brew_id = %id, "deleted brew");

    Ok(StatusCode::NO_CONTENT)
}
