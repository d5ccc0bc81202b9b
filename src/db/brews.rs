//! # 브루 애그리거트 저장소
//!
//! `brews` 테이블에 대한 쿼리 함수들입니다. 한 행이 브루 하나와 그 안의 댓글 전체를
//! 담고 있으며, 행 단위 저장이 곧 애그리거트 단위 저장입니다.
//!
//! ## 낙관적 동시성 제어
//! 댓글 추가/수정/삭제와 브루 수정은 모두 "읽고 → 고치고 → 저장"합니다.
//! 두 요청이 같은 브루를 동시에 고치면 나중에 저장한 쪽이 먼저 저장한 쪽의 변경을
//! 덮어쓸 수 있으므로(lost update), `save_brew`는 읽었을 때의 `version`이
//! 여전히 DB의 값과 같을 때만 저장합니다. 다르면 `AppError::Conflict`(409)입니다.

use crate::error::AppError;
use crate::models::*;
use serde_json::Value;
// sqlx::types::Json: Rust 값을 JSON 텍스트 컬럼으로 읽고 쓰는 래퍼
use sqlx::{types::Json, SqlitePool};

/// `brews` 테이블의 한 행.
///
/// JSON 컬럼을 `Json<T>`로 받아 두었다가 `Brew`로 바꿉니다.
/// 컬럼 이름이 JSON 필드 이름과 다른 것(`primary_fermentation` 등)도 여기서 맞춥니다.
#[derive(sqlx::FromRow)]
struct BrewRow {
    id: String,
    name: String,
    style: String,
    owner: String,
    date_started: Option<String>,
    boil_time: Option<String>,
    primary_fermentation: Option<String>,
    secondary_fermentation: Option<String>,
    tasting_notes: Option<String>,
    steep: Json<Vec<Value>>,
    boil: Json<Vec<Value>>,
    post_boil: Json<Vec<Value>>,
    comments: Json<Vec<Comment>>,
    version: i64,
    created_at: String,
    updated_at: String,
}

impl From<BrewRow> for Brew {
    fn from(row: BrewRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            style: row.style,
            owner: row.owner,
            date_started: row.date_started,
            boil_time: row.boil_time,
            primary: row.primary_fermentation,
            secondary: row.secondary_fermentation,
            tasting_notes: row.tasting_notes,
            // .0: Json 래퍼 안의 실제 값을 꺼냅니다.
            steep: row.steep.0,
            boil: row.boil.0,
            post_boil: row.post_boil.0,
            comments: row.comments.0,
            version: row.version,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

const SELECT_BREW: &str = r#"
    SELECT id, name, style, owner, date_started, boil_time,
           primary_fermentation, secondary_fermentation, tasting_notes,
           steep, boil, post_boil, comments, version, created_at, updated_at
    FROM brews
"#;

/// 모든 브루를 생성 순서대로 조회합니다. 댓글도 함께 채워집니다.
pub async fn list_brews(pool: &SqlitePool) -> Result<Vec<Brew>, AppError> {
    let rows = sqlx::query_as::<_, BrewRow>(&format!("{SELECT_BREW} ORDER BY rowid"))
        .fetch_all(pool)
        .await?;

    // .map(Brew::from): 각 행을 Brew로 변환
    Ok(rows.into_iter().map(Brew::from).collect())
}

/// ID로 브루 하나를 조회합니다.
///
/// # 반환값
/// - `Ok(Some(Brew))`: 찾은 경우
/// - `Ok(None)`: 없는 ID이거나 형식이 맞지 않는 ID (핸들러에서 404로 변환)
pub async fn get_brew(pool: &SqlitePool, id: &str) -> Result<Option<Brew>, AppError> {
    let row = sqlx::query_as::<_, BrewRow>(&format!("{SELECT_BREW} WHERE id = ?"))
        .bind(id)
        .fetch_optional(pool)
        .await?;

    Ok(row.map(Brew::from))
}

/// 새 브루를 저장하고 저장된 브루를 반환합니다.
///
/// `owner`는 요청 본문이 아니라 인증된 호출자에게서 받습니다.
/// 필수 필드 검사는 핸들러가 먼저 합니다.
pub async fn create_brew(
    pool: &SqlitePool,
    owner: &str,
    req: &CreateBrewRequest,
) -> Result<Brew, AppError> {
    let id = uuid::Uuid::now_v7().to_string();
    let now = timestamp_now();

    sqlx::query(
        r#"
        INSERT INTO brews (id, name, style, owner, date_started, boil_time,
                           primary_fermentation, secondary_fermentation, tasting_notes,
                           steep, boil, post_boil, comments, version, created_at, updated_at)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, '[]', 0, ?, ?)
        "#,
    )
    .bind(&id)
    .bind(&req.name)
    .bind(&req.style)
    .bind(owner)
    .bind(&req.date_started)
    .bind(&req.boil_time)
    .bind(&req.primary)
    .bind(&req.secondary)
    .bind(&req.tasting_notes)
    .bind(Json(&req.steep))
    .bind(Json(&req.boil))
    .bind(Json(&req.post_boil))
    .bind(&now)
    .bind(&now)
    .execute(pool)
    .await?;

    get_brew(pool, &id)
        .await?
        .ok_or(AppError::Internal("Failed to retrieve created brew".to_string()))
}

/// 애그리거트 전체(댓글 포함)를 한 번의 UPDATE로 저장합니다.
///
/// `brew.version`은 불러왔을 때의 버전이어야 합니다. 저장에 성공하면 버전이 1 오르고
/// `updated_at`이 갱신된 최신 브루를 반환합니다.
///
/// # 에러
/// - `AppError::Conflict`: 그 사이 다른 요청이 먼저 저장함 (아무것도 쓰지 않음)
/// - `AppError::NotFound`: 그 사이 브루가 삭제됨
pub async fn save_brew(pool: &SqlitePool, brew: &Brew) -> Result<Brew, AppError> {
    let now = timestamp_now();

    let result = sqlx::query(
        r#"
        UPDATE brews
        SET name = ?, style = ?, date_started = ?, boil_time = ?,
            primary_fermentation = ?, secondary_fermentation = ?, tasting_notes = ?,
            steep = ?, boil = ?, post_boil = ?, comments = ?,
            version = version + 1, updated_at = ?
        WHERE id = ? AND version = ?
        "#,
        // ↑ owner와 created_at은 SET에 없으므로 절대 바뀌지 않습니다.
    )
    .bind(&brew.name)
    .bind(&brew.style)
    .bind(&brew.date_started)
    .bind(&brew.boil_time)
    .bind(&brew.primary)
    .bind(&brew.secondary)
    .bind(&brew.tasting_notes)
    .bind(Json(&brew.steep))
    .bind(Json(&brew.boil))
    .bind(Json(&brew.post_boil))
    .bind(Json(&brew.comments))
    .bind(&now)
    .bind(&brew.id)
    .bind(brew.version)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        // 0행이면 "없어졌거나" "버전이 바뀌었거나" 둘 중 하나입니다.
        return match get_brew(pool, &brew.id).await? {
            Some(current) => {
                tracing::warn!(
                    brew_id = %brew.id,
                    expected = brew.version,
                    actual = current.version,
                    "rejected stale brew save"
                );
                Err(AppError::Conflict(
                    "Brew was modified by another request, reload and retry".to_string(),
                ))
            }
            None => Err(AppError::NotFound),
        };
    }

    get_brew(pool, &brew.id).await?.ok_or(AppError::NotFound)
}

/// 브루를 영구 삭제합니다. 포함된 댓글도 함께 사라집니다.
///
/// # 반환값
/// - `Ok(true)`: 삭제됨
/// - `Ok(false)`: 해당 ID의 브루가 없음
pub async fn delete_brew(pool: &SqlitePool, id: &str) -> Result<bool, AppError> {
    let result = sqlx::query("DELETE FROM brews WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}

/// 모든 브루의 댓글을 하나의 목록으로 펼칩니다 (브루 순서 → 댓글 순서).
///
/// 댓글이 브루 안에 포함되어 있으므로 모든 브루를 읽어야 합니다.
pub async fn list_comments(pool: &SqlitePool) -> Result<Vec<Comment>, AppError> {
    let brews = list_brews(pool).await?;
    Ok(brews.into_iter().flat_map(|brew| brew.comments).collect())
}

/// 댓글 ID로 댓글을 찾습니다. 어느 브루에 속했는지 모르므로 전체를 훑습니다.
pub async fn find_comment(
    pool: &SqlitePool,
    comment_id: &str,
) -> Result<Option<Comment>, AppError> {
    let brews = list_brews(pool).await?;
    Ok(brews
        .into_iter()
        .flat_map(|brew| brew.comments)
        .find(|comment| comment.id == comment_id))
}
