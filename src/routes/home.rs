use crate::{db, error::AppError, routes::AppState};
use axum::extract::State;
use axum_extra::extract::CookieJar;
use serde_json::json;

use super::{page, Page};

/// 홈페이지에 보여줄 최근 게시글 수
pub const RECENT_POSTS_LIMIT: i64 = 5;

/// `GET /` — 가장 최근 게시글 5개 (작성자 이름 포함)
pub async fn home(State(state): State<AppState>, jar: CookieJar) -> Result<Page, AppError> {
    let posts = db::list_recent_posts(&state.pool, RECENT_POSTS_LIMIT).await?;
    Ok(page(jar, json!({ "posts": posts })))
}
