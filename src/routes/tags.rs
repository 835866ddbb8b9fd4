//! # 태그 라우트 핸들러
//!
//! ## 엔드포인트 목록
//! | 메서드 | 경로 | 핸들러 | 설명 |
//! |--------|------|--------|------|
//! | GET | /tags | `list_tags` | 전체 태그 목록 |
//! | GET | /tags/new | `new_tag_form` | 생성 폼 (연결할 게시글 목록) |
//! | POST | /tags/new | `create_tag` | 새 태그 생성 |
//! | GET | /tags/{id} | `show_tag` | 태그와 연결된 게시글 |
//! | GET | /tags/{id}/edit | `edit_tag_form` | 수정 폼 |
//! | POST | /tags/{id}/edit | `update_tag` | 이름 수정 + 게시글 연결 교체 |
//! | POST | /tags/{id}/delete | `delete_tag` | 태그 삭제 (게시글은 유지) |

use crate::{
    db,
    error::AppError,
    middleware::EntityId,
    models::*,
    routes::{form_body, page, submitted, AppState, FormBody, Page, Submitted},
};
use axum::extract::State;
use axum_extra::extract::CookieJar;
use serde_json::json;

/// 전체 태그 목록을 조회합니다.
pub async fn list_tags(State(state): State<AppState>, jar: CookieJar) -> Result<Page, AppError> {
    let tags = db::list_tags(&state.pool).await?;
    Ok(page(jar, json!({ "tags": tags })))
}

/// 태그 생성 폼. 새 태그에 미리 연결할 수 있도록 전체 게시글을 내려줍니다.
pub async fn new_tag_form(State(state): State<AppState>, jar: CookieJar) -> Result<Page, AppError> {
    let posts = db::list_posts(&state.pool).await?;
    Ok(page(jar, json!({ "posts": posts })))
}

/// 새 태그를 생성합니다.
///
/// `name=tech&posts=1&posts=2` 형태의 폼 본문을 파싱합니다.
/// 이름이 비어 있으면 400, 존재하지 않는 게시글 ID는 무시됩니다.
pub async fn create_tag(
    State(state): State<AppState>,
    jar: CookieJar,
    form: FormBody<TagForm>,
) -> Result<Submitted, AppError> {
    let input = TagInput::try_from(form_body(form)?)?;
    let tag = db::create_tag(&state.pool, &input).await?;

    Ok(submitted(jar, format!("Tag {} has been added.", tag.name), "/tags"))
}

pub async fn show_tag(
    State(state): State<AppState>,
    EntityId(id): EntityId,
    jar: CookieJar,
) -> Result<Page, AppError> {
    let tag = db::get_tag(&state.pool, id)
        .await?
        .ok_or(AppError::NotFound)?;
    let posts = db::list_posts_for_tag(&state.pool, id).await?;

    Ok(page(jar, json!({ "tag": tag, "posts": posts })))
}

pub async fn edit_tag_form(
    State(state): State<AppState>,
    EntityId(id): EntityId,
    jar: CookieJar,
) -> Result<Page, AppError> {
    let tag = db::get_tag(&state.pool, id)
        .await?
        .ok_or(AppError::NotFound)?;
    let posts = db::list_posts(&state.pool).await?;
    let selected_post_ids: Vec<i64> = db::list_posts_for_tag(&state.pool, id)
        .await?
        .into_iter()
        .map(|post| post.id)
        .collect();

    Ok(page(
        jar,
        json!({ "tag": tag, "posts": posts, "selected_post_ids": selected_post_ids }),
    ))
}

/// 태그 이름을 덮어쓰고, 연결된 게시글을 요청된 목록으로 교체합니다.
pub async fn update_tag(
    State(state): State<AppState>,
    EntityId(id): EntityId,
    jar: CookieJar,
    form: FormBody<TagForm>,
) -> Result<Submitted, AppError> {
    db::get_tag(&state.pool, id)
        .await?
        .ok_or(AppError::NotFound)?;

    let input = TagInput::try_from(form_body(form)?)?;
    let tag = db::update_tag(&state.pool, id, &input)
        .await?
        // None(태그 없음)이면 NotFound 에러 → HTTP 404 응답
        .ok_or(AppError::NotFound)?;

    Ok(submitted(jar, format!("Tag {} has been updated.", tag.name), "/tags"))
}

/// 태그를 삭제합니다. 연결된 게시글은 그대로 남습니다.
pub async fn delete_tag(
    State(state): State<AppState>,
    EntityId(id): EntityId,
    jar: CookieJar,
) -> Result<Submitted, AppError> {
    let tag = db::get_tag(&state.pool, id)
        .await?
        .ok_or(AppError::NotFound)?;

    if !db::delete_tag(&state.pool, id).await? {
        return Err(AppError::NotFound);
    }

    Ok(submitted(jar, format!("Tag {} has been deleted.", tag.name), "/tags"))
}
