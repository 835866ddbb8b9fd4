//! # 게시글(Post) 라우트 핸들러
//!
//! 게시글은 항상 기존 사용자 하위에서 만들어지고, 작성자는 이후 바뀌지 않습니다.
//!
//! ## 엔드포인트
//! - `GET    /users/{id}/posts/new` → 생성 폼 (선택 가능한 전체 태그 포함)
//! - `POST   /users/{id}/posts/new` → 생성 후 `/users/{id}`로 이동
//! - `GET    /posts/{id}`           → 게시글, 작성자, 태그
//! - `GET    /posts/{id}/edit`      → 수정 폼
//! - `POST   /posts/{id}/edit`      → 수정 후 작성자 페이지로 이동
//! - `POST   /posts/{id}/delete`    → 삭제 후 작성자 페이지로 이동
//!
//! 폼의 `tags` 필드는 `tags=1&tags=2`처럼 반복 키로 들어오며,
//! 존재하지 않는 태그 ID는 에러 없이 무시됩니다.

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

/// `GET /users/{id}/posts/new` — 사용자가 없으면 404
pub async fn new_post_form(
    State(state): State<AppState>,
    EntityId(user_id): EntityId,
    jar: CookieJar,
) -> Result<Page, AppError> {
    let user = db::get_user(&state.pool, user_id)
        .await?
        .ok_or(AppError::NotFound)?;
    let tags = db::list_tags(&state.pool).await?;

    Ok(page(
        jar,
        json!({ "user": UserResponse::from(user), "tags": tags }),
    ))
}

/// `POST /users/{id}/posts/new`
pub async fn create_post(
    State(state): State<AppState>,
    EntityId(user_id): EntityId,
    jar: CookieJar,
    form: FormBody<PostForm>,
) -> Result<Submitted, AppError> {
    db::get_user(&state.pool, user_id)
        .await?
        .ok_or(AppError::NotFound)?;

    let input = PostInput::try_from(form_body(form)?)?;
    // 존재 확인과 삽입 사이에 사용자가 삭제되면 None → 404
    let post = db::create_post(&state.pool, user_id, &input)
        .await?
        .ok_or(AppError::NotFound)?;

    Ok(submitted(
        jar,
        format!("Post '{}' has been added.", post.title),
        &format!("/users/{user_id}"),
    ))
}

/// `GET /posts/{id}` — 게시글과 작성자, 연결된 태그
pub async fn show_post(
    State(state): State<AppState>,
    EntityId(id): EntityId,
    jar: CookieJar,
) -> Result<Page, AppError> {
    let post = db::get_post(&state.pool, id)
        .await?
        .ok_or(AppError::NotFound)?;

    // 게시글은 항상 작성자를 가지므로, 없으면 데이터 불일치입니다.
    let user = db::get_user(&state.pool, post.user_id)
        .await?
        .ok_or_else(|| AppError::Internal(format!("Post {id} has no owner")))?;
    let tags = db::list_tags_for_post(&state.pool, id).await?;

    Ok(page(
        jar,
        json!({ "post": post, "user": UserResponse::from(user), "tags": tags }),
    ))
}

/// `GET /posts/{id}/edit` — 전체 태그 목록과 현재 선택된 태그 ID
pub async fn edit_post_form(
    State(state): State<AppState>,
    EntityId(id): EntityId,
    jar: CookieJar,
) -> Result<Page, AppError> {
    let post = db::get_post(&state.pool, id)
        .await?
        .ok_or(AppError::NotFound)?;
    let tags = db::list_tags(&state.pool).await?;
    let selected_tag_ids: Vec<i64> = db::list_tags_for_post(&state.pool, id)
        .await?
        .into_iter()
        .map(|tag| tag.id)
        .collect();

    Ok(page(
        jar,
        json!({ "post": post, "tags": tags, "selected_tag_ids": selected_tag_ids }),
    ))
}

/// `POST /posts/{id}/edit` — 제목/내용을 덮어쓰고 태그 목록을 통째로 교체합니다.
pub async fn update_post(
    State(state): State<AppState>,
    EntityId(id): EntityId,
    jar: CookieJar,
    form: FormBody<PostForm>,
) -> Result<Submitted, AppError> {
    db::get_post(&state.pool, id)
        .await?
        .ok_or(AppError::NotFound)?;

    let input = PostInput::try_from(form_body(form)?)?;
    let post = db::update_post(&state.pool, id, &input)
        .await?
        .ok_or(AppError::NotFound)?;

    Ok(submitted(
        jar,
        format!("Post '{}' edited.", post.title),
        &format!("/users/{}", post.user_id),
    ))
}

/// `POST /posts/{id}/delete` — 리다이렉트 대상은 삭제 전에 읽어 둔 작성자 ID
pub async fn delete_post(
    State(state): State<AppState>,
    EntityId(id): EntityId,
    jar: CookieJar,
) -> Result<Submitted, AppError> {
    let post = db::get_post(&state.pool, id)
        .await?
        .ok_or(AppError::NotFound)?;

    if !db::delete_post(&state.pool, id).await? {
        return Err(AppError::NotFound);
    }

    Ok(submitted(
        jar,
        format!("Post '{}' deleted.", post.title),
        &format!("/users/{}", post.user_id),
    ))
}
