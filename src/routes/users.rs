//! # 사용자(User) 라우트 핸들러
//!
//! ## 엔드포인트
//! | 메서드 | 경로 | 핸들러 | 성공 시 |
//! |--------|------|--------|---------|
//! | GET | /users | `list_users` | 사용자 목록 |
//! | GET | /users/new | `new_user_form` | 생성 폼 |
//! | POST | /users/new | `create_user` | → /users |
//! | GET | /users/{id} | `show_user` | 사용자와 게시글 |
//! | GET | /users/{id}/edit | `edit_user_form` | 수정 폼 |
//! | POST | /users/{id}/edit | `update_user` | → /users |
//! | POST | /users/{id}/delete | `delete_user` | → /users (게시글 연쇄 삭제) |

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

/// `GET /users` — (성, 이름) 순으로 정렬된 전체 사용자
pub async fn list_users(State(state): State<AppState>, jar: CookieJar) -> Result<Page, AppError> {
    let users: Vec<UserResponse> = db::list_users(&state.pool)
        .await?
        .into_iter()
        .map(UserResponse::from)
        .collect();

    Ok(page(jar, json!({ "users": users })))
}

/// `GET /users/new`
pub async fn new_user_form(jar: CookieJar) -> Page {
    page(jar, json!({ "default_image_url": DEFAULT_IMAGE_URL }))
}

/// `POST /users/new` — 이름과 성은 필수, 이미지 URL이 비어 있으면 기본 이미지
pub async fn create_user(
    State(state): State<AppState>,
    jar: CookieJar,
    form: FormBody<UserForm>,
) -> Result<Submitted, AppError> {
    let input = form_body(form)?.into_new_user()?;
    let user = db::create_user(&state.pool, &input).await?;

    Ok(submitted(jar, format!("User {} added.", user.full_name()), "/users"))
}

/// `GET /users/{id}` — 사용자 정보와 작성한 게시글 (최신순)
pub async fn show_user(
    State(state): State<AppState>,
    EntityId(id): EntityId,
    jar: CookieJar,
) -> Result<Page, AppError> {
    let user = db::get_user(&state.pool, id)
        .await?
        .ok_or(AppError::NotFound)?;
    let posts = db::list_posts_for_user(&state.pool, id).await?;

    Ok(page(
        jar,
        json!({ "user": UserResponse::from(user), "posts": posts }),
    ))
}

/// `GET /users/{id}/edit`
pub async fn edit_user_form(
    State(state): State<AppState>,
    EntityId(id): EntityId,
    jar: CookieJar,
) -> Result<Page, AppError> {
    let user = db::get_user(&state.pool, id)
        .await?
        .ok_or(AppError::NotFound)?;

    Ok(page(jar, json!({ "user": UserResponse::from(user) })))
}

/// `POST /users/{id}/edit` — 세 필드를 모두 덮어씁니다 (부분 수정 없음).
pub async fn update_user(
    State(state): State<AppState>,
    EntityId(id): EntityId,
    jar: CookieJar,
    form: FormBody<UserForm>,
) -> Result<Submitted, AppError> {
    // 존재 확인이 입력 검증보다 먼저입니다: 없는 사용자는 항상 404
    db::get_user(&state.pool, id)
        .await?
        .ok_or(AppError::NotFound)?;

    let input = form_body(form)?.into_user_changes()?;
    let user = db::update_user(&state.pool, id, &input)
        .await?
        .ok_or(AppError::NotFound)?;

    Ok(submitted(
        jar,
        format!("User {} has been edited.", user.full_name()),
        "/users",
    ))
}

/// `POST /users/{id}/delete` — 사용자와 그 사용자의 게시글을 한 번에 삭제합니다.
pub async fn delete_user(
    State(state): State<AppState>,
    EntityId(id): EntityId,
    jar: CookieJar,
) -> Result<Submitted, AppError> {
    let user = db::get_user(&state.pool, id)
        .await?
        .ok_or(AppError::NotFound)?;

    if !db::delete_user(&state.pool, id).await? {
        return Err(AppError::NotFound);
    }

    Ok(submitted(jar, format!("User {} deleted.", user.full_name()), "/users"))
}
