//! # 라우트 핸들러 모듈
//!
//! HTTP 요청을 처리하는 핸들러 함수들을 모아둔 모듈입니다.
//! Axum에서 핸들러는 HTTP 요청을 받아 응답을 반환하는 async 함수입니다.
//!
//! 각 하위 모듈:
//! - `home`: 최근 게시글 5개를 보여주는 첫 페이지
//! - `users`: 사용자 CRUD 핸들러
//! - `posts`: 게시글 CRUD 핸들러 (사용자 하위에서 생성)
//! - `tags`: 태그 CRUD 핸들러
//! - `health`: 서버 상태 확인 (헬스체크)
//!
//! ## 응답 규칙
//! - GET 페이지: 템플릿이 소비할 뷰 모델을 JSON으로 반환합니다.
//!   직전 요청이 남긴 알림이 있으면 `notice` 필드에 담고 쿠키를 지웁니다.
//! - POST 폼 제출: 성공하면 알림 쿠키를 남기고 `303 See Other`로 리다이렉트합니다.

pub mod health;
pub mod home;
pub mod posts;
pub mod tags;
pub mod users;


pub use health::*;
pub use home::*;
pub use posts::*;
pub use tags::*;
pub use users::*;

use axum::{
    response::Redirect,
    routing::{get, post},
    Json, Router,
};
use axum_extra::extract::{CookieJar, Form, FormRejection};
use serde_json::{json, Value};
use sqlx::SqlitePool;
use tower_http::trace::TraceLayer;

use crate::{error::AppError, services::notice};

/// 애플리케이션 공유 상태
///
/// 모든 요청 핸들러가 `State(state): State<AppState>`로 접근합니다.
/// SqlitePool은 내부적으로 Arc를 사용하므로 clone해도 같은 풀을 가리킵니다.
#[derive(Clone)]
pub struct AppState {
    pub pool: SqlitePool,
}

/// GET 페이지 응답: 알림 쿠키 정리 + JSON 뷰 모델
pub type Page = (CookieJar, Json<Value>);

/// 폼 제출 성공 응답: 알림 쿠키 + 리다이렉트
pub type Submitted = (CookieJar, Redirect);

/// 폼 본문 추출 결과. 거부되더라도 핸들러가 먼저 대상의 존재를 확인할 수 있도록
/// 에러 대신 `Result` 그대로 받습니다.
pub type FormBody<T> = Result<Form<T>, FormRejection>;

/// 읽을 수 없는 폼 본문(잘못된 Content-Type 등)을 400 `validation_error`로 바꿉니다.
pub(crate) fn form_body<T>(body: FormBody<T>) -> Result<T, AppError> {
    body.map(|Form(form)| form)
        .map_err(|rejection| AppError::Validation(rejection.to_string()))
}

/// 뷰 모델에 남아 있던 알림을 붙여 페이지 응답을 만듭니다.
pub(crate) fn page(jar: CookieJar, mut view: Value) -> Page {
    let (jar, notice) = notice::take(jar);
    view["notice"] = json!(notice);
    (jar, Json(view))
}

/// 알림을 남기고 `to`로 리다이렉트합니다.
pub(crate) fn submitted(jar: CookieJar, message: String, to: &str) -> Submitted {
    (notice::flash(jar, message), Redirect::to(to))
}

/// 매칭되는 라우트가 없을 때의 404 응답
pub async fn not_found() -> AppError {
    AppError::NotFound
}

/// 전체 라우터를 구성합니다.
///
/// 경로의 `{id}`는 모두 정수 ID이며 `EntityId` 추출자로 받습니다.
/// `/users/new`처럼 고정 경로는 `/users/{id}`보다 먼저 매칭됩니다.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(home))
        .route("/health", get(health_check))
        // 사용자
        .route("/users", get(list_users))
        .route("/users/new", get(new_user_form).post(create_user))
        .route("/users/{id}", get(show_user))
        .route("/users/{id}/edit", get(edit_user_form).post(update_user))
        .route("/users/{id}/delete", post(delete_user))
        // 게시글 (생성은 사용자 하위 경로)
        .route("/users/{id}/posts/new", get(new_post_form).post(create_post))
        .route("/posts/{id}", get(show_post))
        .route("/posts/{id}/edit", get(edit_post_form).post(update_post))
        .route("/posts/{id}/delete", post(delete_post))
        // 태그
        .route("/tags", get(list_tags))
        .route("/tags/new", get(new_tag_form).post(create_tag))
        .route("/tags/{id}", get(show_tag))
        .route("/tags/{id}/edit", get(edit_tag_form).post(update_tag))
        .route("/tags/{id}/delete", post(delete_tag))
        .fallback(not_found)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
