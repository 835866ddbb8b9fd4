//! # 데이터 모델 모듈
//!
//! 애플리케이션에서 사용하는 데이터 구조체(struct)들을 정의합니다.
//! - `user`: 사용자(User)와 사용자 폼
//! - `post`: 게시글(Post)과 게시글 폼
//! - `tag`: 태그(Tag)와 태그 폼
//!
//! 각 엔티티는 세 가지 형태로 나뉩니다:
//! - DB 행에 대응하는 구조체 (`sqlx::FromRow`)
//! - HTML 폼 본문을 그대로 받는 `*Form` 구조체 (검증 전)
//! - 검증과 변환을 마친 `*Input` 구조체 (DB 계층으로 전달)

pub mod post;
pub mod tag;
pub mod user;

pub use post::*;
pub use tag::*;
pub use user::*;
