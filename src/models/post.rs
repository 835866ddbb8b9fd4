use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::services::forms;

/// 게시글 엔티티 — DB의 `posts` 테이블 한 행에 대응합니다.
///
/// `user_id`와 `created_at`은 생성 이후 바뀌지 않습니다.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Post {
    pub id: i64,
    pub title: String,
    pub content: String,
    /// RFC 3339 UTC 문자열 (예: "2024-06-01T12:00:00.000Z")
    pub created_at: String,
    pub user_id: i64,
}

/// 목록 화면용 게시글 요약. 작성자 이름을 JOIN으로 함께 가져옵니다.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct PostSummary {
    pub id: i64,
    pub title: String,
    pub created_at: String,
    pub user_id: i64,
    pub author: String,
}

/// `POST /users/{id}/posts/new`, `POST /posts/{id}/edit`의 폼 본문
///
/// 다중 선택된 태그는 `tags=1&tags=3`처럼 같은 키로 반복해서 들어옵니다.
#[derive(Debug, Deserialize)]
pub struct PostForm {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostInput {
    pub title: String,
    pub content: String,
    /// 중복이 제거된 태그 ID. 존재하지 않는 ID는 DB 계층에서 걸러집니다.
    pub tag_ids: Vec<i64>,
}

impl TryFrom<PostForm> for PostInput {
    type Error = AppError;

    fn try_from(form: PostForm) -> Result<Self, Self::Error> {
        Ok(Self {
            title: forms::required("title", &form.title)?,
            content: forms::required("content", &form.content)?,
            tag_ids: forms::coerce_ids(&form.tags),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tag_ids_are_coerced_and_deduplicated() {
        let input = PostInput::try_from(PostForm {
            title: "Hello".into(),
            content: "World".into(),
            tags: vec!["2".into(), "abc".into(), "2".into(), "1".into()],
        })
        .unwrap();

        assert_eq!(input.tag_ids, vec![1, 2]);
    }

    #[test]
    fn blank_title_is_rejected() {
        let result = PostInput::try_from(PostForm {
            title: " ".into(),
            content: "World".into(),
            tags: vec![],
        });
        assert!(matches!(result, Err(AppError::Validation(_))));
    }
}
