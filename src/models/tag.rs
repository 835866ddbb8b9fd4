//! # 태그 모델 정의
//!
//! 태그는 게시글을 분류하는 라벨입니다. 게시글과 다대다(N:M) 관계를 가지며,
//! 관계는 `posts_tags` 중간 테이블에 저장됩니다.

use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::services::forms;

/// 태그 엔티티 — DB의 `tags` 테이블 한 행(row)에 대응합니다.
///
/// 이름 중복은 허용됩니다. 같은 이름의 태그를 두 번 만들면 두 행이 생깁니다.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Tag {
    pub id: i64,
    pub name: String,
}

/// 태그 생성/수정 폼 본문
///
/// 연결할 게시글은 `posts=1&posts=2`처럼 반복 키로 들어옵니다.
#[derive(Debug, Deserialize)]
pub struct TagForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub posts: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagInput {
    pub name: String,
    pub post_ids: Vec<i64>,
}

impl TryFrom<TagForm> for TagInput {
    type Error = AppError;

    fn try_from(form: TagForm) -> Result<Self, Self::Error> {
        Ok(Self {
            name: forms::required("name", &form.name)?,
            post_ids: forms::coerce_ids(&form.posts),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_name_is_a_validation_error() {
        let result = TagInput::try_from(TagForm {
            name: String::new(),
            posts: vec!["1".into()],
        });
        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[test]
    fn post_ids_skip_unparseable_values() {
        let input = TagInput::try_from(TagForm {
            name: "tech".into(),
            posts: vec!["7".into(), "".into(), "-x".into(), " 3 ".into()],
        })
        .unwrap();
        assert_eq!(input.name, "tech");
        assert_eq!(input.post_ids, vec![3, 7]);
    }
}
