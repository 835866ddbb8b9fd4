use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::services::forms;

/// 프로필 이미지를 지정하지 않고 가입한 사용자에게 쓰는 기본 이미지
pub const DEFAULT_IMAGE_URL: &str =
    "https://www.freeiconspng.com/uploads/icon-user-blue-symbol-people-person-generic--public-domain--21.png";

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub image_url: String,
}

impl User {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// 응답용 사용자 표현. 저장하지 않는 `full_name`을 함께 내려줍니다.
#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub image_url: String,
    pub full_name: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            full_name: user.full_name(),
            id: user.id,
            first_name: user.first_name,
            last_name: user.last_name,
            image_url: user.image_url,
        }
    }
}

/// `POST /users/new`, `POST /users/{id}/edit`의 폼 본문
#[derive(Debug, Deserialize)]
pub struct UserForm {
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub image_url: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserInput {
    pub first_name: String,
    pub last_name: String,
    pub image_url: String,
}

impl UserForm {
    /// 새 사용자 입력으로 변환합니다. 이미지 URL이 비어 있으면 기본 이미지를 씁니다.
    pub fn into_new_user(self) -> Result<UserInput, AppError> {
        let image_url = if self.image_url.trim().is_empty() {
            DEFAULT_IMAGE_URL.to_string()
        } else {
            self.image_url
        };

        Ok(UserInput {
            first_name: forms::required("first_name", &self.first_name)?,
            last_name: forms::required("last_name", &self.last_name)?,
            image_url,
        })
    }

    /// 수정 입력으로 변환합니다.
    ///
    /// 세 필드를 모두 덮어씁니다. 생성과 달리 빈 이미지 URL도 그대로 저장합니다.
    pub fn into_user_changes(self) -> Result<UserInput, AppError> {
        Ok(UserInput {
            first_name: forms::required("first_name", &self.first_name)?,
            last_name: forms::required("last_name", &self.last_name)?,
            image_url: self.image_url,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(first: &str, last: &str, image_url: &str) -> UserForm {
        UserForm {
            first_name: first.to_string(),
            last_name: last.to_string(),
            image_url: image_url.to_string(),
        }
    }

    #[test]
    fn full_name_joins_with_a_space() {
        let user = User {
            id: 1,
            first_name: "Ada".into(),
            last_name: "Lovelace".into(),
            image_url: DEFAULT_IMAGE_URL.into(),
        };
        assert_eq!(user.full_name(), "Ada Lovelace");
        assert_eq!(UserResponse::from(user).full_name, "Ada Lovelace");
    }

    #[test]
    fn blank_image_url_gets_placeholder_on_create() {
        let input = form("Ada", "Lovelace", "   ").into_new_user().unwrap();
        assert_eq!(input.image_url, DEFAULT_IMAGE_URL);

        let input = form("Ada", "Lovelace", " http://img/ada.png ").into_new_user().unwrap();
        assert_eq!(input.image_url, "http://img/ada.png");
    }

    #[test]
    fn empty_image_url_is_kept_on_update() {
        let input = form("Ada", "Lovelace", "").into_user_changes().unwrap();
        assert_eq!(input.image_url, "");
    }

    #[test]
    fn missing_names_are_rejected() {
        assert!(matches!(
            form("", "Lovelace", "").into_new_user(),
            Err(AppError::Validation(_))
        ));
        assert!(matches!(
            form("Ada", "  ", "").into_user_changes(),
            Err(AppError::Validation(_))
        ));
    }
}
