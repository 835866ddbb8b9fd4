use axum::{
    extract::{FromRequestParts, Path},
    http::request::Parts,
};

use crate::error::AppError;

/// URL 경로의 엔티티 ID (`/users/{id}`, `/posts/{id}`, `/tags/{id}`)
///
/// 정수가 아닌 경로(`/users/abc`)는 존재하지 않는 엔티티와 똑같이 404로 처리합니다.
/// 기본 `Path<i64>`는 400을 돌려주기 때문에 별도 추출자를 둡니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntityId(pub i64);

impl<S> FromRequestParts<S> for EntityId
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|_| AppError::NotFound)?;

        raw.parse::<i64>().map(EntityId).map_err(|_| AppError::NotFound)
    }
}
