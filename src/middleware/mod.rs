//! # 요청 추출자(Extractor) 모듈
//!
//! 핸들러 매개변수로 쓰이는 커스텀 추출자들입니다.
//! - `entity_id`: URL 경로의 정수 ID (`/users/{id}` 등)

pub mod entity_id;

pub use entity_id::EntityId;
