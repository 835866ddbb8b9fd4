//! # 서비스 모듈
//!
//! 라우트 핸들러와 DB 계층 사이에서 쓰이는 보조 로직입니다.
//! - `forms`: 폼 입력 검증과 ID 목록 변환
//! - `notice`: 리다이렉트 후 한 번만 보여주는 알림

pub mod forms;
pub mod notice;
