//! # 헬스체크(Health Check) 핸들러
//!
//! 서버와 데이터베이스가 정상적으로 동작하는지 확인하는 엔드포인트입니다.
//!
//! ## 엔드포인트
//! - `GET /health` → `{ "status": "ok" }`

use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::{db, error::AppError, routes::AppState};

/// `GET /health` — `SELECT 1`이 성공하면 ok를 반환합니다.
///
/// DB에 접근할 수 없으면 `AppError::Database`가 500 응답으로 변환됩니다.
pub async fn health_check(State(state): State<AppState>) -> Result<Json<Value>, AppError> {
    db::ping(&state.pool).await?;
    Ok(Json(json!({
        "status": "ok"
    })))
}
