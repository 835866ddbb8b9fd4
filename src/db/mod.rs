//! # 데이터베이스 접근 계층 (Data Access Layer)
//!
//! 데이터베이스와 직접 상호작용하는 함수들을 모아둔 모듈입니다.
//! 라우트 핸들러(routes/)에서 이 모듈의 함수를 호출하여 DB 작업을 수행합니다.
//!
//! 각 하위 모듈:
//! - `users`: 사용자 CRUD와 게시글까지 이어지는 연쇄 삭제
//! - `posts`: 게시글 CRUD와 게시글-태그 관계 교체
//! - `tags`: 태그 CRUD와 태그-게시글 관계 교체
//!
//! 쓰기 작업은 모두 하나의 트랜잭션 안에서 실행되고, 커밋 전에 실패하면
//! 트랜잭션이 drop되면서 자동으로 롤백됩니다.

pub mod posts;
pub mod tags;
pub mod users;

// `crate::db::list_users`처럼 바로 접근할 수 있게 재공개합니다.
pub use posts::*;
pub use tags::*;
pub use users::*;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::str::FromStr;

/// SQLite 연결 풀을 만듭니다.
///
/// 데이터베이스 파일이 없으면 새로 만들고, 외래 키 제약을 켭니다.
pub async fn connect(database_url: &str, max_connections: u32) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .foreign_keys(true);

    SqlitePoolOptions::new()
        .max_connections(max_connections)
        .connect_with(options)
        .await
}

/// 아직 적용되지 않은 마이그레이션을 순서대로 실행합니다.
pub async fn migrate(pool: &SqlitePool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}

/// 저장소가 응답하는지 확인합니다 (헬스체크용).
pub async fn ping(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}
