//! # 게시글 데이터베이스 쿼리 모듈
//!
//! 게시글 CRUD와 게시글-태그 관계를 관리하는 SQL 쿼리 함수들입니다.
//!
//! ## 테이블 구조
//! - `posts`: 게시글 엔티티 (id, title, content, created_at, user_id)
//! - `posts_tags`: 게시글과 태그의 다대다(N:M) 관계 테이블
//!
//! 태그 목록은 병합하지 않고 항상 통째로 교체합니다. 요청된 ID 중
//! 실제로 존재하는 태그만 연결되고, 나머지는 조용히 무시됩니다.

use crate::error::AppError;
use crate::models::*;
use chrono::{SecondsFormat, Utc};
use sqlx::{SqliteConnection, SqlitePool};

/// 작성자 이름을 붙인 게시글 요약을 가져오는 공통 SELECT 절
const SUMMARY_SELECT: &str = r#"
    SELECT p.id, p.title, p.created_at, p.user_id,
           u.first_name || ' ' || u.last_name AS author
    FROM posts p
    JOIN users u ON u.id = p.user_id
"#;

/// 최근 게시글을 작성 시각 내림차순으로 `limit`개 조회합니다 (홈페이지).
pub async fn list_recent_posts(pool: &SqlitePool, limit: i64) -> Result<Vec<PostSummary>, AppError> {
    let sql = format!("{SUMMARY_SELECT} ORDER BY p.created_at DESC, p.id DESC LIMIT ?");
    let posts = sqlx::query_as::<_, PostSummary>(&sql)
        .bind(limit)
        .fetch_all(pool)
        .await?;

    Ok(posts)
}

/// 전체 게시글 요약 (태그 폼의 게시글 선택 목록)
pub async fn list_posts(pool: &SqlitePool) -> Result<Vec<PostSummary>, AppError> {
    let sql = format!("{SUMMARY_SELECT} ORDER BY p.created_at DESC, p.id DESC");
    let posts = sqlx::query_as::<_, PostSummary>(&sql).fetch_all(pool).await?;

    Ok(posts)
}

/// 특정 태그가 붙은 게시글 목록
pub async fn list_posts_for_tag(pool: &SqlitePool, tag_id: i64) -> Result<Vec<PostSummary>, AppError> {
    let sql = format!(
        "{SUMMARY_SELECT} JOIN posts_tags pt ON pt.post_id = p.id \
         WHERE pt.tag_id = ? ORDER BY p.created_at DESC, p.id DESC"
    );
    let posts = sqlx::query_as::<_, PostSummary>(&sql)
        .bind(tag_id)
        .fetch_all(pool)
        .await?;

    Ok(posts)
}

/// 한 사용자가 쓴 게시글 목록 (최신순)
pub async fn list_posts_for_user(pool: &SqlitePool, user_id: i64) -> Result<Vec<Post>, AppError> {
    let posts = sqlx::query_as::<_, Post>(
        r#"
        SELECT id, title, content, created_at, user_id
        FROM posts
        WHERE user_id = ?
        ORDER BY created_at DESC, id DESC
        "#,
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;

    Ok(posts)
}

pub async fn get_post(pool: &SqlitePool, id: i64) -> Result<Option<Post>, AppError> {
    let post = sqlx::query_as::<_, Post>(
        "SELECT id, title, content, created_at, user_id FROM posts WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(post)
}

/// 사용자의 새 게시글을 만들고 태그를 연결합니다.
///
/// ## 반환값
/// - `Ok(Some(Post))`: 생성 성공
/// - `Ok(None)`: 해당 사용자가 존재하지 않음 (아무것도 저장되지 않음)
pub async fn create_post(
    pool: &SqlitePool,
    user_id: i64,
    input: &PostInput,
) -> Result<Option<Post>, AppError> {
    // 작성 시각은 서버에서 한 번만 정하고 이후 바꾸지 않습니다.
    let created_at = Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true);

    let mut tx = pool.begin().await?;

    // 트랜잭션의 첫 문장을 쓰기로 시작해야 동시 요청이 읽기 잠금을 쥔 채
    // 서로를 기다리지 않고 busy_timeout 안에서 차례를 기다립니다.
    // 작성자가 없으면 SELECT가 0행이므로 아무것도 삽입되지 않습니다.
    let result = sqlx::query(
        r#"
        INSERT INTO posts (title, content, created_at, user_id)
        SELECT ?, ?, ?, id FROM users WHERE id = ?
        "#,
    )
    .bind(&input.title)
    .bind(&input.content)
    .bind(&created_at)
    .bind(user_id)
    .execute(&mut *tx)
    .await?;

    if result.rows_affected() == 0 {
        return Ok(None);
    }

    let id = result.last_insert_rowid();

    replace_post_tags(&mut tx, id, &input.tag_ids).await?;
    tx.commit().await?;

    tracing::info!(post_id = id, user_id, "Created post");
    get_post(pool, id).await
}

/// 제목과 내용을 덮어쓰고 태그 목록을 통째로 교체합니다.
///
/// 작성자(user_id)와 작성 시각은 바뀌지 않습니다.
/// 해당 ID가 없으면 `Ok(None)`을 반환합니다.
pub async fn update_post(
    pool: &SqlitePool,
    id: i64,
    input: &PostInput,
) -> Result<Option<Post>, AppError> {
    let mut tx = pool.begin().await?;

    let result = sqlx::query("UPDATE posts SET title = ?, content = ? WHERE id = ?")
        .bind(&input.title)
        .bind(&input.content)
        .bind(id)
        .execute(&mut *tx)
        .await?;

    if result.rows_affected() == 0 {
        return Ok(None);
    }

    replace_post_tags(&mut tx, id, &input.tag_ids).await?;
    tx.commit().await?;

    tracing::info!(post_id = id, "Updated post");
    get_post(pool, id).await
}

/// 게시글을 삭제합니다. 태그 연결 행을 먼저 지우고, 태그 자체는 남깁니다.
pub async fn delete_post(pool: &SqlitePool, id: i64) -> Result<bool, AppError> {
    let mut tx = pool.begin().await?;

    sqlx::query("DELETE FROM posts_tags WHERE post_id = ?")
        .bind(id)
        .execute(&mut *tx)
        .await?;

    let deleted = sqlx::query("DELETE FROM posts WHERE id = ?")
        .bind(id)
        .execute(&mut *tx)
        .await?
        .rows_affected()
        > 0;

    if !deleted {
        return Ok(false);
    }

    tx.commit().await?;
    tracing::info!(post_id = id, "Deleted post");
    Ok(true)
}

/// 게시글의 태그 연결을 `tag_ids`로 교체합니다.
///
/// `INSERT OR IGNORE ... SELECT`: 존재하는 태그에 대해서만 행이 만들어지고,
/// 같은 (post_id, tag_id) 쌍은 복합 PRIMARY KEY 덕분에 한 번만 들어갑니다.
pub(crate) async fn replace_post_tags(
    conn: &mut SqliteConnection,
    post_id: i64,
    tag_ids: &[i64],
) -> Result<(), AppError> {
    sqlx::query("DELETE FROM posts_tags WHERE post_id = ?")
        .bind(post_id)
        .execute(&mut *conn)
        .await?;

    for tag_id in tag_ids {
        sqlx::query(
            "INSERT OR IGNORE INTO posts_tags (post_id, tag_id) SELECT ?, id FROM tags WHERE id = ?",
        )
        .bind(post_id)
        .bind(tag_id)
        .execute(&mut *conn)
        .await?;
    }

    Ok(())
}
