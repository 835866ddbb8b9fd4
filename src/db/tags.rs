//! # 태그 데이터베이스 쿼리 모듈
//!
//! 태그 CRUD 및 태그-게시글 관계를 관리하는 SQL 쿼리 함수들입니다.
//! 모든 함수는 `SqlitePool` 참조를 받아 비동기로 실행됩니다.
//!
//! ## 테이블 구조
//! - `tags`: 태그 엔티티 (id, name)
//! - `posts_tags`: 게시글과 태그의 다대다(N:M) 관계 테이블
//!
//! ```text
//! posts ←── posts_tags ──→ tags
//!  (1)         (N:M)        (1)
//! ```

use crate::error::AppError;
use crate::models::*;
use sqlx::{SqliteConnection, SqlitePool};

/// 모든 태그를 이름순으로 조회합니다.
///
/// 이름이 같은 태그가 있을 수 있으므로 id로 한 번 더 정렬해 순서를 고정합니다.
pub async fn list_tags(pool: &SqlitePool) -> Result<Vec<Tag>, AppError> {
    let tags = sqlx::query_as::<_, Tag>("SELECT id, name FROM tags ORDER BY name, id")
        .fetch_all(pool)
        .await?;

    Ok(tags)
}

/// ID로 태그 하나를 조회합니다.
///
/// `fetch_optional`은 결과가 0행이면 None, 1행이면 Some(Tag)을 반환합니다.
pub async fn get_tag(pool: &SqlitePool, id: i64) -> Result<Option<Tag>, AppError> {
    let tag = sqlx::query_as::<_, Tag>("SELECT id, name FROM tags WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await?;

    Ok(tag)
}

/// 특정 게시글에 연결된 모든 태그를 조회합니다.
///
/// `posts_tags` 중간 테이블을 JOIN하여 게시글에 속한 태그 목록을 가져옵니다.
pub async fn list_tags_for_post(pool: &SqlitePool, post_id: i64) -> Result<Vec<Tag>, AppError> {
    let tags = sqlx::query_as::<_, Tag>(
        r#"
        SELECT t.id, t.name
        FROM tags t
        JOIN posts_tags pt ON pt.tag_id = t.id
        WHERE pt.post_id = ?
        ORDER BY t.name, t.id
        "#,
    )
    .bind(post_id)
    .fetch_all(pool)
    .await?;

    Ok(tags)
}

/// 새 태그를 만들고, 요청된 게시글 중 존재하는 것들과 바로 연결합니다.
pub async fn create_tag(pool: &SqlitePool, input: &TagInput) -> Result<Tag, AppError> {
    let mut tx = pool.begin().await?;

    let id = sqlx::query("INSERT INTO tags (name) VALUES (?)")
        .bind(&input.name)
        .execute(&mut *tx)
        .await?
        .last_insert_rowid();

    replace_tag_posts(&mut tx, id, &input.post_ids).await?;
    tx.commit().await?;

    tracing::info!(tag_id = id, "Created tag");

    // 생성 직후 조회하여 완전한 Tag 객체를 반환합니다
    get_tag(pool, id)
        .await?
        .ok_or(AppError::Internal("Failed to retrieve created tag".to_string()))
}

/// 태그 이름을 덮어쓰고 연결된 게시글 목록을 통째로 교체합니다.
///
/// ## 반환값
/// - `Ok(Some(Tag))`: 수정 성공
/// - `Ok(None)`: 해당 ID의 태그가 존재하지 않음
pub async fn update_tag(
    pool: &SqlitePool,
    id: i64,
    input: &TagInput,
) -> Result<Option<Tag>, AppError> {
    let mut tx = pool.begin().await?;

    let result = sqlx::query("UPDATE tags SET name = ? WHERE id = ?")
        .bind(&input.name)
        .bind(id)
        .execute(&mut *tx)
        .await?;

    if result.rows_affected() == 0 {
        return Ok(None); // 404 처리를 라우트 핸들러에 위임
    }

    replace_tag_posts(&mut tx, id, &input.post_ids).await?;
    tx.commit().await?;

    tracing::info!(tag_id = id, "Updated tag");
    get_tag(pool, id).await
}

/// ID로 태그를 삭제합니다. 연결 행만 지우고 게시글은 건드리지 않습니다.
///
/// ## 반환값
/// - `true`: 삭제 성공
/// - `false`: 해당 ID의 태그가 존재하지 않음
pub async fn delete_tag(pool: &SqlitePool, id: i64) -> Result<bool, AppError> {
    let mut tx = pool.begin().await?;

    sqlx::query("DELETE FROM posts_tags WHERE tag_id = ?")
        .bind(id)
        .execute(&mut *tx)
        .await?;

    let result = sqlx::query("DELETE FROM tags WHERE id = ?")
        .bind(id)
        .execute(&mut *tx)
        .await?;

    // rows_affected(): 이 쿼리로 영향받은 행 수를 반환
    if result.rows_affected() == 0 {
        return Ok(false);
    }

    tx.commit().await?;
    tracing::info!(tag_id = id, "Deleted tag");
    Ok(true)
}

/// 태그에 연결된 게시글을 `post_ids`로 교체합니다. 없는 게시글 ID는 무시됩니다.
pub(crate) async fn replace_tag_posts(
    conn: &mut SqliteConnection,
    tag_id: i64,
    post_ids: &[i64],
) -> Result<(), AppError> {
    sqlx::query("DELETE FROM posts_tags WHERE tag_id = ?")
        .bind(tag_id)
        .execute(&mut *conn)
        .await?;

    for post_id in post_ids {
        sqlx::query(
            "INSERT OR IGNORE INTO posts_tags (post_id, tag_id) SELECT id, ? FROM posts WHERE id = ?",
        )
        .bind(tag_id)
        .bind(post_id)
        .execute(&mut *conn)
        .await?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{self, test_support};

    async fn seed_post(pool: &SqlitePool, title: &str) -> Post {
        let user = db::create_user(
            pool,
            &UserInput {
                first_name: "Bob".into(),
                last_name: "Adams".into(),
                image_url: DEFAULT_IMAGE_URL.into(),
            },
        )
        .await
        .unwrap();

        db::create_post(
            pool,
            user.id,
            &PostInput {
                title: title.into(),
                content: "body".into(),
                tag_ids: vec![],
            },
        )
        .await
        .unwrap()
        .unwrap()
    }

    fn tag_input(name: &str, post_ids: Vec<i64>) -> TagInput {
        TagInput {
            name: name.into(),
            post_ids,
        }
    }

    #[tokio::test]
    async fn duplicate_names_are_both_kept() {
        let pool = test_support::pool().await;
        let first = create_tag(&pool, &tag_input("tech", vec![])).await.unwrap();
        let second = create_tag(&pool, &tag_input("tech", vec![])).await.unwrap();

        assert_ne!(first.id, second.id);
        let names: Vec<String> = list_tags(&pool).await.unwrap().into_iter().map(|t| t.name).collect();
        assert_eq!(names, ["tech", "tech"]);
    }

    #[tokio::test]
    async fn create_associates_only_existing_posts() {
        let pool = test_support::pool().await;
        let post = seed_post(&pool, "Hello").await;

        let tag = create_tag(&pool, &tag_input("tech", vec![post.id, 404])).await.unwrap();

        let posts = db::list_posts_for_tag(&pool, tag.id).await.unwrap();
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].id, post.id);
    }

    #[tokio::test]
    async fn update_replaces_posts_and_name() {
        let pool = test_support::pool().await;
        let one = seed_post(&pool, "one").await;
        let two = seed_post(&pool, "two").await;
        let tag = create_tag(&pool, &tag_input("tech", vec![one.id])).await.unwrap();

        let updated = update_tag(&pool, tag.id, &tag_input("science", vec![two.id]))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.name, "science");

        let posts = db::list_posts_for_tag(&pool, tag.id).await.unwrap();
        assert_eq!(posts.iter().map(|p| p.id).collect::<Vec<_>>(), vec![two.id]);

        assert!(update_tag(&pool, 999, &tag_input("x", vec![])).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn delete_leaves_posts_untouched() {
        let pool = test_support::pool().await;
        let post = seed_post(&pool, "Hello").await;
        let tag = create_tag(&pool, &tag_input("tech", vec![post.id])).await.unwrap();

        assert!(delete_tag(&pool, tag.id).await.unwrap());
        assert!(!delete_tag(&pool, tag.id).await.unwrap());

        let kept = db::get_post(&pool, post.id).await.unwrap().unwrap();
        assert_eq!(kept.title, post.title);
        assert_eq!(kept.content, post.content);
        assert!(list_tags_for_post(&pool, post.id).await.unwrap().is_empty());
    }
}
