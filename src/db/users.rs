use crate::error::AppError;
use crate::models::*;
use sqlx::SqlitePool;

/// 전체 사용자를 (성, 이름) 오름차순으로 조회합니다.
pub async fn list_users(pool: &SqlitePool) -> Result<Vec<User>, AppError> {
    let users = sqlx::query_as::<_, User>(
        r#"
        SELECT id, first_name, last_name, image_url
        FROM users
        ORDER BY last_name, first_name, id
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(users)
}

pub async fn get_user(pool: &SqlitePool, id: i64) -> Result<Option<User>, AppError> {
    let user = sqlx::query_as::<_, User>(
        r#"
        SELECT id, first_name, last_name, image_url
        FROM users
        WHERE id = ?
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(user)
}

pub async fn create_user(pool: &SqlitePool, input: &UserInput) -> Result<User, AppError> {
    let id = sqlx::query("INSERT INTO users (first_name, last_name, image_url) VALUES (?, ?, ?)")
        .bind(&input.first_name)
        .bind(&input.last_name)
        .bind(&input.image_url)
        .execute(pool)
        .await?
        .last_insert_rowid();

    tracing::info!(user_id = id, "Created user");

    get_user(pool, id)
        .await?
        .ok_or(AppError::Internal("Failed to retrieve created user".to_string()))
}

/// 세 필드를 모두 덮어씁니다. 해당 ID가 없으면 `Ok(None)`을 반환합니다.
pub async fn update_user(
    pool: &SqlitePool,
    id: i64,
    input: &UserInput,
) -> Result<Option<User>, AppError> {
    let result = sqlx::query(
        "UPDATE users SET first_name = ?, last_name = ?, image_url = ? WHERE id = ?",
    )
    .bind(&input.first_name)
    .bind(&input.last_name)
    .bind(&input.image_url)
    .bind(id)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Ok(None);
    }

    tracing::info!(user_id = id, "Updated user");
    get_user(pool, id).await
}

/// 사용자와 그 사용자의 게시글을 한 트랜잭션에서 삭제합니다.
///
/// 삭제 순서: 게시글-태그 연결 행 → 게시글 → 사용자.
/// 태그 자체는 남습니다. 중간에 실패하면 아무것도 지워지지 않습니다.
pub async fn delete_user(pool: &SqlitePool, id: i64) -> Result<bool, AppError> {
    let mut tx = pool.begin().await?;

    sqlx::query(
        "DELETE FROM posts_tags WHERE post_id IN (SELECT id FROM posts WHERE user_id = ?)",
    )
    .bind(id)
    .execute(&mut *tx)
    .await?;

    let posts = sqlx::query("DELETE FROM posts WHERE user_id = ?")
        .bind(id)
        .execute(&mut *tx)
        .await?
        .rows_affected();

    let deleted = sqlx::query("DELETE FROM users WHERE id = ?")
        .bind(id)
        .execute(&mut *tx)
        .await?
        .rows_affected()
        > 0;

    // 사용자가 없었다면 커밋하지 않고 롤백합니다.
    if !deleted {
        return Ok(false);
    }

    tx.commit().await?;
    tracing::info!(user_id = id, posts, "Deleted user and owned posts");
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{self, test_support};

    fn input(first: &str, last: &str) -> UserInput {
        UserInput {
            first_name: first.to_string(),
            last_name: last.to_string(),
            image_url: DEFAULT_IMAGE_URL.to_string(),
        }
    }

    #[tokio::test]
    async fn users_are_sorted_by_last_then_first_name() {
        let pool = test_support::pool().await;
        create_user(&pool, &input("Ada", "Lovelace")).await.unwrap();
        create_user(&pool, &input("Bob", "Adams")).await.unwrap();
        create_user(&pool, &input("Alice", "Adams")).await.unwrap();

        let names: Vec<String> = list_users(&pool)
            .await
            .unwrap()
            .iter()
            .map(User::full_name)
            .collect();
        assert_eq!(names, ["Alice Adams", "Bob Adams", "Ada Lovelace"]);
    }

    #[tokio::test]
    async fn update_overwrites_all_fields() {
        let pool = test_support::pool().await;
        let user = create_user(&pool, &input("Ada", "Lovelace")).await.unwrap();

        let changes = UserInput {
            first_name: "Augusta".into(),
            last_name: "King".into(),
            image_url: String::new(),
        };
        let updated = update_user(&pool, user.id, &changes).await.unwrap().unwrap();
        assert_eq!(updated.full_name(), "Augusta King");
        assert_eq!(updated.image_url, "");

        assert!(update_user(&pool, 9999, &changes).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn deleting_a_user_cascades_to_posts_and_join_rows_only() {
        let pool = test_support::pool().await;
        let ada = create_user(&pool, &input("Ada", "Lovelace")).await.unwrap();
        let bob = create_user(&pool, &input("Bob", "Adams")).await.unwrap();
        let tag = db::create_tag(&pool, &TagInput { name: "tech".into(), post_ids: vec![] })
            .await
            .unwrap();

        let post = PostInput {
            title: "Hello".into(),
            content: "World".into(),
            tag_ids: vec![tag.id],
        };
        let ada_post = db::create_post(&pool, ada.id, &post).await.unwrap().unwrap();
        let bob_post = db::create_post(&pool, bob.id, &post).await.unwrap().unwrap();

        assert!(delete_user(&pool, ada.id).await.unwrap());

        assert!(get_user(&pool, ada.id).await.unwrap().is_none());
        assert!(db::get_post(&pool, ada_post.id).await.unwrap().is_none());
        assert!(db::get_post(&pool, bob_post.id).await.unwrap().is_some());
        assert!(db::get_tag(&pool, tag.id).await.unwrap().is_some());

        let orphans: (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM posts_tags WHERE post_id = ?")
                .bind(ada_post.id)
                .fetch_one(&pool)
                .await
                .unwrap();
        assert_eq!(orphans.0, 0);

        let tagged = db::list_posts_for_tag(&pool, tag.id).await.unwrap();
        assert_eq!(tagged.len(), 1);
        assert_eq!(tagged[0].id, bob_post.id);
    }

    #[tokio::test]
    async fn deleting_a_missing_user_reports_false() {
        let pool = test_support::pool().await;
        assert!(!delete_user(&pool, 42).await.unwrap());
    }
}
