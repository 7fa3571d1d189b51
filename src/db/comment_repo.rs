/// Comment repository
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::{Comment, CommentDetail};

pub async fn create_comment(
    pool: &PgPool,
    user_id: Uuid,
    post_id: Uuid,
    content: &str,
) -> Result<Comment, sqlx::Error> {
    sqlx::query_as::<_, Comment>(
        r#"
        INSERT INTO comments (user_id, post_id, content)
        VALUES ($1, $2, $3)
        RETURNING id, user_id, post_id, content, created_at, updated_at
        "#,
    )
    .bind(user_id)
    .bind(post_id)
    .bind(content)
    .fetch_one(pool)
    .await
}

/// Active comment with author fields.
pub async fn find_detail_by_id(
    pool: &PgPool,
    comment_id: Uuid,
) -> Result<Option<CommentDetail>, sqlx::Error> {
    sqlx::query_as::<_, CommentDetail>(
        r#"
        SELECT c.id, c.user_id, c.post_id, c.content, c.created_at, c.updated_at,
               u.username, u.name, u.profile_picture
        FROM active_comments c
        JOIN active_users u ON u.id = c.user_id
        WHERE c.id = $1
        "#,
    )
    .bind(comment_id)
    .fetch_optional(pool)
    .await
}

/// Replace an active comment's content. Ownership is checked by the caller
/// before this runs.
pub async fn update_comment(
    pool: &PgPool,
    comment_id: Uuid,
    content: &str,
) -> Result<Option<Comment>, sqlx::Error> {
    sqlx::query_as::<_, Comment>(
        r#"
        UPDATE comments
        SET content = $2, updated_at = NOW()
        WHERE id = $1 AND deleted_at IS NULL
        RETURNING id, user_id, post_id, content, created_at, updated_at
        "#,
    )
    .bind(comment_id)
    .bind(content)
    .fetch_optional(pool)
    .await
}

pub async fn soft_delete(pool: &PgPool, comment_id: Uuid) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(
        r#"
        UPDATE comments
        SET deleted_at = NOW(), updated_at = NOW()
        WHERE id = $1 AND deleted_at IS NULL
        "#,
    )
    .bind(comment_id)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}

/// Active comments on a post with author fields, newest first.
pub async fn list_for_post(
    pool: &PgPool,
    post_id: Uuid,
    limit: i64,
    offset: i64,
) -> Result<Vec<CommentDetail>, sqlx::Error> {
    sqlx::query_as::<_, CommentDetail>(
        r#"
        SELECT c.id, c.user_id, c.post_id, c.content, c.created_at, c.updated_at,
               u.username, u.name, u.profile_picture
        FROM active_comments c
        JOIN active_users u ON u.id = c.user_id
        WHERE c.post_id = $1
        ORDER BY c.created_at DESC
        LIMIT $2 OFFSET $3
        "#,
    )
    .bind(post_id)
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await
}

pub async fn count_for_post(pool: &PgPool, post_id: Uuid) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM active_comments WHERE post_id = $1")
        .bind(post_id)
        .fetch_one(pool)
        .await
}

/// Active comments by one user on active posts, newest first.
pub async fn list_for_user(
    pool: &PgPool,
    user_id: Uuid,
    limit: i64,
    offset: i64,
) -> Result<Vec<CommentDetail>, sqlx::Error> {
    sqlx::query_as::<_, CommentDetail>(
        r#"
        SELECT c.id, c.user_id, c.post_id, c.content, c.created_at, c.updated_at,
               u.username, u.name, u.profile_picture
        FROM active_comments c
        JOIN active_posts p ON p.id = c.post_id
        JOIN active_users u ON u.id = c.user_id
        WHERE c.user_id = $1
        ORDER BY c.created_at DESC
        LIMIT $2 OFFSET $3
        "#,
    )
    .bind(user_id)
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await
}

pub async fn count_for_user(pool: &PgPool, user_id: Uuid) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar::<_, i64>(
        r#"
        SELECT COUNT(*)
        FROM active_comments c
        JOIN active_posts p ON p.id = c.post_id
        WHERE c.user_id = $1
        "#,
    )
    .bind(user_id)
    .fetch_one(pool)
    .await
}
