/// Post repository, including the feed query
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::{Post, PostDetail, PostPatch};

pub async fn create_post(
    pool: &PgPool,
    user_id: Uuid,
    content: &str,
    media_url: Option<&str>,
    comments_enabled: bool,
) -> Result<Post, sqlx::Error> {
    sqlx::query_as::<_, Post>(
        r#"
        INSERT INTO posts (user_id, content, media_url, comments_enabled)
        VALUES ($1, $2, $3, $4)
        RETURNING id, user_id, content, media_url, comments_enabled, created_at, updated_at
        "#,
    )
    .bind(user_id)
    .bind(content)
    .bind(media_url)
    .bind(comments_enabled)
    .fetch_one(pool)
    .await
}

/// Find an active post with author fields, engagement counts, and the
/// viewer's like state. A post whose author is soft-deleted is invisible.
pub async fn find_detail_by_id(
    pool: &PgPool,
    post_id: Uuid,
    viewer_id: Option<Uuid>,
) -> Result<Option<PostDetail>, sqlx::Error> {
    sqlx::query_as::<_, PostDetail>(
        r#"
        SELECT p.id, p.user_id, p.content, p.media_url, p.comments_enabled,
               p.created_at, p.updated_at,
               u.username, u.name, u.profile_picture,
               (SELECT COUNT(*) FROM likes l WHERE l.post_id = p.id) AS like_count,
               (SELECT COUNT(*) FROM active_comments c WHERE c.post_id = p.id) AS comment_count,
               EXISTS(SELECT 1 FROM likes l WHERE l.post_id = p.id AND l.user_id = $2) AS liked_by_viewer
        FROM active_posts p
        JOIN active_users u ON u.id = p.user_id
        WHERE p.id = $1
        "#,
    )
    .bind(post_id)
    .bind(viewer_id)
    .fetch_optional(pool)
    .await
}

/// Active posts by one author, newest first.
pub async fn list_by_user(
    pool: &PgPool,
    user_id: Uuid,
    viewer_id: Option<Uuid>,
    limit: i64,
    offset: i64,
) -> Result<Vec<PostDetail>, sqlx::Error> {
    sqlx::query_as::<_, PostDetail>(
        r#"
        SELECT p.id, p.user_id, p.content, p.media_url, p.comments_enabled,
               p.created_at, p.updated_at,
               u.username, u.name, u.profile_picture,
               (SELECT COUNT(*) FROM likes l WHERE l.post_id = p.id) AS like_count,
               (SELECT COUNT(*) FROM active_comments c WHERE c.post_id = p.id) AS comment_count,
               EXISTS(SELECT 1 FROM likes l WHERE l.post_id = p.id AND l.user_id = $2) AS liked_by_viewer
        FROM active_posts p
        JOIN active_users u ON u.id = p.user_id
        WHERE p.user_id = $1
        ORDER BY p.created_at DESC
        LIMIT $3 OFFSET $4
        "#,
    )
    .bind(user_id)
    .bind(viewer_id)
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await
}

pub async fn count_by_user(pool: &PgPool, user_id: Uuid) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM active_posts WHERE user_id = $1")
        .bind(user_id)
        .fetch_one(pool)
        .await
}

/// Active posts by one author that carry a media reference.
pub async fn list_with_media(
    pool: &PgPool,
    user_id: Uuid,
    viewer_id: Option<Uuid>,
    limit: i64,
    offset: i64,
) -> Result<Vec<PostDetail>, sqlx::Error> {
    sqlx::query_as::<_, PostDetail>(
        r#"
        SELECT p.id, p.user_id, p.content, p.media_url, p.comments_enabled,
               p.created_at, p.updated_at,
               u.username, u.name, u.profile_picture,
               (SELECT COUNT(*) FROM likes l WHERE l.post_id = p.id) AS like_count,
               (SELECT COUNT(*) FROM active_comments c WHERE c.post_id = p.id) AS comment_count,
               EXISTS(SELECT 1 FROM likes l WHERE l.post_id = p.id AND l.user_id = $2) AS liked_by_viewer
        FROM active_posts p
        JOIN active_users u ON u.id = p.user_id
        WHERE p.user_id = $1 AND p.media_url IS NOT NULL
        ORDER BY p.created_at DESC
        LIMIT $3 OFFSET $4
        "#,
    )
    .bind(user_id)
    .bind(viewer_id)
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await
}

pub async fn count_with_media(pool: &PgPool, user_id: Uuid) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar::<_, i64>(
        "SELECT COUNT(*) FROM active_posts WHERE user_id = $1 AND media_url IS NOT NULL",
    )
    .bind(user_id)
    .fetch_one(pool)
    .await
}

/// Apply a patch to a post. Existence, activity, and ownership are part of
/// the WHERE clause, so authorization and mutation happen in one atomic
/// round trip; a non-owner gets None, indistinguishable from a missing post.
pub async fn update_post(
    pool: &PgPool,
    post_id: Uuid,
    user_id: Uuid,
    patch: &PostPatch,
) -> Result<Option<Post>, sqlx::Error> {
    sqlx::query_as::<_, Post>(
        r#"
        UPDATE posts
        SET content = COALESCE($3, content),
            media_url = COALESCE($4, media_url),
            comments_enabled = COALESCE($5, comments_enabled),
            updated_at = NOW()
        WHERE id = $1 AND user_id = $2 AND deleted_at IS NULL
        RETURNING id, user_id, content, media_url, comments_enabled, created_at, updated_at
        "#,
    )
    .bind(post_id)
    .bind(user_id)
    .bind(patch.content.as_deref())
    .bind(patch.media_url.as_deref())
    .bind(patch.comments_enabled)
    .fetch_optional(pool)
    .await
}

/// Soft delete with the same atomic existence+ownership predicate.
pub async fn soft_delete(pool: &PgPool, post_id: Uuid, user_id: Uuid) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(
        r#"
        UPDATE posts
        SET deleted_at = NOW(), updated_at = NOW()
        WHERE id = $1 AND user_id = $2 AND deleted_at IS NULL
        "#,
    )
    .bind(post_id)
    .bind(user_id)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}

/// Feed: active posts authored by the caller or anyone the caller follows,
/// active authors only, newest first. The followee set is recomputed per
/// call; the author-set predicate selects each post row exactly once.
pub async fn feed(
    pool: &PgPool,
    user_id: Uuid,
    limit: i64,
    offset: i64,
) -> Result<Vec<PostDetail>, sqlx::Error> {
    sqlx::query_as::<_, PostDetail>(
        r#"
        SELECT p.id, p.user_id, p.content, p.media_url, p.comments_enabled,
               p.created_at, p.updated_at,
               u.username, u.name, u.profile_picture,
               (SELECT COUNT(*) FROM likes l WHERE l.post_id = p.id) AS like_count,
               (SELECT COUNT(*) FROM active_comments c WHERE c.post_id = p.id) AS comment_count,
               EXISTS(SELECT 1 FROM likes l WHERE l.post_id = p.id AND l.user_id = $1) AS liked_by_viewer
        FROM active_posts p
        JOIN active_users u ON u.id = p.user_id
        WHERE p.user_id = $1
           OR p.user_id IN (SELECT following_id FROM follows WHERE follower_id = $1)
        ORDER BY p.created_at DESC
        LIMIT $2 OFFSET $3
        "#,
    )
    .bind(user_id)
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await
}

pub async fn feed_count(pool: &PgPool, user_id: Uuid) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar::<_, i64>(
        r#"
        SELECT COUNT(*)
        FROM active_posts p
        JOIN active_users u ON u.id = p.user_id
        WHERE p.user_id = $1
           OR p.user_id IN (SELECT following_id FROM follows WHERE follower_id = $1)
        "#,
    )
    .bind(user_id)
    .fetch_one(pool)
    .await
}

/// Case-insensitive substring search over active post content.
pub async fn search(
    pool: &PgPool,
    query: &str,
    viewer_id: Option<Uuid>,
    limit: i64,
    offset: i64,
) -> Result<Vec<PostDetail>, sqlx::Error> {
    let term = format!("%{}%", query);
    sqlx::query_as::<_, PostDetail>(
        r#"
        SELECT p.id, p.user_id, p.content, p.media_url, p.comments_enabled,
               p.created_at, p.updated_at,
               u.username, u.name, u.profile_picture,
               (SELECT COUNT(*) FROM likes l WHERE l.post_id = p.id) AS like_count,
               (SELECT COUNT(*) FROM active_comments c WHERE c.post_id = p.id) AS comment_count,
               EXISTS(SELECT 1 FROM likes l WHERE l.post_id = p.id AND l.user_id = $2) AS liked_by_viewer
        FROM active_posts p
        JOIN active_users u ON u.id = p.user_id
        WHERE p.content ILIKE $1
        ORDER BY p.created_at DESC
        LIMIT $3 OFFSET $4
        "#,
    )
    .bind(term)
    .bind(viewer_id)
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await
}

pub async fn search_count(pool: &PgPool, query: &str) -> Result<i64, sqlx::Error> {
    let term = format!("%{}%", query);
    sqlx::query_scalar::<_, i64>(
        r#"
        SELECT COUNT(*)
        FROM active_posts p
        JOIN active_users u ON u.id = p.user_id
        WHERE p.content ILIKE $1
        "#,
    )
    .bind(term)
    .fetch_one(pool)
    .await
}

/// The comment toggle of an active post, or None when the post is invisible.
pub async fn comments_toggle(pool: &PgPool, post_id: Uuid) -> Result<Option<bool>, sqlx::Error> {
    sqlx::query_scalar::<_, bool>("SELECT comments_enabled FROM active_posts WHERE id = $1")
        .bind(post_id)
        .fetch_optional(pool)
        .await
}

/// Whether an active post exists (author activity not considered).
pub async fn exists_active(pool: &PgPool, post_id: Uuid) -> Result<bool, sqlx::Error> {
    sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM active_posts WHERE id = $1)")
        .bind(post_id)
        .fetch_one(pool)
        .await
}
