/// Like edge repository
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::{LikedPost, Liker, PostDetail, ReceivedLike, Like, TimeWindow};

/// Insert a like edge. The unique (user_id, post_id) index is the
/// authoritative duplicate guard.
pub async fn insert(pool: &PgPool, user_id: Uuid, post_id: Uuid) -> Result<Like, sqlx::Error> {
    sqlx::query_as::<_, Like>(
        r#"
        INSERT INTO likes (user_id, post_id)
        VALUES ($1, $2)
        RETURNING id, user_id, post_id, created_at
        "#,
    )
    .bind(user_id)
    .bind(post_id)
    .fetch_one(pool)
    .await
}

/// Hard delete a like edge, returning the removed edge when one existed.
pub async fn delete(
    pool: &PgPool,
    user_id: Uuid,
    post_id: Uuid,
) -> Result<Option<Like>, sqlx::Error> {
    sqlx::query_as::<_, Like>(
        r#"
        DELETE FROM likes
        WHERE user_id = $1 AND post_id = $2
        RETURNING id, user_id, post_id, created_at
        "#,
    )
    .bind(user_id)
    .bind(post_id)
    .fetch_optional(pool)
    .await
}

pub async fn exists(pool: &PgPool, user_id: Uuid, post_id: Uuid) -> Result<bool, sqlx::Error> {
    sqlx::query_scalar::<_, bool>(
        "SELECT EXISTS(SELECT 1 FROM likes WHERE user_id = $1 AND post_id = $2)",
    )
    .bind(user_id)
    .bind(post_id)
    .fetch_one(pool)
    .await
}

/// Active likers of a post, newest like first.
pub async fn list_for_post(
    pool: &PgPool,
    post_id: Uuid,
    limit: i64,
    offset: i64,
) -> Result<Vec<Liker>, sqlx::Error> {
    sqlx::query_as::<_, Liker>(
        r#"
        SELECT u.id, u.username, u.name, u.profile_picture, l.created_at AS liked_at
        FROM likes l
        JOIN active_users u ON u.id = l.user_id
        WHERE l.post_id = $1
        ORDER BY l.created_at DESC
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
    sqlx::query_scalar::<_, i64>(
        r#"
        SELECT COUNT(*)
        FROM likes l
        JOIN active_users u ON u.id = l.user_id
        WHERE l.post_id = $1
        "#,
    )
    .bind(post_id)
    .fetch_one(pool)
    .await
}

/// Posts a user has liked (active posts and authors only), newest-liked
/// first, enriched like any other post listing.
pub async fn list_for_user(
    pool: &PgPool,
    user_id: Uuid,
    limit: i64,
    offset: i64,
) -> Result<Vec<LikedPost>, sqlx::Error> {
    sqlx::query_as::<_, LikedPost>(
        r#"
        SELECT p.id, p.user_id, p.content, p.media_url, p.comments_enabled,
               p.created_at, p.updated_at,
               u.username, u.name, u.profile_picture,
               (SELECT COUNT(*) FROM likes x WHERE x.post_id = p.id) AS like_count,
               (SELECT COUNT(*) FROM active_comments c WHERE c.post_id = p.id) AS comment_count,
               TRUE AS liked_by_viewer,
               l.created_at AS liked_at
        FROM likes l
        JOIN active_posts p ON p.id = l.post_id
        JOIN active_users u ON u.id = p.user_id
        WHERE l.user_id = $1
        ORDER BY l.created_at DESC
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
        FROM likes l
        JOIN active_posts p ON p.id = l.post_id
        JOIN active_users u ON u.id = p.user_id
        WHERE l.user_id = $1
        "#,
    )
    .bind(user_id)
    .fetch_one(pool)
    .await
}

/// Most-liked active posts within a time window. Ties break by creation
/// time then id, descending, so the order is deterministic.
pub async fn most_liked(
    pool: &PgPool,
    window: TimeWindow,
    limit: i64,
) -> Result<Vec<PostDetail>, sqlx::Error> {
    sqlx::query_as::<_, PostDetail>(
        r#"
        SELECT p.id, p.user_id, p.content, p.media_url, p.comments_enabled,
               p.created_at, p.updated_at,
               u.username, u.name, u.profile_picture,
               COUNT(l.id) AS like_count,
               (SELECT COUNT(*) FROM active_comments c WHERE c.post_id = p.id) AS comment_count,
               FALSE AS liked_by_viewer
        FROM active_posts p
        JOIN active_users u ON u.id = p.user_id
        LEFT JOIN likes l ON l.post_id = p.id
        WHERE $1::BIGINT IS NULL OR p.created_at >= NOW() - make_interval(days => $1::INT)
        GROUP BY p.id, p.user_id, p.content, p.media_url, p.comments_enabled,
                 p.created_at, p.updated_at, u.username, u.name, u.profile_picture
        ORDER BY like_count DESC, p.created_at DESC, p.id DESC
        LIMIT $2
        "#,
    )
    .bind(window.days())
    .bind(limit)
    .fetch_all(pool)
    .await
}

/// Recent likes received across a user's active posts, with liker fields.
pub async fn recent_for_author(
    pool: &PgPool,
    user_id: Uuid,
    limit: i64,
) -> Result<Vec<ReceivedLike>, sqlx::Error> {
    sqlx::query_as::<_, ReceivedLike>(
        r#"
        SELECT p.id AS post_id, p.content AS post_content,
               u.id AS liker_id, u.username, u.name, u.profile_picture,
               l.created_at AS liked_at
        FROM likes l
        JOIN active_posts p ON p.id = l.post_id
        JOIN active_users u ON u.id = l.user_id
        WHERE p.user_id = $1
        ORDER BY l.created_at DESC
        LIMIT $2
        "#,
    )
    .bind(user_id)
    .bind(limit)
    .fetch_all(pool)
    .await
}
