/// Follow edge repository
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::{Follow, FollowCounts, FollowedUser, MutualCheck, UserSummary};

/// Insert a follow edge. The composite primary key rejects duplicates and
/// the table CHECK rejects self-follows if a caller ever slips past the
/// service-level guards.
pub async fn insert(
    pool: &PgPool,
    follower_id: Uuid,
    following_id: Uuid,
) -> Result<Follow, sqlx::Error> {
    sqlx::query_as::<_, Follow>(
        r#"
        INSERT INTO follows (follower_id, following_id)
        VALUES ($1, $2)
        RETURNING follower_id, following_id, created_at
        "#,
    )
    .bind(follower_id)
    .bind(following_id)
    .fetch_one(pool)
    .await
}

/// Hard delete a follow edge; returns whether one existed.
pub async fn delete(
    pool: &PgPool,
    follower_id: Uuid,
    following_id: Uuid,
) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM follows WHERE follower_id = $1 AND following_id = $2")
        .bind(follower_id)
        .bind(following_id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}

pub async fn exists(
    pool: &PgPool,
    follower_id: Uuid,
    following_id: Uuid,
) -> Result<bool, sqlx::Error> {
    sqlx::query_scalar::<_, bool>(
        "SELECT EXISTS(SELECT 1 FROM follows WHERE follower_id = $1 AND following_id = $2)",
    )
    .bind(follower_id)
    .bind(following_id)
    .fetch_one(pool)
    .await
}

/// Active users the given user follows, newest edge first.
pub async fn list_following(
    pool: &PgPool,
    user_id: Uuid,
    limit: i64,
    offset: i64,
) -> Result<Vec<FollowedUser>, sqlx::Error> {
    sqlx::query_as::<_, FollowedUser>(
        r#"
        SELECT u.id, u.username, u.name, u.profile_picture, f.created_at AS followed_at
        FROM follows f
        JOIN active_users u ON u.id = f.following_id
        WHERE f.follower_id = $1
        ORDER BY f.created_at DESC
        LIMIT $2 OFFSET $3
        "#,
    )
    .bind(user_id)
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await
}

pub async fn count_following(pool: &PgPool, user_id: Uuid) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar::<_, i64>(
        r#"
        SELECT COUNT(*)
        FROM follows f
        JOIN active_users u ON u.id = f.following_id
        WHERE f.follower_id = $1
        "#,
    )
    .bind(user_id)
    .fetch_one(pool)
    .await
}

/// Active users following the given user, newest edge first.
pub async fn list_followers(
    pool: &PgPool,
    user_id: Uuid,
    limit: i64,
    offset: i64,
) -> Result<Vec<FollowedUser>, sqlx::Error> {
    sqlx::query_as::<_, FollowedUser>(
        r#"
        SELECT u.id, u.username, u.name, u.profile_picture, f.created_at AS followed_at
        FROM follows f
        JOIN active_users u ON u.id = f.follower_id
        WHERE f.following_id = $1
        ORDER BY f.created_at DESC
        LIMIT $2 OFFSET $3
        "#,
    )
    .bind(user_id)
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await
}

pub async fn count_followers(pool: &PgPool, user_id: Uuid) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar::<_, i64>(
        r#"
        SELECT COUNT(*)
        FROM follows f
        JOIN active_users u ON u.id = f.follower_id
        WHERE f.following_id = $1
        "#,
    )
    .bind(user_id)
    .fetch_one(pool)
    .await
}

/// Both graph counts in one round trip, scoped to active counterpart users.
pub async fn counts(pool: &PgPool, user_id: Uuid) -> Result<FollowCounts, sqlx::Error> {
    let (follower_count, following_count) = sqlx::query_as::<_, (i64, i64)>(
        r#"
        SELECT
            (SELECT COUNT(*) FROM follows f JOIN active_users u ON u.id = f.follower_id
             WHERE f.following_id = $1),
            (SELECT COUNT(*) FROM follows f JOIN active_users u ON u.id = f.following_id
             WHERE f.follower_id = $1)
        "#,
    )
    .bind(user_id)
    .fetch_one(pool)
    .await?;

    Ok(FollowCounts {
        follower_count,
        following_count,
    })
}

/// Users where both directed edges exist: a self-join on the edge relation.
pub async fn list_mutuals(
    pool: &PgPool,
    user_id: Uuid,
    limit: i64,
    offset: i64,
) -> Result<Vec<UserSummary>, sqlx::Error> {
    sqlx::query_as::<_, UserSummary>(
        r#"
        SELECT u.id, u.username, u.name, u.profile_picture
        FROM follows f1
        JOIN follows f2
          ON f1.follower_id = f2.following_id AND f1.following_id = f2.follower_id
        JOIN active_users u ON u.id = f1.following_id
        WHERE f1.follower_id = $1
        ORDER BY f1.created_at DESC
        LIMIT $2 OFFSET $3
        "#,
    )
    .bind(user_id)
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await
}

pub async fn count_mutuals(pool: &PgPool, user_id: Uuid) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar::<_, i64>(
        r#"
        SELECT COUNT(*)
        FROM follows f1
        JOIN follows f2
          ON f1.follower_id = f2.following_id AND f1.following_id = f2.follower_id
        JOIN active_users u ON u.id = f1.following_id
        WHERE f1.follower_id = $1
        "#,
    )
    .bind(user_id)
    .fetch_one(pool)
    .await
}

/// Both directional edges between two users plus their conjunction.
pub async fn check_mutual(
    pool: &PgPool,
    user1_id: Uuid,
    user2_id: Uuid,
) -> Result<MutualCheck, sqlx::Error> {
    sqlx::query_as::<_, MutualCheck>(
        r#"
        SELECT
            EXISTS(SELECT 1 FROM follows WHERE follower_id = $1 AND following_id = $2)
                AS user1_follows_user2,
            EXISTS(SELECT 1 FROM follows WHERE follower_id = $2 AND following_id = $1)
                AS user2_follows_user1,
            EXISTS(SELECT 1 FROM follows WHERE follower_id = $1 AND following_id = $2)
                AND EXISTS(SELECT 1 FROM follows WHERE follower_id = $2 AND following_id = $1)
                AS mutual
        "#,
    )
    .bind(user1_id)
    .bind(user2_id)
    .fetch_one(pool)
    .await
}
