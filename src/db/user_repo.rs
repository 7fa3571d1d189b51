/// User repository
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::{PublicUser, User, UserPatch, UserSummary};

/// Insert a new user. The partial unique indexes on username/email are the
/// authoritative duplicate guard; callers map unique violations to Conflict.
pub async fn create_user(
    pool: &PgPool,
    username: &str,
    email: &str,
    password_hash: &str,
    name: &str,
) -> Result<PublicUser, sqlx::Error> {
    sqlx::query_as::<_, PublicUser>(
        r#"
        INSERT INTO users (username, email, password_hash, name)
        VALUES ($1, $2, $3, $4)
        RETURNING id, username, email, name, profile_picture, created_at
        "#,
    )
    .bind(username)
    .bind(email)
    .bind(password_hash)
    .bind(name)
    .fetch_one(pool)
    .await
}

/// Find an active user by id (public projection).
pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<PublicUser>, sqlx::Error> {
    sqlx::query_as::<_, PublicUser>(
        r#"
        SELECT id, username, email, name, profile_picture, created_at
        FROM active_users
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await
}

/// Find an active user by username (public projection).
pub async fn find_by_username(
    pool: &PgPool,
    username: &str,
) -> Result<Option<PublicUser>, sqlx::Error> {
    sqlx::query_as::<_, PublicUser>(
        r#"
        SELECT id, username, email, name, profile_picture, created_at
        FROM active_users
        WHERE username = $1
        "#,
    )
    .bind(username)
    .fetch_optional(pool)
    .await
}

/// Find an active user by email (public projection).
pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<PublicUser>, sqlx::Error> {
    sqlx::query_as::<_, PublicUser>(
        r#"
        SELECT id, username, email, name, profile_picture, created_at
        FROM active_users
        WHERE email = $1
        "#,
    )
    .bind(email)
    .fetch_optional(pool)
    .await
}

/// Full row for credential verification. Only the authenticate flow reads
/// the password hash.
pub async fn find_credentials_by_username(
    pool: &PgPool,
    username: &str,
) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>(
        r#"
        SELECT id, username, email, password_hash, name, profile_picture, created_at, updated_at
        FROM active_users
        WHERE username = $1
        "#,
    )
    .bind(username)
    .fetch_optional(pool)
    .await
}

/// Check whether a username is held by an active user.
pub async fn username_exists(pool: &PgPool, username: &str) -> Result<bool, sqlx::Error> {
    sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM active_users WHERE username = $1)")
        .bind(username)
        .fetch_one(pool)
        .await
}

/// Check whether an email is held by an active user.
pub async fn email_exists(pool: &PgPool, email: &str) -> Result<bool, sqlx::Error> {
    sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM active_users WHERE email = $1)")
        .bind(email)
        .fetch_one(pool)
        .await
}

/// Case-insensitive substring search over username and display name.
pub async fn search(
    pool: &PgPool,
    query: &str,
    limit: i64,
    offset: i64,
) -> Result<Vec<UserSummary>, sqlx::Error> {
    let term = format!("%{}%", query);
    sqlx::query_as::<_, UserSummary>(
        r#"
        SELECT id, username, name, profile_picture
        FROM active_users
        WHERE username ILIKE $1 OR name ILIKE $1
        ORDER BY username
        LIMIT $2 OFFSET $3
        "#,
    )
    .bind(term)
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await
}

pub async fn search_count(pool: &PgPool, query: &str) -> Result<i64, sqlx::Error> {
    let term = format!("%{}%", query);
    sqlx::query_scalar::<_, i64>(
        "SELECT COUNT(*) FROM active_users WHERE username ILIKE $1 OR name ILIKE $1",
    )
    .bind(term)
    .fetch_one(pool)
    .await
}

/// Apply a profile patch to an active user. Absent fields keep their
/// current value; the statement is fully parameterized, never assembled.
pub async fn update_profile(
    pool: &PgPool,
    user_id: Uuid,
    patch: &UserPatch,
) -> Result<Option<PublicUser>, sqlx::Error> {
    sqlx::query_as::<_, PublicUser>(
        r#"
        UPDATE users
        SET name = COALESCE($2, name),
            profile_picture = COALESCE($3, profile_picture),
            updated_at = NOW()
        WHERE id = $1 AND deleted_at IS NULL
        RETURNING id, username, email, name, profile_picture, created_at
        "#,
    )
    .bind(user_id)
    .bind(patch.name.as_deref())
    .bind(patch.profile_picture.as_deref())
    .fetch_optional(pool)
    .await
}

/// Replace the stored credential hash. Returns whether a row changed.
pub async fn update_password(
    pool: &PgPool,
    user_id: Uuid,
    password_hash: &str,
) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(
        r#"
        UPDATE users
        SET password_hash = $2, updated_at = NOW()
        WHERE id = $1 AND deleted_at IS NULL
        "#,
    )
    .bind(user_id)
    .bind(password_hash)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}

/// Soft delete a user. Content and edges stay stored; the active views hide
/// them from every read.
pub async fn soft_delete(pool: &PgPool, user_id: Uuid) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(
        r#"
        UPDATE users
        SET deleted_at = NOW(), updated_at = NOW()
        WHERE id = $1 AND deleted_at IS NULL
        "#,
    )
    .bind(user_id)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}
