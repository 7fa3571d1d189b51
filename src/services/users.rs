/// Identity service: registration, authentication, profiles
use sqlx::PgPool;
use uuid::Uuid;

use crate::db::{follow_repo, post_repo, user_repo};
use crate::error::{is_unique_violation, AppError, Result};
use crate::models::{PublicUser, UserPatch, UserProfile, UserSummary};
use crate::security::password;

#[derive(Clone)]
pub struct UserService {
    pool: PgPool,
}

impl UserService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Register a new user. The pre-checks produce the friendly per-field
    /// conflict; the partial unique indexes close the race, and a lost race
    /// surfaces as the same Conflict.
    pub async fn register(
        &self,
        username: &str,
        email: &str,
        plaintext_password: &str,
        name: &str,
    ) -> Result<PublicUser> {
        if user_repo::username_exists(&self.pool, username).await? {
            return Err(AppError::Conflict("Username already exists".to_string()));
        }
        if user_repo::email_exists(&self.pool, email).await? {
            return Err(AppError::Conflict("Email already exists".to_string()));
        }

        let password_hash = password::hash_password(plaintext_password)?;

        user_repo::create_user(&self.pool, username, email, &password_hash, name)
            .await
            .map_err(|e| {
                if is_unique_violation(&e) {
                    AppError::Conflict("Username or email already exists".to_string())
                } else {
                    AppError::Database(e)
                }
            })
    }

    /// Verify credentials. A missing user and a wrong password are
    /// indistinguishable to the caller.
    pub async fn authenticate(
        &self,
        username: &str,
        plaintext_password: &str,
    ) -> Result<PublicUser> {
        let invalid = || AppError::Unauthorized("Invalid credentials".to_string());

        let user = user_repo::find_credentials_by_username(&self.pool, username)
            .await?
            .ok_or_else(invalid)?;

        if !password::verify_password(plaintext_password, &user.password_hash)? {
            return Err(invalid());
        }

        Ok(PublicUser {
            id: user.id,
            username: user.username,
            email: user.email,
            name: user.name,
            profile_picture: user.profile_picture,
            created_at: user.created_at,
        })
    }

    pub async fn get_by_id(&self, user_id: Uuid) -> Result<PublicUser> {
        user_repo::find_by_id(&self.pool, user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))
    }

    pub async fn get_by_username(&self, username: &str) -> Result<PublicUser> {
        user_repo::find_by_username(&self.pool, username)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))
    }

    pub async fn get_by_email(&self, email: &str) -> Result<PublicUser> {
        user_repo::find_by_email(&self.pool, email)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))
    }

    /// Public projection plus live graph and content counts.
    pub async fn profile(&self, user_id: Uuid) -> Result<UserProfile> {
        let user = self.get_by_id(user_id).await?;
        let counts = follow_repo::counts(&self.pool, user_id).await?;
        let post_count = post_repo::count_by_user(&self.pool, user_id).await?;

        Ok(UserProfile {
            user,
            follower_count: counts.follower_count,
            following_count: counts.following_count,
            post_count,
        })
    }

    pub async fn search(
        &self,
        query: &str,
        limit: i64,
        offset: i64,
    ) -> Result<(Vec<UserSummary>, i64)> {
        let users = user_repo::search(&self.pool, query, limit, offset).await?;
        let total = user_repo::search_count(&self.pool, query).await?;
        Ok((users, total))
    }

    pub async fn update_profile(&self, user_id: Uuid, patch: &UserPatch) -> Result<PublicUser> {
        if patch.is_empty() {
            return Err(AppError::BusinessRule("No fields to update".to_string()));
        }

        user_repo::update_profile(&self.pool, user_id, patch)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))
    }

    pub async fn update_password(&self, user_id: Uuid, new_password: &str) -> Result<()> {
        let password_hash = password::hash_password(new_password)?;
        let updated = user_repo::update_password(&self.pool, user_id, &password_hash).await?;
        if !updated {
            return Err(AppError::NotFound("User not found".to_string()));
        }
        Ok(())
    }

    /// Soft delete. Posts, comments, and edges are untouched; the active
    /// views hide them from every subsequent read.
    pub async fn soft_delete(&self, user_id: Uuid) -> Result<()> {
        let deleted = user_repo::soft_delete(&self.pool, user_id).await?;
        if !deleted {
            return Err(AppError::NotFound("User not found".to_string()));
        }
        Ok(())
    }
}
