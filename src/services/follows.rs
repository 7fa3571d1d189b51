/// Social graph service: follow edges
use sqlx::PgPool;
use uuid::Uuid;

use crate::db::{follow_repo, user_repo};
use crate::error::{is_unique_violation, AppError, Result};
use crate::models::{Follow, FollowCounts, FollowedUser, MutualCheck, UserSummary};

#[derive(Clone)]
pub struct FollowService {
    pool: PgPool,
}

impl FollowService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a follow edge. Check order: self-follow, follower exists,
    /// followee exists, duplicate. The composite primary key closes the
    /// duplicate race.
    pub async fn follow(&self, follower_id: Uuid, following_id: Uuid) -> Result<Follow> {
        if follower_id == following_id {
            return Err(AppError::BusinessRule("Cannot follow yourself".to_string()));
        }

        if user_repo::find_by_id(&self.pool, follower_id).await?.is_none() {
            return Err(AppError::NotFound("Follower user not found".to_string()));
        }
        if user_repo::find_by_id(&self.pool, following_id).await?.is_none() {
            return Err(AppError::NotFound("Following user not found".to_string()));
        }

        if follow_repo::exists(&self.pool, follower_id, following_id).await? {
            return Err(AppError::Conflict(
                "Already following this user".to_string(),
            ));
        }

        follow_repo::insert(&self.pool, follower_id, following_id)
            .await
            .map_err(|e| {
                if is_unique_violation(&e) {
                    AppError::Conflict("Already following this user".to_string())
                } else {
                    AppError::Database(e)
                }
            })
    }

    /// Remove a follow edge; a no-op unfollow is a business-rule failure.
    pub async fn unfollow(&self, follower_id: Uuid, following_id: Uuid) -> Result<()> {
        let deleted = follow_repo::delete(&self.pool, follower_id, following_id).await?;
        if !deleted {
            return Err(AppError::BusinessRule(
                "Not following this user".to_string(),
            ));
        }
        Ok(())
    }

    pub async fn exists(&self, follower_id: Uuid, following_id: Uuid) -> Result<bool> {
        Ok(follow_repo::exists(&self.pool, follower_id, following_id).await?)
    }

    pub async fn list_following(
        &self,
        user_id: Uuid,
        limit: i64,
        offset: i64,
    ) -> Result<(Vec<FollowedUser>, i64)> {
        self.require_active_user(user_id).await?;
        let following = follow_repo::list_following(&self.pool, user_id, limit, offset).await?;
        let total = follow_repo::count_following(&self.pool, user_id).await?;
        Ok((following, total))
    }

    pub async fn list_followers(
        &self,
        user_id: Uuid,
        limit: i64,
        offset: i64,
    ) -> Result<(Vec<FollowedUser>, i64)> {
        self.require_active_user(user_id).await?;
        let followers = follow_repo::list_followers(&self.pool, user_id, limit, offset).await?;
        let total = follow_repo::count_followers(&self.pool, user_id).await?;
        Ok((followers, total))
    }

    /// Graph counts, scoped to active counterpart users.
    pub async fn counts(&self, user_id: Uuid) -> Result<FollowCounts> {
        self.require_active_user(user_id).await?;
        Ok(follow_repo::counts(&self.pool, user_id).await?)
    }

    pub async fn mutuals(
        &self,
        user_id: Uuid,
        limit: i64,
        offset: i64,
    ) -> Result<(Vec<UserSummary>, i64)> {
        self.require_active_user(user_id).await?;
        let mutuals = follow_repo::list_mutuals(&self.pool, user_id, limit, offset).await?;
        let total = follow_repo::count_mutuals(&self.pool, user_id).await?;
        Ok((mutuals, total))
    }

    pub async fn check_mutual(&self, user1_id: Uuid, user2_id: Uuid) -> Result<MutualCheck> {
        Ok(follow_repo::check_mutual(&self.pool, user1_id, user2_id).await?)
    }

    async fn require_active_user(&self, user_id: Uuid) -> Result<()> {
        if user_repo::find_by_id(&self.pool, user_id).await?.is_none() {
            return Err(AppError::NotFound("User not found".to_string()));
        }
        Ok(())
    }
}
