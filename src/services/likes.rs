/// Engagement service: like edges
use sqlx::PgPool;
use uuid::Uuid;

use crate::db::{like_repo, post_repo, user_repo};
use crate::error::{is_unique_violation, AppError, Result};
use crate::models::{Like, LikedPost, Liker, PostDetail, ReceivedLike, TimeWindow};

#[derive(Clone)]
pub struct LikeService {
    pool: PgPool,
}

impl LikeService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a like edge. Check order: user exists, post exists, duplicate.
    /// Self-likes are allowed and count like any other like. The unique
    /// (user_id, post_id) index closes the duplicate race.
    pub async fn like(&self, user_id: Uuid, post_id: Uuid) -> Result<Like> {
        if user_repo::find_by_id(&self.pool, user_id).await?.is_none() {
            return Err(AppError::NotFound("User not found".to_string()));
        }
        if !post_repo::exists_active(&self.pool, post_id).await? {
            return Err(AppError::NotFound("Post not found".to_string()));
        }
        if like_repo::exists(&self.pool, user_id, post_id).await? {
            return Err(AppError::Conflict("Already liked this post".to_string()));
        }

        like_repo::insert(&self.pool, user_id, post_id)
            .await
            .map_err(|e| {
                if is_unique_violation(&e) {
                    AppError::Conflict("Already liked this post".to_string())
                } else {
                    AppError::Database(e)
                }
            })
    }

    /// Remove a like edge, returning the removed edge.
    pub async fn unlike(&self, user_id: Uuid, post_id: Uuid) -> Result<Like> {
        like_repo::delete(&self.pool, user_id, post_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Like not found".to_string()))
    }

    pub async fn has_liked(&self, user_id: Uuid, post_id: Uuid) -> Result<bool> {
        Ok(like_repo::exists(&self.pool, user_id, post_id).await?)
    }

    pub async fn list_for_post(
        &self,
        post_id: Uuid,
        limit: i64,
        offset: i64,
    ) -> Result<(Vec<Liker>, i64)> {
        if !post_repo::exists_active(&self.pool, post_id).await? {
            return Err(AppError::NotFound("Post not found".to_string()));
        }

        let likers = like_repo::list_for_post(&self.pool, post_id, limit, offset).await?;
        let total = like_repo::count_for_post(&self.pool, post_id).await?;
        Ok((likers, total))
    }

    pub async fn list_for_user(
        &self,
        user_id: Uuid,
        limit: i64,
        offset: i64,
    ) -> Result<(Vec<LikedPost>, i64)> {
        if user_repo::find_by_id(&self.pool, user_id).await?.is_none() {
            return Err(AppError::NotFound("User not found".to_string()));
        }

        let posts = like_repo::list_for_user(&self.pool, user_id, limit, offset).await?;
        let total = like_repo::count_for_user(&self.pool, user_id).await?;
        Ok((posts, total))
    }

    pub async fn most_liked(&self, window: TimeWindow, limit: i64) -> Result<Vec<PostDetail>> {
        Ok(like_repo::most_liked(&self.pool, window, limit).await?)
    }

    /// Recent likes received across a user's posts.
    pub async fn recent_for_author(&self, user_id: Uuid, limit: i64) -> Result<Vec<ReceivedLike>> {
        if user_repo::find_by_id(&self.pool, user_id).await?.is_none() {
            return Err(AppError::NotFound("User not found".to_string()));
        }

        Ok(like_repo::recent_for_author(&self.pool, user_id, limit).await?)
    }
}
