/// Engagement service: comments
use sqlx::PgPool;
use uuid::Uuid;

use crate::db::{comment_repo, post_repo, user_repo};
use crate::error::{AppError, Result};
use crate::models::{Comment, CommentDetail};

#[derive(Clone)]
pub struct CommentService {
    pool: PgPool,
}

impl CommentService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a comment. Gated on the post being visible and its comment
    /// toggle being on; any authenticated user may comment.
    pub async fn create(
        &self,
        user_id: Uuid,
        post_id: Uuid,
        content: &str,
    ) -> Result<CommentDetail> {
        let comments_enabled = post_repo::comments_toggle(&self.pool, post_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Post not found".to_string()))?;

        if !comments_enabled {
            return Err(AppError::BusinessRule(
                "Comments are disabled for this post".to_string(),
            ));
        }

        let comment = comment_repo::create_comment(&self.pool, user_id, post_id, content).await?;

        comment_repo::find_detail_by_id(&self.pool, comment.id)
            .await?
            .ok_or_else(|| AppError::Internal("created comment not visible".to_string()))
    }

    pub async fn get(&self, comment_id: Uuid) -> Result<CommentDetail> {
        comment_repo::find_detail_by_id(&self.pool, comment_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Comment not found".to_string()))
    }

    /// Replace content. The handler checks ownership against the loaded
    /// comment before calling this.
    pub async fn update(&self, comment_id: Uuid, content: &str) -> Result<Comment> {
        comment_repo::update_comment(&self.pool, comment_id, content)
            .await?
            .ok_or_else(|| AppError::NotFound("Comment not found".to_string()))
    }

    /// Soft delete. Same external ownership precondition as update.
    pub async fn soft_delete(&self, comment_id: Uuid) -> Result<()> {
        let deleted = comment_repo::soft_delete(&self.pool, comment_id).await?;
        if !deleted {
            return Err(AppError::NotFound("Comment not found".to_string()));
        }
        Ok(())
    }

    pub async fn list_for_post(
        &self,
        post_id: Uuid,
        limit: i64,
        offset: i64,
    ) -> Result<(Vec<CommentDetail>, i64)> {
        if !post_repo::exists_active(&self.pool, post_id).await? {
            return Err(AppError::NotFound("Post not found".to_string()));
        }

        let comments = comment_repo::list_for_post(&self.pool, post_id, limit, offset).await?;
        let total = comment_repo::count_for_post(&self.pool, post_id).await?;
        Ok((comments, total))
    }

    pub async fn list_for_user(
        &self,
        user_id: Uuid,
        limit: i64,
        offset: i64,
    ) -> Result<(Vec<CommentDetail>, i64)> {
        if user_repo::find_by_id(&self.pool, user_id).await?.is_none() {
            return Err(AppError::NotFound("User not found".to_string()));
        }

        let comments = comment_repo::list_for_user(&self.pool, user_id, limit, offset).await?;
        let total = comment_repo::count_for_user(&self.pool, user_id).await?;
        Ok((comments, total))
    }

    pub async fn count_for_post(&self, post_id: Uuid) -> Result<i64> {
        Ok(comment_repo::count_for_post(&self.pool, post_id).await?)
    }
}
