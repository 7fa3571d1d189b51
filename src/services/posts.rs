/// Content service: posts, feed, search
use sqlx::PgPool;
use uuid::Uuid;

use crate::db::{post_repo, user_repo};
use crate::error::{AppError, Result};
use crate::models::{Post, PostDetail, PostPatch};

#[derive(Clone)]
pub struct PostService {
    pool: PgPool,
}

impl PostService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(
        &self,
        user_id: Uuid,
        content: &str,
        media_url: Option<&str>,
        comments_enabled: bool,
    ) -> Result<Post> {
        let post =
            post_repo::create_post(&self.pool, user_id, content, media_url, comments_enabled)
                .await?;
        Ok(post)
    }

    /// A post is visible only while both it and its author are active.
    pub async fn get(&self, post_id: Uuid, viewer_id: Option<Uuid>) -> Result<PostDetail> {
        post_repo::find_detail_by_id(&self.pool, post_id, viewer_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Post not found".to_string()))
    }

    pub async fn list_by_user(
        &self,
        user_id: Uuid,
        viewer_id: Option<Uuid>,
        limit: i64,
        offset: i64,
    ) -> Result<(Vec<PostDetail>, i64)> {
        if user_repo::find_by_id(&self.pool, user_id).await?.is_none() {
            return Err(AppError::NotFound("User not found".to_string()));
        }

        let posts = post_repo::list_by_user(&self.pool, user_id, viewer_id, limit, offset).await?;
        let total = post_repo::count_by_user(&self.pool, user_id).await?;
        Ok((posts, total))
    }

    pub async fn list_with_media(
        &self,
        user_id: Uuid,
        viewer_id: Option<Uuid>,
        limit: i64,
        offset: i64,
    ) -> Result<(Vec<PostDetail>, i64)> {
        if user_repo::find_by_id(&self.pool, user_id).await?.is_none() {
            return Err(AppError::NotFound("User not found".to_string()));
        }

        let posts =
            post_repo::list_with_media(&self.pool, user_id, viewer_id, limit, offset).await?;
        let total = post_repo::count_with_media(&self.pool, user_id).await?;
        Ok((posts, total))
    }

    /// Ownership and existence ride in the UPDATE's WHERE clause; a miss is
    /// reported as not-found without revealing whether the post exists.
    pub async fn update(&self, post_id: Uuid, user_id: Uuid, patch: &PostPatch) -> Result<Post> {
        if patch.is_empty() {
            return Err(AppError::BusinessRule("No fields to update".to_string()));
        }

        post_repo::update_post(&self.pool, post_id, user_id, patch)
            .await?
            .ok_or_else(|| AppError::NotFound("Post not found or not authorized".to_string()))
    }

    pub async fn soft_delete(&self, post_id: Uuid, user_id: Uuid) -> Result<()> {
        let deleted = post_repo::soft_delete(&self.pool, post_id, user_id).await?;
        if !deleted {
            return Err(AppError::NotFound(
                "Post not found or not authorized".to_string(),
            ));
        }
        Ok(())
    }

    /// Chronological feed over the caller's own and followed authors' posts.
    pub async fn feed(
        &self,
        user_id: Uuid,
        limit: i64,
        offset: i64,
    ) -> Result<(Vec<PostDetail>, i64)> {
        let posts = post_repo::feed(&self.pool, user_id, limit, offset).await?;
        let total = post_repo::feed_count(&self.pool, user_id).await?;
        Ok((posts, total))
    }

    pub async fn search(
        &self,
        query: &str,
        viewer_id: Option<Uuid>,
        limit: i64,
        offset: i64,
    ) -> Result<(Vec<PostDetail>, i64)> {
        let posts = post_repo::search(&self.pool, query, viewer_id, limit, offset).await?;
        let total = post_repo::search_count(&self.pool, query).await?;
        Ok((posts, total))
    }
}
