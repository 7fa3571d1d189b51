/// Post handlers: creation, feed, search, listing, mutation
use actix_web::{web, HttpResponse};
use serde::Deserialize;
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use crate::error::{AppError, Result};
use crate::handlers::PaginationParams;
use crate::middleware::{AuthUser, MaybeUser};
use crate::models::{Pagination, PostPatch};
use crate::services::PostService;

#[derive(Debug, Deserialize, Validate)]
pub struct CreatePostRequest {
    #[validate(length(min = 1, max = 1000))]
    pub content: String,

    #[validate(url)]
    pub media_url: Option<String>,

    #[serde(default = "default_comments_enabled")]
    pub comments_enabled: bool,
}

fn default_comments_enabled() -> bool {
    true
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdatePostRequest {
    #[validate(length(min = 1, max = 1000))]
    pub content: Option<String>,

    #[validate(url)]
    pub media_url: Option<String>,

    pub comments_enabled: Option<bool>,
}

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub q: Option<String>,
    #[serde(default = "super::default_limit")]
    pub limit: i64,
    #[serde(default)]
    pub offset: i64,
}

/// POST /api/posts
pub async fn create_post(
    pool: web::Data<PgPool>,
    user: AuthUser,
    req: web::Json<CreatePostRequest>,
) -> Result<HttpResponse> {
    req.validate().map_err(AppError::from)?;

    let service = PostService::new(pool.get_ref().clone());
    let post = service
        .create(
            user.id,
            &req.content,
            req.media_url.as_deref(),
            req.comments_enabled,
        )
        .await?;

    Ok(HttpResponse::Created().json(serde_json::json!({ "post": post })))
}

/// GET /api/posts/my
pub async fn get_my_posts(
    pool: web::Data<PgPool>,
    user: AuthUser,
    params: web::Query<PaginationParams>,
) -> Result<HttpResponse> {
    let (limit, offset) = params.clamped();

    let service = PostService::new(pool.get_ref().clone());
    let (posts, total) = service
        .list_by_user(user.id, Some(user.id), limit, offset)
        .await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "posts": posts,
        "pagination": Pagination::new(limit, offset, total),
    })))
}

/// GET /api/posts/feed
pub async fn get_feed(
    pool: web::Data<PgPool>,
    user: AuthUser,
    params: web::Query<PaginationParams>,
) -> Result<HttpResponse> {
    let (limit, offset) = params.clamped();

    let service = PostService::new(pool.get_ref().clone());
    let (posts, total) = service.feed(user.id, limit, offset).await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "posts": posts,
        "pagination": Pagination::new(limit, offset, total),
    })))
}

/// GET /api/posts/search?q=
pub async fn search_posts(
    pool: web::Data<PgPool>,
    viewer: MaybeUser,
    params: web::Query<SearchParams>,
) -> Result<HttpResponse> {
    let query = params
        .q
        .as_deref()
        .filter(|q| !q.is_empty())
        .ok_or_else(|| AppError::Validation("Missing search query".to_string()))?;
    let (limit, offset) = super::clamp_page(params.limit, params.offset);

    let service = PostService::new(pool.get_ref().clone());
    let (posts, total) = service.search(query, viewer.id(), limit, offset).await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "posts": posts,
        "pagination": Pagination::new(limit, offset, total),
    })))
}

/// GET /api/posts/user/{userId}
pub async fn get_user_posts(
    pool: web::Data<PgPool>,
    viewer: MaybeUser,
    path: web::Path<Uuid>,
    params: web::Query<PaginationParams>,
) -> Result<HttpResponse> {
    let (limit, offset) = params.clamped();

    let service = PostService::new(pool.get_ref().clone());
    let (posts, total) = service
        .list_by_user(path.into_inner(), viewer.id(), limit, offset)
        .await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "posts": posts,
        "pagination": Pagination::new(limit, offset, total),
    })))
}

/// GET /api/posts/user/{userId}/media
pub async fn get_user_media_posts(
    pool: web::Data<PgPool>,
    viewer: MaybeUser,
    path: web::Path<Uuid>,
    params: web::Query<PaginationParams>,
) -> Result<HttpResponse> {
    let (limit, offset) = params.clamped();

    let service = PostService::new(pool.get_ref().clone());
    let (posts, total) = service
        .list_with_media(path.into_inner(), viewer.id(), limit, offset)
        .await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "posts": posts,
        "pagination": Pagination::new(limit, offset, total),
    })))
}

/// GET /api/posts/{postId}
pub async fn get_post(
    pool: web::Data<PgPool>,
    viewer: MaybeUser,
    path: web::Path<Uuid>,
) -> Result<HttpResponse> {
    let service = PostService::new(pool.get_ref().clone());
    let post = service.get(path.into_inner(), viewer.id()).await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({ "post": post })))
}

/// PUT /api/posts/{postId}
pub async fn update_post(
    pool: web::Data<PgPool>,
    user: AuthUser,
    path: web::Path<Uuid>,
    req: web::Json<UpdatePostRequest>,
) -> Result<HttpResponse> {
    req.validate().map_err(AppError::from)?;

    let patch = PostPatch {
        content: req.content.clone(),
        media_url: req.media_url.clone(),
        comments_enabled: req.comments_enabled,
    };

    let service = PostService::new(pool.get_ref().clone());
    let post = service.update(path.into_inner(), user.id, &patch).await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({ "post": post })))
}

/// DELETE /api/posts/{postId}
pub async fn delete_post(
    pool: web::Data<PgPool>,
    user: AuthUser,
    path: web::Path<Uuid>,
) -> Result<HttpResponse> {
    let service = PostService::new(pool.get_ref().clone());
    service.soft_delete(path.into_inner(), user.id).await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "message": "Post deleted successfully",
    })))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn content_length_bounds_are_enforced() {
        let req = CreatePostRequest {
            content: "".into(),
            media_url: None,
            comments_enabled: true,
        };
        assert!(req.validate().is_err());

        let req = CreatePostRequest {
            content: "x".repeat(1001),
            media_url: None,
            comments_enabled: true,
        };
        assert!(req.validate().is_err());

        let req = CreatePostRequest {
            content: "hello".into(),
            media_url: None,
            comments_enabled: true,
        };
        assert!(req.validate().is_ok());
    }

    #[test]
    fn media_url_must_be_a_url() {
        let req = CreatePostRequest {
            content: "hello".into(),
            media_url: Some("not a url".into()),
            comments_enabled: true,
        };
        assert!(req.validate().is_err());

        let req = CreatePostRequest {
            content: "hello".into(),
            media_url: Some("https://cdn.example.com/pic.jpg".into()),
            comments_enabled: true,
        };
        assert!(req.validate().is_ok());
    }

    #[test]
    fn comments_toggle_defaults_on() {
        let req: CreatePostRequest =
            serde_json::from_str(r#"{"content": "hello"}"#).unwrap();
        assert!(req.comments_enabled);
    }

    #[test]
    fn update_request_allows_partial_bodies() {
        let req: UpdatePostRequest = serde_json::from_str(r#"{}"#).unwrap();
        assert!(req.validate().is_ok());
        assert!(req.content.is_none());
    }
}
