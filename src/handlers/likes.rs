/// Like handlers
use actix_web::{web, HttpResponse};
use serde::Deserialize;
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::Result;
use crate::handlers::PaginationParams;
use crate::middleware::AuthUser;
use crate::models::{Pagination, TimeWindow};
use crate::services::LikeService;

#[derive(Debug, Deserialize)]
pub struct PopularParams {
    #[serde(default)]
    pub window: TimeWindow,
    #[serde(default = "default_popular_limit")]
    pub limit: i64,
}

fn default_popular_limit() -> i64 {
    10
}

/// POST /api/likes/{postId}/like
pub async fn like_post(
    pool: web::Data<PgPool>,
    user: AuthUser,
    path: web::Path<Uuid>,
) -> Result<HttpResponse> {
    let service = LikeService::new(pool.get_ref().clone());
    let like = service.like(user.id, path.into_inner()).await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "message": "Post liked",
        "like": like,
    })))
}

/// DELETE /api/likes/{postId}/like
pub async fn unlike_post(
    pool: web::Data<PgPool>,
    user: AuthUser,
    path: web::Path<Uuid>,
) -> Result<HttpResponse> {
    let service = LikeService::new(pool.get_ref().clone());
    let like = service.unlike(user.id, path.into_inner()).await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "message": "Like removed",
        "like": like,
    })))
}

/// GET /api/likes/popular?window=&limit=
pub async fn get_popular_posts(
    pool: web::Data<PgPool>,
    params: web::Query<PopularParams>,
) -> Result<HttpResponse> {
    let limit = params.limit.clamp(1, 100);

    let service = LikeService::new(pool.get_ref().clone());
    let posts = service.most_liked(params.window, limit).await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({ "posts": posts })))
}

/// GET /api/likes/{postId}
pub async fn get_post_likes(
    pool: web::Data<PgPool>,
    path: web::Path<Uuid>,
    params: web::Query<PaginationParams>,
) -> Result<HttpResponse> {
    let (limit, offset) = params.clamped();

    let service = LikeService::new(pool.get_ref().clone());
    let (likes, total) = service
        .list_for_post(path.into_inner(), limit, offset)
        .await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "likes": likes,
        "pagination": Pagination::new(limit, offset, total),
    })))
}

/// GET /api/likes/{postId}/me
pub async fn get_like_status(
    pool: web::Data<PgPool>,
    user: AuthUser,
    path: web::Path<Uuid>,
) -> Result<HttpResponse> {
    let service = LikeService::new(pool.get_ref().clone());
    let liked = service.has_liked(user.id, path.into_inner()).await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({ "liked": liked })))
}

/// GET /api/likes/user/{userId}
pub async fn get_user_likes(
    pool: web::Data<PgPool>,
    path: web::Path<Uuid>,
    params: web::Query<PaginationParams>,
) -> Result<HttpResponse> {
    let (limit, offset) = params.clamped();

    let service = LikeService::new(pool.get_ref().clone());
    let (liked_posts, total) = service
        .list_for_user(path.into_inner(), limit, offset)
        .await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "liked_posts": liked_posts,
        "pagination": Pagination::new(limit, offset, total),
    })))
}

/// GET /api/likes/user/{userId}/received
pub async fn get_received_likes(
    pool: web::Data<PgPool>,
    path: web::Path<Uuid>,
    params: web::Query<PaginationParams>,
) -> Result<HttpResponse> {
    let (limit, _) = params.clamped();

    let service = LikeService::new(pool.get_ref().clone());
    let likes = service.recent_for_author(path.into_inner(), limit).await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({ "likes": likes })))
}
