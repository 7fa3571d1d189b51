/// Comment handlers
use actix_web::{web, HttpResponse};
use serde::Deserialize;
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use crate::authz;
use crate::error::{AppError, Result};
use crate::handlers::PaginationParams;
use crate::middleware::AuthUser;
use crate::models::{PagePagination, Pagination};
use crate::services::CommentService;

#[derive(Debug, Deserialize, Validate)]
pub struct CommentRequest {
    #[validate(length(min = 1, max = 1000))]
    pub content: String,
}

/// The comment listing is page-addressed, matching the wire contract.
#[derive(Debug, Deserialize)]
pub struct CommentPageParams {
    #[serde(default = "default_page")]
    pub page: i64,
    #[serde(default = "super::default_limit")]
    pub limit: i64,
}

fn default_page() -> i64 {
    1
}

/// POST /api/comments/post/{postId}
pub async fn create_comment(
    pool: web::Data<PgPool>,
    user: AuthUser,
    path: web::Path<Uuid>,
    req: web::Json<CommentRequest>,
) -> Result<HttpResponse> {
    req.validate().map_err(AppError::from)?;

    let post_id = path.into_inner();
    let service = CommentService::new(pool.get_ref().clone());
    let comment = service.create(user.id, post_id, &req.content).await?;

    tracing::info!(user_id = %user.id, post_id = %post_id, "comment created");

    Ok(HttpResponse::Created().json(serde_json::json!({
        "message": "Comment created successfully",
        "comment": comment,
    })))
}

/// GET /api/comments/post/{postId}?page=&limit=
pub async fn get_post_comments(
    pool: web::Data<PgPool>,
    path: web::Path<Uuid>,
    params: web::Query<CommentPageParams>,
) -> Result<HttpResponse> {
    let page = params.page.max(1);
    let (limit, _) = super::clamp_page(params.limit, 0);
    let offset = (page - 1) * limit;

    let service = CommentService::new(pool.get_ref().clone());
    let (comments, total) = service
        .list_for_post(path.into_inner(), limit, offset)
        .await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "comments": comments,
        "pagination": PagePagination::new(page, limit, total),
    })))
}

/// GET /api/comments/user/{userId}
pub async fn get_user_comments(
    pool: web::Data<PgPool>,
    path: web::Path<Uuid>,
    params: web::Query<PaginationParams>,
) -> Result<HttpResponse> {
    let (limit, offset) = params.clamped();

    let service = CommentService::new(pool.get_ref().clone());
    let (comments, total) = service
        .list_for_user(path.into_inner(), limit, offset)
        .await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "comments": comments,
        "pagination": Pagination::new(limit, offset, total),
    })))
}

/// GET /api/comments/post/{postId}/count
pub async fn get_comment_count(
    pool: web::Data<PgPool>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse> {
    let service = CommentService::new(pool.get_ref().clone());
    let count = service.count_for_post(path.into_inner()).await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({ "count": count })))
}

/// PUT /api/comments/{commentId}
pub async fn update_comment(
    pool: web::Data<PgPool>,
    user: AuthUser,
    path: web::Path<Uuid>,
    req: web::Json<CommentRequest>,
) -> Result<HttpResponse> {
    req.validate().map_err(AppError::from)?;

    let comment_id = path.into_inner();
    let service = CommentService::new(pool.get_ref().clone());

    let existing = service.get(comment_id).await?;
    authz::require_ownership(existing.user_id, user.id)?;

    let comment = service.update(comment_id, &req.content).await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "message": "Comment updated successfully",
        "comment": comment,
    })))
}

/// DELETE /api/comments/{commentId}
pub async fn delete_comment(
    pool: web::Data<PgPool>,
    user: AuthUser,
    path: web::Path<Uuid>,
) -> Result<HttpResponse> {
    let comment_id = path.into_inner();
    let service = CommentService::new(pool.get_ref().clone());

    let existing = service.get(comment_id).await?;
    authz::require_ownership(existing.user_id, user.id)?;

    service.soft_delete(comment_id).await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "message": "Comment deleted successfully",
    })))
}
