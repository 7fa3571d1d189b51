/// User and social-graph handlers
use actix_web::{web, HttpResponse};
use serde::Deserialize;
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use crate::authz;
use crate::error::{AppError, Result};
use crate::handlers::PaginationParams;
use crate::middleware::AuthUser;
use crate::models::{Pagination, UserPatch};
use crate::services::{FollowService, UserService};

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub query: Option<String>,
    #[serde(default = "super::default_limit")]
    pub limit: i64,
    #[serde(default)]
    pub offset: i64,
}

#[derive(Debug, Deserialize)]
pub struct FollowRequest {
    pub user_id: Uuid,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateProfileRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: Option<String>,

    #[validate(url)]
    pub profile_picture: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdatePasswordRequest {
    #[validate(length(min = 6))]
    pub password: String,
}

/// GET /api/users/search?query=
pub async fn search_users(
    pool: web::Data<PgPool>,
    _user: AuthUser,
    params: web::Query<SearchParams>,
) -> Result<HttpResponse> {
    let query = params.query.as_deref().unwrap_or("");
    let (limit, offset) = super::clamp_page(params.limit, params.offset);

    let service = UserService::new(pool.get_ref().clone());
    let (users, total) = service.search(query, limit, offset).await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "users": users,
        "pagination": Pagination::new(limit, offset, total),
    })))
}

/// GET /api/users/following
pub async fn get_following(
    pool: web::Data<PgPool>,
    user: AuthUser,
    params: web::Query<PaginationParams>,
) -> Result<HttpResponse> {
    let (limit, offset) = params.clamped();

    let service = FollowService::new(pool.get_ref().clone());
    let (following, total) = service.list_following(user.id, limit, offset).await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "following": following,
        "pagination": Pagination::new(limit, offset, total),
    })))
}

/// GET /api/users/followers
pub async fn get_followers(
    pool: web::Data<PgPool>,
    user: AuthUser,
    params: web::Query<PaginationParams>,
) -> Result<HttpResponse> {
    let (limit, offset) = params.clamped();

    let service = FollowService::new(pool.get_ref().clone());
    let (followers, total) = service.list_followers(user.id, limit, offset).await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "followers": followers,
        "pagination": Pagination::new(limit, offset, total),
    })))
}

/// GET /api/users/stats
pub async fn get_follow_stats(pool: web::Data<PgPool>, user: AuthUser) -> Result<HttpResponse> {
    let service = FollowService::new(pool.get_ref().clone());
    let counts = service.counts(user.id).await?;

    Ok(HttpResponse::Ok().json(counts))
}

/// GET /api/users/mutual
pub async fn get_mutual_follows(
    pool: web::Data<PgPool>,
    user: AuthUser,
    params: web::Query<PaginationParams>,
) -> Result<HttpResponse> {
    let (limit, offset) = params.clamped();

    let service = FollowService::new(pool.get_ref().clone());
    let (mutuals, total) = service.mutuals(user.id, limit, offset).await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "mutual_follows": mutuals,
        "pagination": Pagination::new(limit, offset, total),
    })))
}

/// POST /api/users/follow
pub async fn follow_user(
    pool: web::Data<PgPool>,
    user: AuthUser,
    req: web::Json<FollowRequest>,
) -> Result<HttpResponse> {
    let service = FollowService::new(pool.get_ref().clone());
    let follow = service.follow(user.id, req.user_id).await?;

    tracing::info!(follower = %user.id, following = %req.user_id, "follow created");

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "message": "User followed successfully",
        "follow": follow,
    })))
}

/// DELETE /api/users/unfollow
pub async fn unfollow_user(
    pool: web::Data<PgPool>,
    user: AuthUser,
    req: web::Json<FollowRequest>,
) -> Result<HttpResponse> {
    let service = FollowService::new(pool.get_ref().clone());
    service.unfollow(user.id, req.user_id).await?;

    tracing::info!(follower = %user.id, following = %req.user_id, "follow removed");

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "message": "User unfollowed successfully",
    })))
}

/// GET /api/users/{userId}
pub async fn get_user(
    pool: web::Data<PgPool>,
    _user: AuthUser,
    path: web::Path<Uuid>,
) -> Result<HttpResponse> {
    let service = UserService::new(pool.get_ref().clone());
    let profile = service.profile(path.into_inner()).await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({ "user": profile })))
}

/// GET /api/users/{userId}/follow-status
pub async fn get_follow_status(
    pool: web::Data<PgPool>,
    user: AuthUser,
    path: web::Path<Uuid>,
) -> Result<HttpResponse> {
    let service = FollowService::new(pool.get_ref().clone());
    let following = service.exists(user.id, path.into_inner()).await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({ "following": following })))
}

/// GET /api/users/{userId}/mutual/{otherId}
pub async fn check_mutual_follow(
    pool: web::Data<PgPool>,
    _user: AuthUser,
    path: web::Path<(Uuid, Uuid)>,
) -> Result<HttpResponse> {
    let (user1_id, user2_id) = path.into_inner();

    let service = FollowService::new(pool.get_ref().clone());
    let check = service.check_mutual(user1_id, user2_id).await?;

    Ok(HttpResponse::Ok().json(check))
}

/// PUT /api/users/{userId}
pub async fn update_profile(
    pool: web::Data<PgPool>,
    user: AuthUser,
    path: web::Path<Uuid>,
    req: web::Json<UpdateProfileRequest>,
) -> Result<HttpResponse> {
    authz::require_same_identity(path.into_inner(), user.id)?;
    req.validate().map_err(AppError::from)?;

    let patch = UserPatch {
        name: req.name.clone(),
        profile_picture: req.profile_picture.clone(),
    };

    let service = UserService::new(pool.get_ref().clone());
    let updated = service.update_profile(user.id, &patch).await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "message": "Profile updated successfully",
        "user": updated,
    })))
}

/// PUT /api/users/{userId}/password
pub async fn update_password(
    pool: web::Data<PgPool>,
    user: AuthUser,
    path: web::Path<Uuid>,
    req: web::Json<UpdatePasswordRequest>,
) -> Result<HttpResponse> {
    authz::require_same_identity(path.into_inner(), user.id)?;
    req.validate().map_err(AppError::from)?;

    let service = UserService::new(pool.get_ref().clone());
    service.update_password(user.id, &req.password).await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "message": "Password updated successfully",
    })))
}

/// DELETE /api/users/{userId}
pub async fn delete_user(
    pool: web::Data<PgPool>,
    user: AuthUser,
    path: web::Path<Uuid>,
) -> Result<HttpResponse> {
    authz::require_same_identity(path.into_inner(), user.id)?;

    let service = UserService::new(pool.get_ref().clone());
    service.soft_delete(user.id).await?;

    tracing::info!(user_id = %user.id, "account soft-deleted");

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "message": "Account deleted successfully",
    })))
}
