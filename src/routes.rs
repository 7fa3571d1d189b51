//! Route configuration
//!
//! Centralized route setup. Literal path segments are registered ahead of
//! dynamic ones inside each scope so `/posts/feed` never matches
//! `/posts/{post_id}`.

use actix_web::{web, HttpResponse};
use chrono::Utc;
use sqlx::PgPool;

use crate::handlers;

/// Configure all routes for the application
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health_check))
        .service(
            web::scope("/api")
                .service(
                    web::scope("/auth")
                        .route("/register", web::post().to(handlers::auth::register))
                        .route("/login", web::post().to(handlers::auth::login))
                        .route("/me", web::get().to(handlers::auth::me)),
                )
                .service(
                    web::scope("/users")
                        .route("/search", web::get().to(handlers::users::search_users))
                        .route("/following", web::get().to(handlers::users::get_following))
                        .route("/followers", web::get().to(handlers::users::get_followers))
                        .route("/stats", web::get().to(handlers::users::get_follow_stats))
                        .route("/mutual", web::get().to(handlers::users::get_mutual_follows))
                        .route("/follow", web::post().to(handlers::users::follow_user))
                        .route("/unfollow", web::delete().to(handlers::users::unfollow_user))
                        .route(
                            "/{user_id}/follow-status",
                            web::get().to(handlers::users::get_follow_status),
                        )
                        .route(
                            "/{user_id}/mutual/{other_id}",
                            web::get().to(handlers::users::check_mutual_follow),
                        )
                        .route(
                            "/{user_id}/password",
                            web::put().to(handlers::users::update_password),
                        )
                        .service(
                            web::resource("/{user_id}")
                                .route(web::get().to(handlers::users::get_user))
                                .route(web::put().to(handlers::users::update_profile))
                                .route(web::delete().to(handlers::users::delete_user)),
                        ),
                )
                .service(
                    web::scope("/posts")
                        .route("/my", web::get().to(handlers::posts::get_my_posts))
                        .route("/feed", web::get().to(handlers::posts::get_feed))
                        .route("/search", web::get().to(handlers::posts::search_posts))
                        .route(
                            "/user/{user_id}/media",
                            web::get().to(handlers::posts::get_user_media_posts),
                        )
                        .route(
                            "/user/{user_id}",
                            web::get().to(handlers::posts::get_user_posts),
                        )
                        .service(
                            web::resource("")
                                .route(web::post().to(handlers::posts::create_post)),
                        )
                        .service(
                            web::resource("/{post_id}")
                                .route(web::get().to(handlers::posts::get_post))
                                .route(web::put().to(handlers::posts::update_post))
                                .route(web::delete().to(handlers::posts::delete_post)),
                        ),
                )
                .service(
                    web::scope("/likes")
                        .route("/popular", web::get().to(handlers::likes::get_popular_posts))
                        .route(
                            "/user/{user_id}/received",
                            web::get().to(handlers::likes::get_received_likes),
                        )
                        .route(
                            "/user/{user_id}",
                            web::get().to(handlers::likes::get_user_likes),
                        )
                        .service(
                            web::resource("/{post_id}/like")
                                .route(web::post().to(handlers::likes::like_post))
                                .route(web::delete().to(handlers::likes::unlike_post)),
                        )
                        .route(
                            "/{post_id}/me",
                            web::get().to(handlers::likes::get_like_status),
                        )
                        .route("/{post_id}", web::get().to(handlers::likes::get_post_likes)),
                )
                .service(
                    web::scope("/comments")
                        .route(
                            "/post/{post_id}/count",
                            web::get().to(handlers::comments::get_comment_count),
                        )
                        .service(
                            web::resource("/post/{post_id}")
                                .route(web::post().to(handlers::comments::create_comment))
                                .route(web::get().to(handlers::comments::get_post_comments)),
                        )
                        .route(
                            "/user/{user_id}",
                            web::get().to(handlers::comments::get_user_comments),
                        )
                        .service(
                            web::resource("/{comment_id}")
                                .route(web::put().to(handlers::comments::update_comment))
                                .route(web::delete().to(handlers::comments::delete_comment)),
                        ),
                ),
        )
        .default_service(web::route().to(not_found));
}

/// GET /health: liveness plus a database ping.
async fn health_check(pool: web::Data<PgPool>) -> HttpResponse {
    match sqlx::query("SELECT 1").fetch_one(pool.get_ref()).await {
        Ok(_) => HttpResponse::Ok().json(serde_json::json!({
            "status": "OK",
            "timestamp": Utc::now().to_rfc3339(),
        })),
        Err(e) => {
            tracing::error!("health check database ping failed: {}", e);
            HttpResponse::ServiceUnavailable().json(serde_json::json!({
                "status": "unhealthy",
                "error": "database unreachable",
            }))
        }
    }
}

async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(serde_json::json!({ "error": "Route not found" }))
}
