//! HTTP contract tests that run without a live database: route shape,
//! authentication rejection, validation failures, and the error envelope.
//! The pool is created lazily, so no connection is attempted unless a
//! handler actually reaches a query (these paths never do).

use actix_web::{test, web, App};
use serde_json::Value;
use uuid::Uuid;

use social_api::config::{AppConfig, AuthConfig, Config, CorsConfig, DatabaseConfig};
use social_api::error::AppError;
use social_api::routes;
use social_api::security::jwt;
use sqlx::postgres::PgPoolOptions;

const TEST_SECRET: &str = "test-secret";

fn test_config() -> Config {
    Config {
        app: AppConfig {
            env: "test".into(),
            host: "127.0.0.1".into(),
            port: 0,
        },
        cors: CorsConfig {
            allowed_origins: "*".into(),
        },
        database: DatabaseConfig {
            url: "postgresql://localhost/unused".into(),
            max_connections: 1,
        },
        auth: AuthConfig {
            jwt_secret: TEST_SECRET.into(),
            token_ttl_hours: 24,
        },
    }
}

macro_rules! test_app {
    () => {{
        let pool = PgPoolOptions::new()
            .connect_lazy("postgresql://localhost/unused")
            .expect("lazy pool");
        let json_config = web::JsonConfig::default().error_handler(|err, _req| {
            AppError::Validation(format!("Invalid request body: {}", err)).into()
        });
        test::init_service(
            App::new()
                .app_data(web::Data::new(test_config()))
                .app_data(web::Data::new(pool))
                .app_data(json_config)
                .configure(routes::configure_routes),
        )
        .await
    }};
}

async fn body_error(resp: actix_web::dev::ServiceResponse<impl actix_web::body::MessageBody>) -> String {
    let body: Value = test::read_body_json(resp).await;
    body["error"].as_str().unwrap_or_default().to_string()
}

#[actix_web::test]
async fn missing_token_is_unauthorized() {
    let app = test_app!();

    for uri in [
        "/api/auth/me",
        "/api/posts/feed",
        "/api/posts/my",
        "/api/users/stats",
        "/api/users/following",
    ] {
        let req = test::TestRequest::get().uri(uri).to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 401, "expected 401 for {}", uri);
        assert_eq!(body_error(resp).await, "Access token required");
    }
}

#[actix_web::test]
async fn mutations_require_a_token() {
    let app = test_app!();
    let id = Uuid::new_v4();

    let req = test::TestRequest::delete()
        .uri(&format!("/api/posts/{}", id))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 401);

    let req = test::TestRequest::post()
        .uri(&format!("/api/likes/{}/like", id))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 401);

    let req = test::TestRequest::delete()
        .uri(&format!("/api/comments/{}", id))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 401);
}

#[actix_web::test]
async fn garbage_token_is_invalid() {
    let app = test_app!();

    let req = test::TestRequest::get()
        .uri("/api/posts/feed")
        .insert_header(("Authorization", "Bearer not.a.token"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 401);
    assert_eq!(body_error(resp).await, "Invalid token");
}

#[actix_web::test]
async fn expired_token_is_rejected_as_expired() {
    let app = test_app!();

    let token = jwt::generate_token(Uuid::new_v4(), "alice", TEST_SECRET, -2).expect("token");
    let req = test::TestRequest::get()
        .uri("/api/posts/feed")
        .insert_header(("Authorization", format!("Bearer {}", token)))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 401);
    assert_eq!(body_error(resp).await, "Token expired");
}

#[actix_web::test]
async fn token_signed_with_another_secret_is_invalid() {
    let app = test_app!();

    let token = jwt::generate_token(Uuid::new_v4(), "alice", "other-secret", 24).expect("token");
    let req = test::TestRequest::get()
        .uri("/api/posts/feed")
        .insert_header(("Authorization", format!("Bearer {}", token)))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 401);
    assert_eq!(body_error(resp).await, "Invalid token");
}

#[actix_web::test]
async fn registration_input_is_validated() {
    let app = test_app!();

    let req = test::TestRequest::post()
        .uri("/api/auth/register")
        .set_json(serde_json::json!({
            "username": "ab",
            "email": "not-an-email",
            "password": "123",
            "name": ""
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);

    let error = body_error(resp).await;
    assert!(error.starts_with("Validation failed"), "got: {}", error);
    assert!(error.contains("username"));
    assert!(error.contains("email"));
    assert!(error.contains("password"));
}

#[actix_web::test]
async fn malformed_json_body_is_a_400_with_the_error_envelope() {
    let app = test_app!();

    let req = test::TestRequest::post()
        .uri("/api/auth/register")
        .insert_header(("Content-Type", "application/json"))
        .set_payload("{not json")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);

    let error = body_error(resp).await;
    assert!(error.starts_with("Invalid request body"), "got: {}", error);
}

#[actix_web::test]
async fn post_search_requires_a_query() {
    let app = test_app!();

    let req = test::TestRequest::get()
        .uri("/api/posts/search")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);
    assert_eq!(body_error(resp).await, "Missing search query");
}

#[actix_web::test]
async fn unknown_routes_return_a_json_404() {
    let app = test_app!();

    let req = test::TestRequest::get().uri("/api/unknown").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 404);
    assert_eq!(body_error(resp).await, "Route not found");
}

#[actix_web::test]
async fn non_uuid_path_ids_do_not_match_routes() {
    let app = test_app!();

    let req = test::TestRequest::get()
        .uri("/api/posts/not-a-uuid")
        .to_request();
    let resp = test::call_service(&app, req).await;
    // The path matches but the Uuid extractor rejects the segment.
    assert_eq!(resp.status(), 404);
}
