/// Authentication handlers: register, login, current profile
use actix_web::{web, HttpResponse};
use serde::Deserialize;
use sqlx::PgPool;
use validator::{Validate, ValidationError};

use crate::config::Config;
use crate::error::{AppError, Result};
use crate::middleware::AuthUser;
use crate::security::jwt;
use crate::services::UserService;

#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(
        length(min = 3, max = 30),
        custom(function = "validate_alphanumeric")
    )]
    pub username: String,

    #[validate(email)]
    pub email: String,

    #[validate(length(min = 6))]
    pub password: String,

    #[validate(length(min = 1, max = 100))]
    pub name: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1))]
    pub username: String,

    #[validate(length(min = 1))]
    pub password: String,
}

fn validate_alphanumeric(username: &str) -> std::result::Result<(), ValidationError> {
    if username.chars().all(|c| c.is_ascii_alphanumeric()) {
        Ok(())
    } else {
        let mut err = ValidationError::new("alphanumeric");
        err.message = Some("must contain only letters and digits".into());
        Err(err)
    }
}

/// POST /api/auth/register
pub async fn register(
    pool: web::Data<PgPool>,
    config: web::Data<Config>,
    req: web::Json<RegisterRequest>,
) -> Result<HttpResponse> {
    req.validate().map_err(AppError::from)?;

    let service = UserService::new(pool.get_ref().clone());
    let user = service
        .register(&req.username, &req.email, &req.password, &req.name)
        .await?;

    let token = jwt::generate_token(
        user.id,
        &user.username,
        &config.auth.jwt_secret,
        config.auth.token_ttl_hours,
    )?;

    tracing::info!(username = %user.username, "new user registered");

    Ok(HttpResponse::Created().json(serde_json::json!({
        "message": "User registered successfully",
        "user": user,
        "token": token,
    })))
}

/// POST /api/auth/login
pub async fn login(
    pool: web::Data<PgPool>,
    config: web::Data<Config>,
    req: web::Json<LoginRequest>,
) -> Result<HttpResponse> {
    req.validate().map_err(AppError::from)?;

    let service = UserService::new(pool.get_ref().clone());
    let user = service.authenticate(&req.username, &req.password).await?;

    let token = jwt::generate_token(
        user.id,
        &user.username,
        &config.auth.jwt_secret,
        config.auth.token_ttl_hours,
    )?;

    tracing::info!(username = %user.username, "user logged in");

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "message": "Login successful",
        "user": user,
        "token": token,
    })))
}

/// GET /api/auth/me
pub async fn me(pool: web::Data<PgPool>, user: AuthUser) -> Result<HttpResponse> {
    let service = UserService::new(pool.get_ref().clone());
    let profile = service.get_by_id(user.id).await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({ "user": profile })))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_register() -> RegisterRequest {
        RegisterRequest {
            username: "alice1".into(),
            email: "alice@example.com".into(),
            password: "secret".into(),
            name: "Alice".into(),
        }
    }

    #[test]
    fn valid_registration_passes() {
        assert!(valid_register().validate().is_ok());
    }

    #[test]
    fn short_username_is_rejected() {
        let mut req = valid_register();
        req.username = "ab".into();
        assert!(req.validate().is_err());
    }

    #[test]
    fn non_alphanumeric_username_is_rejected() {
        let mut req = valid_register();
        req.username = "alice!".into();
        assert!(req.validate().is_err());
    }

    #[test]
    fn bad_email_is_rejected() {
        let mut req = valid_register();
        req.email = "not-an-email".into();
        assert!(req.validate().is_err());
    }

    #[test]
    fn short_password_is_rejected() {
        let mut req = valid_register();
        req.password = "five5".into();
        assert!(req.validate().is_err());
    }

    #[test]
    fn empty_login_fields_are_rejected() {
        let req = LoginRequest {
            username: "".into(),
            password: "".into(),
        };
        assert!(req.validate().is_err());
    }
}
