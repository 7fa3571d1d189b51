/// Bearer token authentication for route handlers
///
/// `AuthUser` extracts and verifies the caller identity: Authorization
/// header, HS256 signature, and an active-user lookup, so a valid token
/// belonging to a soft-deleted account is rejected. Routes that merely
/// personalize their response take `MaybeUser`, which swallows every
/// failure into `None` instead of rejecting the request.
use actix_web::{dev::Payload, web, FromRequest, HttpRequest};
use futures::future::LocalBoxFuture;
use sqlx::PgPool;
use uuid::Uuid;

use crate::config::Config;
use crate::db::user_repo;
use crate::error::AppError;
use crate::security::jwt;

/// Verified caller identity, threaded explicitly into handlers.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub id: Uuid,
    pub username: String,
}

/// Caller identity for optionally-authenticated routes.
#[derive(Debug, Clone)]
pub struct MaybeUser(pub Option<AuthUser>);

impl MaybeUser {
    pub fn id(&self) -> Option<Uuid> {
        self.0.as_ref().map(|u| u.id)
    }
}

/// Pull the token out of the Authorization header. A bare token without the
/// Bearer scheme is accepted, matching the wire contract.
fn bearer_token(req: &HttpRequest) -> Option<String> {
    let header = req.headers().get("Authorization")?.to_str().ok()?;
    let token = header.strip_prefix("Bearer ").unwrap_or(header).trim();
    if token.is_empty() {
        None
    } else {
        Some(token.to_string())
    }
}

async fn resolve(req: HttpRequest) -> Result<AuthUser, AppError> {
    let token = bearer_token(&req)
        .ok_or_else(|| AppError::Unauthorized("Access token required".to_string()))?;

    let config = req
        .app_data::<web::Data<Config>>()
        .ok_or_else(|| AppError::Internal("application config not registered".to_string()))?;

    let claims = jwt::decode_token(&token, &config.auth.jwt_secret)
        .map_err(|e| AppError::Unauthorized(e.message().to_string()))?;
    let user_id = jwt::subject_user_id(&claims)
        .map_err(|e| AppError::Unauthorized(e.message().to_string()))?;

    let pool = req
        .app_data::<web::Data<PgPool>>()
        .ok_or_else(|| AppError::Internal("database pool not registered".to_string()))?;

    let user = user_repo::find_by_id(pool.get_ref(), user_id)
        .await?
        .ok_or_else(|| AppError::Unauthorized("User not found".to_string()))?;

    Ok(AuthUser {
        id: user.id,
        username: user.username,
    })
}

impl FromRequest for AuthUser {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let req = req.clone();
        Box::pin(async move { resolve(req).await.map_err(Into::into) })
    }
}

impl FromRequest for MaybeUser {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let req = req.clone();
        Box::pin(async move { Ok(MaybeUser(resolve(req).await.ok())) })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;

    #[test]
    fn bearer_scheme_is_stripped() {
        let req = TestRequest::default()
            .insert_header(("Authorization", "Bearer abc.def.ghi"))
            .to_http_request();
        assert_eq!(bearer_token(&req).as_deref(), Some("abc.def.ghi"));
    }

    #[test]
    fn bare_token_is_accepted() {
        let req = TestRequest::default()
            .insert_header(("Authorization", "abc.def.ghi"))
            .to_http_request();
        assert_eq!(bearer_token(&req).as_deref(), Some("abc.def.ghi"));
    }

    #[test]
    fn missing_header_yields_none() {
        let req = TestRequest::default().to_http_request();
        assert_eq!(bearer_token(&req), None);
    }

    #[test]
    fn empty_bearer_yields_none() {
        let req = TestRequest::default()
            .insert_header(("Authorization", "Bearer "))
            .to_http_request();
        assert_eq!(bearer_token(&req), None);
    }
}
