/// Error types for social-api
///
/// Domain services raise typed failures; the boundary maps each variant to a
/// fixed HTTP status and a stable `{"error": <message>}` envelope. Database
/// and other unexpected failures are logged and surfaced as opaque 500s.
use actix_web::{error::ResponseError, http::StatusCode, HttpResponse};
use thiserror::Error;

/// Result type for social-api operations
pub type Result<T> = std::result::Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    Validation(String),

    /// Business-rule rejection: comments disabled, no fields to update,
    /// self-follow, unfollow without a follow.
    #[error("{0}")]
    BusinessRule(String),

    /// Uniqueness violation: duplicate username/email, follow, or like.
    /// The wire contract maps these to 400 alongside business rules.
    #[error("{0}")]
    Conflict(String),

    #[error("{0}")]
    Unauthorized(String),

    #[error("{0}")]
    Forbidden(String),

    #[error("{0}")]
    NotFound(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) | AppError::BusinessRule(_) | AppError::Conflict(_) => {
                StatusCode::BAD_REQUEST
            }
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Database(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let message = match self {
            AppError::Database(e) => {
                tracing::error!("database error: {}", e);
                "Internal server error".to_string()
            }
            AppError::Internal(msg) => {
                tracing::error!("internal error: {}", msg);
                "Internal server error".to_string()
            }
            other => other.to_string(),
        };

        HttpResponse::build(self.status_code()).json(serde_json::json!({ "error": message }))
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut details: Vec<String> = errors
            .field_errors()
            .into_iter()
            .map(|(field, errs)| {
                let reasons: Vec<String> = errs
                    .iter()
                    .map(|e| {
                        e.message
                            .as_ref()
                            .map(|m| m.to_string())
                            .unwrap_or_else(|| e.code.to_string())
                    })
                    .collect();
                format!("{}: {}", field, reasons.join(", "))
            })
            .collect();
        details.sort();
        AppError::Validation(format!("Validation failed: {}", details.join("; ")))
    }
}

/// True when the error is a store-level uniqueness violation. The partial
/// unique indexes and edge constraints are the authoritative guard against
/// duplicate registration/follow/like races; this lets services map a lost
/// race to the same friendly Conflict the pre-check produces.
pub fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db) if db.is_unique_violation())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn business_failures_map_to_400() {
        assert_eq!(
            AppError::Validation("bad".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::BusinessRule("Comments are disabled for this post".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::Conflict("Already liked this post".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn auth_failures_map_to_401_and_403() {
        assert_eq!(
            AppError::Unauthorized("Access token required".into()).status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            AppError::Forbidden("Not authorized".into()).status_code(),
            StatusCode::FORBIDDEN
        );
    }

    #[test]
    fn missing_resources_map_to_404() {
        assert_eq!(
            AppError::NotFound("Post not found".into()).status_code(),
            StatusCode::NOT_FOUND
        );
    }

    #[test]
    fn internal_failures_are_opaque_500s() {
        let err = AppError::Internal("secret detail".into());
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        let resp = err.error_response();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn validation_errors_join_per_field_messages() {
        use validator::Validate;

        #[derive(Validate)]
        struct Req {
            #[validate(length(min = 3, max = 30))]
            username: String,
            #[validate(email)]
            email: String,
        }

        let req = Req {
            username: "ab".into(),
            email: "nope".into(),
        };
        let err: AppError = req.validate().unwrap_err().into();
        match err {
            AppError::Validation(msg) => {
                assert!(msg.contains("username"));
                assert!(msg.contains("email"));
            }
            other => panic!("expected Validation, got {:?}", other),
        }
    }
}
