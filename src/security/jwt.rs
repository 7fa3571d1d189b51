/// Bearer token generation and validation (HS256)
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{AppError, Result};

/// Claims carried by every bearer token.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user id)
    pub sub: String,
    pub username: String,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Expiration (Unix timestamp)
    pub exp: i64,
}

/// Why a presented token was rejected. Both map to 401 at the boundary but
/// surface distinct messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenError {
    Expired,
    Invalid,
}

impl TokenError {
    pub fn message(self) -> &'static str {
        match self {
            TokenError::Expired => "Token expired",
            TokenError::Invalid => "Invalid token",
        }
    }
}

/// Issue a token for an authenticated identity.
pub fn generate_token(
    user_id: Uuid,
    username: &str,
    secret: &str,
    ttl_hours: i64,
) -> Result<String> {
    let now = Utc::now();
    let claims = Claims {
        sub: user_id.to_string(),
        username: username.to_string(),
        iat: now.timestamp(),
        exp: (now + Duration::hours(ttl_hours)).timestamp(),
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| AppError::Internal(format!("Failed to generate token: {}", e)))
}

/// Validate a presented token and return its claims.
pub fn decode_token(token: &str, secret: &str) -> std::result::Result<Claims, TokenError> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|e| match e.kind() {
        jsonwebtoken::errors::ErrorKind::ExpiredSignature => TokenError::Expired,
        _ => TokenError::Invalid,
    })
}

/// Parse the subject claim back into a user id.
pub fn subject_user_id(claims: &Claims) -> std::result::Result<Uuid, TokenError> {
    Uuid::parse_str(&claims.sub).map_err(|_| TokenError::Invalid)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test-secret";

    #[test]
    fn round_trip_preserves_identity() {
        let user_id = Uuid::new_v4();
        let token = generate_token(user_id, "alice", SECRET, 24).expect("should encode");
        let claims = decode_token(&token, SECRET).expect("should decode");
        assert_eq!(claims.username, "alice");
        assert_eq!(subject_user_id(&claims).unwrap(), user_id);
    }

    #[test]
    fn expired_token_is_rejected_as_expired() {
        let token = generate_token(Uuid::new_v4(), "alice", SECRET, -2).expect("should encode");
        assert_eq!(decode_token(&token, SECRET), Err(TokenError::Expired));
    }

    #[test]
    fn wrong_secret_is_rejected_as_invalid() {
        let token = generate_token(Uuid::new_v4(), "alice", SECRET, 24).expect("should encode");
        assert_eq!(decode_token(&token, "other-secret"), Err(TokenError::Invalid));
    }

    #[test]
    fn garbage_is_rejected_as_invalid() {
        assert_eq!(
            decode_token("not.a.token", SECRET),
            Err(TokenError::Invalid)
        );
    }

    #[test]
    fn non_uuid_subject_is_invalid() {
        let claims = Claims {
            sub: "42".into(),
            username: "alice".into(),
            iat: 0,
            exp: 0,
        };
        assert_eq!(subject_user_id(&claims), Err(TokenError::Invalid));
    }
}
