/// Configuration management
///
/// All settings come from environment variables with development defaults.
/// Production refuses to start with a default JWT secret or wildcard CORS.
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub app: AppConfig,
    pub cors: CorsConfig,
    pub database: DatabaseConfig,
    pub auth: AuthConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Application environment (development, staging, production)
    pub env: String,
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorsConfig {
    /// Comma-separated list of allowed origins
    pub allowed_origins: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// HMAC secret for bearer tokens
    pub jwt_secret: String,
    /// Token lifetime in hours
    pub token_ttl_hours: i64,
}

const DEV_JWT_SECRET: &str = "dev-secret-change-me";

impl Config {
    pub fn from_env() -> Result<Self, String> {
        let app_env = std::env::var("APP_ENV").unwrap_or_else(|_| "development".to_string());
        let production = app_env.eq_ignore_ascii_case("production");

        let allowed_origins = match std::env::var("CORS_ALLOWED_ORIGINS") {
            Ok(value) => value,
            Err(_) if production => {
                return Err("CORS_ALLOWED_ORIGINS must be set in production".to_string())
            }
            Err(_) => "http://localhost:3000".to_string(),
        };
        if production && allowed_origins.trim() == "*" {
            return Err("CORS_ALLOWED_ORIGINS cannot be '*' in production".to_string());
        }

        let jwt_secret = match std::env::var("JWT_SECRET") {
            Ok(value) if !value.trim().is_empty() => value,
            _ if production => return Err("JWT_SECRET must be set in production".to_string()),
            _ => DEV_JWT_SECRET.to_string(),
        };

        Ok(Config {
            app: AppConfig {
                env: app_env,
                host: std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
                port: std::env::var("PORT")
                    .ok()
                    .and_then(|p| p.parse().ok())
                    .unwrap_or(3000),
            },
            cors: CorsConfig { allowed_origins },
            database: DatabaseConfig {
                url: std::env::var("DATABASE_URL")
                    .unwrap_or_else(|_| "postgresql://localhost/social".to_string()),
                max_connections: std::env::var("DATABASE_MAX_CONNECTIONS")
                    .ok()
                    .and_then(|c| c.parse().ok())
                    .unwrap_or(10),
            },
            auth: AuthConfig {
                jwt_secret,
                token_ttl_hours: std::env::var("TOKEN_TTL_HOURS")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(24),
            },
        })
    }
}
