//! Token and password settings.

use serde::{Deserialize, Serialize};

const ACCESS_TTL_MINUTES: u64 = 15;
const REFRESH_TTL_DAYS: u64 = 7;
const PASSWORD_MIN_LENGTH: usize = 6;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// HS256 signing key. Override `FINDIT__AUTH__JWT_SECRET` outside development.
    pub jwt_secret: String,
    #[serde(default = "access_ttl")]
    pub access_token_ttl_minutes: u64,
    #[serde(default = "refresh_ttl")]
    pub refresh_token_ttl_days: u64,
    /// Counted in characters, not bytes.
    #[serde(default = "password_min")]
    pub password_min_length: usize,
}

impl AuthConfig {
    /// Default lifetimes and policy around `secret`.
    pub fn with_secret(secret: impl Into<String>) -> Self {
        Self {
            jwt_secret: secret.into(),
            access_token_ttl_minutes: ACCESS_TTL_MINUTES,
            refresh_token_ttl_days: REFRESH_TTL_DAYS,
            password_min_length: PASSWORD_MIN_LENGTH,
        }
    }
}

fn access_ttl() -> u64 {
    ACCESS_TTL_MINUTES
}

fn refresh_ttl() -> u64 {
    REFRESH_TTL_DAYS
}

fn password_min() -> usize {
    PASSWORD_MIN_LENGTH
}
