//! Credential lifecycle manager: register, login, refresh and logout flows.

use std::sync::Arc;

use chrono::{Duration, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use findit_core::config::auth::AuthConfig;
use findit_core::error::AppError;
use findit_database::repositories::refresh_token::RefreshTokenRepository;
use findit_database::repositories::user::UserRepository;
use findit_entity::user::{CreateUser, User};

use crate::jwt::JwtEncoder;
use crate::password::{PasswordHasher, PasswordValidator};

use super::token::RefreshTokenGenerator;

/// Shared message for every login failure, so callers cannot tell an
/// unknown email from a wrong password.
const INVALID_CREDENTIALS: &str = "Invalid credentials";
const INVALID_REFRESH_TOKEN: &str = "Invalid refresh token";

/// An access token plus a freshly minted refresh token.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenPair {
    /// Signed short-lived access token.
    pub access_token: String,
    /// Opaque single-use refresh token.
    pub refresh_token: String,
}

/// Result of a successful registration or login.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    /// The sanitized user.
    pub user: User,
    /// Signed short-lived access token.
    pub access_token: String,
    /// Opaque single-use refresh token.
    pub refresh_token: String,
}

/// Manages the credential lifecycle.
#[derive(Clone)]
pub struct SessionManager {
    jwt_encoder: Arc<JwtEncoder>,
    password_hasher: Arc<PasswordHasher>,
    password_validator: PasswordValidator,
    token_generator: RefreshTokenGenerator,
    user_repo: Arc<UserRepository>,
    refresh_repo: Arc<RefreshTokenRepository>,
    refresh_ttl: Duration,
}

impl std::fmt::Debug for SessionManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionManager")
            .field("refresh_ttl", &self.refresh_ttl)
            .finish()
    }
}

impl SessionManager {
    /// Creates a new session manager.
    pub fn new(
        jwt_encoder: Arc<JwtEncoder>,
        password_hasher: Arc<PasswordHasher>,
        user_repo: Arc<UserRepository>,
        refresh_repo: Arc<RefreshTokenRepository>,
        config: &AuthConfig,
    ) -> Self {
        Self {
            jwt_encoder,
            password_hasher,
            password_validator: PasswordValidator::new(config),
            token_generator: RefreshTokenGenerator,
            user_repo,
            refresh_repo,
            refresh_ttl: Duration::days(config.refresh_token_ttl_days as i64),
        }
    }

    /// Register a new account and sign it in.
    ///
    /// 1. Enforce the password policy
    /// 2. Reject an email that is already registered
    /// 3. Hash the password and insert the user
    /// 4. Issue a token pair
    pub async fn register(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<AuthResponse, AppError> {
        // Step 1: Password policy
        self.password_validator.validate(password)?;

        // Step 2: Fast-path duplicate check; the unique index still
        // catches a concurrent registration and maps it to the same error.
        if self.user_repo.find_by_email(email).await?.is_some() {
            warn!(email = %email, "Registration rejected: email already registered");
            return Err(AppError::conflict("Email already registered"));
        }

        // Step 3: Persist
        let password_hash = self.password_hasher.hash(password)?;
        let user = self
            .user_repo
            .create(&CreateUser {
                name: name.to_string(),
                email: email.to_string(),
                password_hash,
                country: None,
                is_admin: false,
            })
            .await?;

        // Step 4: Tokens
        let tokens = self.issue_tokens(&user).await?;
        info!(user_id = %user.id, "User registered");

        Ok(AuthResponse {
            user,
            access_token: tokens.access_token,
            refresh_token: tokens.refresh_token,
        })
    }

    /// Verify credentials and issue a token pair.
    pub async fn login(&self, email: &str, password: &str) -> Result<AuthResponse, AppError> {
        let Some(user) = self.user_repo.find_by_email(email).await? else {
            warn!(email = %email, "Login failed: unknown email");
            return Err(AppError::unauthorized(INVALID_CREDENTIALS));
        };

        if !self.password_hasher.verify(password, &user.password_hash)? {
            warn!(user_id = %user.id, "Login failed: wrong password");
            return Err(AppError::unauthorized(INVALID_CREDENTIALS));
        }

        let tokens = self.issue_tokens(&user).await?;
        info!(user_id = %user.id, "Login successful");

        Ok(AuthResponse {
            user,
            access_token: tokens.access_token,
            refresh_token: tokens.refresh_token,
        })
    }

    /// Exchange a refresh token for a new pair.
    ///
    /// The presented token is consumed atomically before anything else
    /// happens, so it can never be used twice, even by racing requests.
    pub async fn refresh(&self, refresh_token: &str) -> Result<TokenPair, AppError> {
        let token_hash = self.token_generator.hash(refresh_token);

        let Some(stored) = self.refresh_repo.consume(&token_hash).await? else {
            warn!("Refresh rejected: unknown or already used token");
            return Err(AppError::unauthorized(INVALID_REFRESH_TOKEN));
        };

        if stored.is_expired_at(Utc::now()) {
            warn!(user_id = %stored.user_id, "Refresh rejected: token expired");
            return Err(AppError::unauthorized(INVALID_REFRESH_TOKEN));
        }

        let user = self
            .user_repo
            .find_by_id(stored.user_id)
            .await?
            .ok_or_else(|| AppError::unauthorized("User not found"))?;

        let tokens = self.issue_tokens(&user).await?;
        info!(user_id = %user.id, "Refresh token rotated");
        Ok(tokens)
    }

    /// Revoke a refresh token. Unknown tokens are not an error.
    pub async fn logout(&self, refresh_token: &str) -> Result<(), AppError> {
        let token_hash = self.token_generator.hash(refresh_token);
        let removed = self.refresh_repo.delete_by_hash(&token_hash).await?;
        info!(revoked = removed, "Logout");
        Ok(())
    }

    /// Resolve the sanitized user behind a verified access token.
    pub async fn identity(&self, user_id: Uuid) -> Result<User, AppError> {
        self.user_repo
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::unauthorized("User not found"))
    }

    /// Mint an access token and store a new refresh token for `user`.
    async fn issue_tokens(&self, user: &User) -> Result<TokenPair, AppError> {
        let (access_token, _) = self.jwt_encoder.generate_access_token(user)?;

        let refresh_token = self.token_generator.generate();
        let expires_at = Utc::now() + self.refresh_ttl;
        self.refresh_repo
            .create(user.id, &self.token_generator.hash(&refresh_token), expires_at)
            .await?;

        Ok(TokenPair {
            access_token,
            refresh_token,
        })
    }
}
