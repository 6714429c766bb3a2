//! WebSocket authentication: validates the access token presented at connect.

use std::sync::Arc;

use uuid::Uuid;

use findit_auth::jwt::JwtDecoder;
use findit_core::error::AppError;

/// Authenticated connection info extracted from JWT.
#[derive(Debug, Clone)]
pub struct AuthenticatedConnection {
    /// User ID.
    pub user_id: Uuid,
    /// Email from the token.
    pub email: String,
    /// Admin flag from the token.
    pub is_admin: bool,
}

/// Authenticates WebSocket connections using JWT tokens.
#[derive(Debug, Clone)]
pub struct WsAuthenticator {
    /// JWT decoder.
    decoder: Arc<JwtDecoder>,
}

impl WsAuthenticator {
    /// Creates a new WebSocket authenticator.
    pub fn new(decoder: Arc<JwtDecoder>) -> Self {
        Self { decoder }
    }

    /// Authenticate from a query-string token or an `Authorization` header,
    /// whichever is present. The query token wins.
    pub fn authenticate(
        &self,
        query_token: Option<&str>,
        authorization: Option<&str>,
    ) -> Result<AuthenticatedConnection, AppError> {
        let token = query_token
            .filter(|t| !t.is_empty())
            .or_else(|| authorization.and_then(|h| h.strip_prefix("Bearer ")))
            .ok_or_else(|| AppError::unauthorized("Missing access token"))?;

        let claims = self.decoder.decode_access_token(token.trim())?;

        Ok(AuthenticatedConnection {
            user_id: claims.user_id(),
            email: claims.email,
            is_admin: claims.is_admin,
        })
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use findit_auth::jwt::{Claims, JwtEncoder};
    use findit_core::config::auth::AuthConfig;

    use super::*;

    fn token(config: &AuthConfig) -> (Uuid, String) {
        let user_id = Uuid::new_v4();
        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: user_id,
            email: "ann@x.com".into(),
            is_admin: false,
            iat: now,
            exp: now + 600,
        };
        let token = JwtEncoder::new(config).encode_claims(&claims).unwrap();
        (user_id, token)
    }

    #[test]
    fn test_query_or_header() {
        let config = AuthConfig::with_secret("ws-test-secret");
        let auth = WsAuthenticator::new(Arc::new(JwtDecoder::new(&config)));
        let (user_id, token) = token(&config);

        let via_query = auth.authenticate(Some(&token), None).unwrap();
        assert_eq!(via_query.user_id, user_id);

        let header = format!("Bearer {token}");
        let via_header = auth.authenticate(None, Some(&header)).unwrap();
        assert_eq!(via_header.email, "ann@x.com");

        assert!(auth.authenticate(None, None).is_err());
        assert!(auth.authenticate(Some("garbage"), None).is_err());
        assert!(auth.authenticate(None, Some(&token)).is_err());
    }
}
