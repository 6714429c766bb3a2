//! JWT access token creation.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{EncodingKey, Header, encode};

use findit_core::config::auth::AuthConfig;
use findit_core::error::AppError;
use findit_entity::user::User;

use super::claims::Claims;

/// Creates HS256-signed access tokens.
#[derive(Clone)]
pub struct JwtEncoder {
    encoding_key: EncodingKey,
    access_ttl: Duration,
}

impl std::fmt::Debug for JwtEncoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtEncoder")
            .field("access_ttl", &self.access_ttl)
            .finish()
    }
}

impl JwtEncoder {
    /// Creates a new encoder from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(config.jwt_secret.as_bytes()),
            access_ttl: Duration::minutes(config.access_token_ttl_minutes as i64),
        }
    }

    /// Issue an access token for a user.
    pub fn generate_access_token(&self, user: &User) -> Result<(String, DateTime<Utc>), AppError> {
        let now = Utc::now();
        let exp = now + self.access_ttl;
        let claims = Claims {
            sub: user.id,
            email: user.email.clone(),
            is_admin: user.is_admin,
            iat: now.timestamp(),
            exp: exp.timestamp(),
        };
        let token = self.encode_claims(&claims)?;
        Ok((token, exp))
    }

    /// Sign an arbitrary claims payload.
    pub fn encode_claims(&self, claims: &Claims) -> Result<String, AppError> {
        encode(&Header::default(), claims, &self.encoding_key)
            .map_err(|e| AppError::internal(format!("Failed to encode access token: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use uuid::Uuid;

    use super::*;

    #[test]
    fn test_signs_compact_hs256_token() {
        let now = Utc::now();
        let user = User {
            id: Uuid::new_v4(),
            name: "Ann".into(),
            email: "ann@x.com".into(),
            password_hash: String::new(),
            user_photo: None,
            city: None,
            state: None,
            country: None,
            phone: None,
            occupation: None,
            bio: None,
            is_admin: false,
            created_at: now,
            updated_at: now,
        };
        let encoder = JwtEncoder::new(&AuthConfig::with_secret("sign-secret"));

        let (token, exp) = encoder.generate_access_token(&user).unwrap();
        assert_eq!(token.split('.').count(), 3);
        assert!(exp > now);

        let header = jsonwebtoken::decode_header(&token).unwrap();
        assert_eq!(header.alg, jsonwebtoken::Algorithm::HS256);
    }
}
