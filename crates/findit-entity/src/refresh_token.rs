//! Refresh token entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A server-side refresh token record.
///
/// Only a SHA-256 digest of the opaque token is stored; the plaintext is
/// returned to the client once and never persisted.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct RefreshToken {
    /// Row ID.
    pub id: Uuid,
    /// Owning user.
    pub user_id: Uuid,
    /// Hex SHA-256 digest of the opaque token.
    #[serde(skip_serializing)]
    pub token_hash: String,
    /// Expiry instant.
    pub expires_at: DateTime<Utc>,
    /// Creation instant.
    pub created_at: DateTime<Utc>,
}

impl RefreshToken {
    /// Whether the token is past its expiry at `now`.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at <= now
    }
}
