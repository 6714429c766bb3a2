//! Access token payload.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identity snapshot taken when the token was minted. A later admin
/// promotion only shows up after the next login or refresh.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Claims {
    /// User ID.
    pub sub: Uuid,
    pub email: String,
    pub is_admin: bool,
    /// Unix seconds.
    pub iat: i64,
    /// Unix seconds.
    pub exp: i64,
}

impl Claims {
    pub fn user_id(&self) -> Uuid {
        self.sub
    }

    pub fn is_expired(&self) -> bool {
        self.exp <= Utc::now().timestamp()
    }
}
