//! Who is making the current request.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The caller, as stated by a verified access token.
///
/// Services take it as the first argument of every authenticated operation.
/// Ownership and admin checks run against it, never against request bodies.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestContext {
    pub user_id: Uuid,
    pub email: String,
    /// As of token issue; promotions apply from the next login.
    pub admin: bool,
}

impl RequestContext {
    pub fn new(user_id: Uuid, email: String, admin: bool) -> Self {
        Self {
            user_id,
            email,
            admin,
        }
    }

    pub fn is_admin(&self) -> bool {
        self.admin
    }

    /// Owner or admin may modify a resource owned by `owner_id`.
    pub fn owns_or_admin(&self, owner_id: Uuid) -> bool {
        self.admin || self.user_id == owner_id
    }
}
