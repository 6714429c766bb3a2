//! Limit/offset pagination for list endpoints.

use serde::{Deserialize, Serialize};

/// Default page size for most listings.
pub const DEFAULT_LIMIT: i64 = 20;
/// Default page size for chat message history.
pub const DEFAULT_MESSAGE_LIMIT: i64 = 50;
/// Upper bound on any requested page size.
pub const MAX_LIMIT: i64 = 100;

/// A resolved `LIMIT`/`OFFSET` pair, always within bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    /// Number of rows to return.
    pub limit: i64,
    /// Number of rows to skip.
    pub offset: i64,
}

impl Pagination {
    /// Create a pagination window, clamping the values into range.
    pub fn new(limit: i64, offset: i64) -> Self {
        Self {
            limit: limit.clamp(1, MAX_LIMIT),
            offset: offset.max(0),
        }
    }

    /// Resolve optional query values against a default limit.
    pub fn from_query(limit: Option<i64>, offset: Option<i64>, default_limit: i64) -> Self {
        Self::new(limit.unwrap_or(default_limit), offset.unwrap_or(0))
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self::new(DEFAULT_LIMIT, 0)
    }
}
