//! Pagination query parameter extractor.

use serde::{Deserialize, Serialize};

use findit_core::types::Pagination;
use findit_core::types::pagination::{DEFAULT_LIMIT, DEFAULT_MESSAGE_LIMIT};

/// `?limit=&offset=` on list endpoints.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PaginationParams {
    /// Page size; the endpoint picks the default.
    pub limit: Option<i64>,
    /// Rows to skip (default: 0).
    pub offset: Option<i64>,
}

impl PaginationParams {
    /// Resolve for a general listing (default limit 20).
    pub fn into_pagination(self) -> Pagination {
        Pagination::from_query(self.limit, self.offset, DEFAULT_LIMIT)
    }

    /// Resolve for chat history (default limit 50).
    pub fn into_message_pagination(self) -> Pagination {
        Pagination::from_query(self.limit, self.offset, DEFAULT_MESSAGE_LIMIT)
    }
}
