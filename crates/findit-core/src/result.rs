//! Convenience result alias.

use crate::error::AppError;

/// Result type used by every FindIt crate.
pub type AppResult<T> = Result<T, AppError>;
