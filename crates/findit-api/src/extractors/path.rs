//! Path segment parsing.

use uuid::Uuid;

use findit_core::error::AppError;

/// Route ids arrive as raw strings so a malformed id is a 400 envelope,
/// not axum's plain-text rejection.
pub fn parse_uuid(raw: &str) -> Result<Uuid, AppError> {
    raw.parse()
        .map_err(|_| AppError::validation(format!("Invalid UUID: {raw}")))
}
