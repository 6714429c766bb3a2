//! Password policy for new accounts.

use findit_core::config::auth::AuthConfig;
use findit_core::error::AppError;

/// Longest password accepted, to bound hashing cost.
const MAX_LENGTH: usize = 128;

/// Enforces the configured password length bounds.
#[derive(Debug, Clone)]
pub struct PasswordValidator {
    min_length: usize,
}

impl PasswordValidator {
    /// Creates a new validator from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            min_length: config.password_min_length,
        }
    }

    /// Validates a password, returning the first violation found.
    pub fn validate(&self, password: &str) -> Result<(), AppError> {
        let length = password.chars().count();
        if length < self.min_length {
            return Err(AppError::validation(format!(
                "Password must be at least {} characters long",
                self.min_length
            )));
        }
        if length > MAX_LENGTH {
            return Err(AppError::validation(format!(
                "Password must be at most {MAX_LENGTH} characters long"
            )));
        }
        Ok(())
    }
}
