//! Error type shared by every FindIt crate.
//!
//! Lower layers return [`AppError`] and let `?` carry it upward. The HTTP
//! layer decides the status code from [`ErrorKind`] alone, and hides the
//! message of any kind for which [`ErrorKind::is_internal`] holds.

use std::fmt;

use thiserror::Error;

/// What went wrong, coarse enough to pick an HTTP status from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum ErrorKind {
    NotFound,
    /// Missing, invalid, or expired credentials.
    Unauthorized,
    /// Authenticated, but not allowed to touch this resource.
    Forbidden,
    /// Malformed input or a self-referential request.
    Validation,
    /// Duplicate email, slug, or feedback.
    Conflict,
    Internal,
    Database,
    Storage,
    Configuration,
    Serialization,
}

impl ErrorKind {
    /// Server-side failures. Their messages never reach clients.
    pub fn is_internal(&self) -> bool {
        matches!(
            self,
            Self::Internal
                | Self::Database
                | Self::Storage
                | Self::Configuration
                | Self::Serialization
        )
    }

    /// Stable upper-case code, used in logs.
    pub fn code(&self) -> &'static str {
        match self {
            Self::NotFound => "NOT_FOUND",
            Self::Unauthorized => "UNAUTHORIZED",
            Self::Forbidden => "FORBIDDEN",
            Self::Validation => "VALIDATION",
            Self::Conflict => "CONFLICT",
            Self::Internal => "INTERNAL",
            Self::Database => "DATABASE",
            Self::Storage => "STORAGE",
            Self::Configuration => "CONFIGURATION",
            Self::Serialization => "SERIALIZATION",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

type BoxedCause = Box<dyn std::error::Error + Send + Sync>;

#[derive(Debug, Error)]
#[error("{kind}: {message}")]
pub struct AppError {
    pub kind: ErrorKind,
    /// Client-facing text for non-internal kinds.
    pub message: String,
    /// Per-field validation messages, rendered as `errors` in responses.
    pub details: Vec<String>,
    #[source]
    pub source: Option<BoxedCause>,
}

impl AppError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            details: Vec::new(),
            source: None,
        }
    }

    /// Like [`AppError::new`], keeping `cause` for logs.
    pub fn with_source(
        kind: ErrorKind,
        message: impl Into<String>,
        cause: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        let mut err = Self::new(kind, message);
        err.source = Some(Box::new(cause));
        err
    }

    pub fn with_details(mut self, details: Vec<String>) -> Self {
        self.details = details;
        self
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::NotFound, message)
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Unauthorized, message)
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Forbidden, message)
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Validation, message)
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Conflict, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Internal, message)
    }

    pub fn database(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Database, message)
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Configuration, message)
    }
}

/// Clones drop the boxed cause, which is not `Clone`.
impl Clone for AppError {
    fn clone(&self) -> Self {
        Self::new(self.kind, self.message.clone()).with_details(self.details.clone())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        let message = format!("Invalid JSON: {err}");
        Self::with_source(ErrorKind::Serialization, message, err)
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        let message = format!("Filesystem error: {err}");
        Self::with_source(ErrorKind::Storage, message, err)
    }
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        let message = format!("Bad configuration: {err}");
        Self::with_source(ErrorKind::Configuration, message, err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_includes_kind_and_message() {
        let err = AppError::conflict("Email already registered");
        assert_eq!(err.to_string(), "CONFLICT: Email already registered");
    }

    #[test]
    fn test_internal_kinds() {
        assert!(ErrorKind::Database.is_internal());
        assert!(ErrorKind::Storage.is_internal());
        assert!(!ErrorKind::Forbidden.is_internal());
        assert!(!ErrorKind::Validation.is_internal());
    }

    #[test]
    fn test_clone_drops_source_keeps_details() {
        let io = std::io::Error::other("disk");
        let err = AppError::with_source(ErrorKind::Storage, "write failed", io)
            .with_details(vec!["file too large".into()]);
        let cloned = err.clone();
        assert!(cloned.source.is_none());
        assert_eq!(cloned.details, vec!["file too large".to_string()]);
        assert_eq!(cloned.kind, ErrorKind::Storage);
    }
}
