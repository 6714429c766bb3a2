//! Maps domain `AppError` to HTTP responses.
//!
//! Handlers return [`ApiError`]; its response carries the JSON envelope and
//! an [`ErrorEnvelope`] extension. The `error_envelope` middleware fills in
//! the request path and logs the failure.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use findit_core::error::{AppError, ErrorKind};

/// Message shown for every server-side failure.
pub const INTERNAL_MESSAGE: &str = "Internal server error";

/// Standard API error response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorEnvelope {
    /// HTTP status code.
    pub status_code: u16,
    /// Human-readable message.
    pub message: String,
    /// Per-field validation messages.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<String>>,
    /// Request path.
    pub path: String,
    /// When the error was produced (RFC 3339).
    pub timestamp: String,
}

/// Internal detail of a failed request, kept out of the response body.
#[derive(Debug, Clone)]
pub struct ErrorDetail(pub String);

/// Error type returned by every handler and extractor.
#[derive(Debug)]
pub struct ApiError(pub AppError);

/// Handler result.
pub type ApiResult<T> = Result<T, ApiError>;

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        Self(err)
    }
}

/// HTTP status for an error kind.
pub fn status_for(kind: ErrorKind) -> StatusCode {
    match kind {
        ErrorKind::Validation => StatusCode::BAD_REQUEST,
        ErrorKind::Unauthorized => StatusCode::UNAUTHORIZED,
        ErrorKind::Forbidden => StatusCode::FORBIDDEN,
        ErrorKind::NotFound => StatusCode::NOT_FOUND,
        ErrorKind::Conflict => StatusCode::CONFLICT,
        ErrorKind::Internal
        | ErrorKind::Database
        | ErrorKind::Storage
        | ErrorKind::Configuration
        | ErrorKind::Serialization => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl ErrorEnvelope {
    /// Build the public envelope for an error. Server-side kinds are masked.
    pub fn from_error(err: &AppError, path: impl Into<String>) -> Self {
        let status = status_for(err.kind);
        let message = if err.kind.is_internal() {
            INTERNAL_MESSAGE.to_string()
        } else {
            err.message.clone()
        };
        let errors = (!err.details.is_empty()).then(|| err.details.clone());

        Self {
            status_code: status.as_u16(),
            message,
            errors,
            path: path.into(),
            timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        }
    }

    /// Envelope for a failure that did not come from an [`AppError`].
    pub fn from_status(status: StatusCode, path: impl Into<String>) -> Self {
        let message = if status.is_server_error() {
            INTERNAL_MESSAGE
        } else {
            status.canonical_reason().unwrap_or("Request failed")
        };

        Self {
            status_code: status.as_u16(),
            message: message.to_string(),
            errors: None,
            path: path.into(),
            timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let err = self.0;
        let status = status_for(err.kind);
        let envelope = ErrorEnvelope::from_error(&err, "");

        let detail = match &err.source {
            Some(source) => format!("{err} ({source})"),
            None => err.to_string(),
        };

        let mut response = (status, Json(envelope.clone())).into_response();
        response.extensions_mut().insert(envelope);
        response.extensions_mut().insert(ErrorDetail(detail));
        response
    }
}
