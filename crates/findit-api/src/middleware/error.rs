//! Turns every failed response into the JSON error envelope.
//!
//! Handler errors arrive with an [`ErrorEnvelope`] extension that lacks the
//! request path. Responses produced by axum itself (unknown method, upgrade
//! failures, body limits) carry no envelope and get one built from their
//! status.

use axum::body::Body;
use axum::extract::Request;
use axum::http::header::{CONTENT_LENGTH, CONTENT_TYPE};
use axum::http::{HeaderValue, StatusCode};
use axum::middleware::Next;
use axum::response::Response;
use tracing::{error, warn};

use crate::error::{ErrorDetail, ErrorEnvelope};

/// Fill in the envelope path, rewrite the body, and log the failure.
pub async fn error_envelope(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_string();

    let response = next.run(request).await;
    let status = response.status();
    if !(status.is_client_error() || status.is_server_error()) {
        return response;
    }

    let (mut parts, body) = response.into_parts();
    let envelope = match parts.extensions.remove::<ErrorEnvelope>() {
        Some(mut envelope) => {
            envelope.path = path.clone();
            envelope
        }
        None => ErrorEnvelope::from_status(status, path.clone()),
    };
    let detail = parts
        .extensions
        .remove::<ErrorDetail>()
        .map(|d| d.0)
        .unwrap_or_else(|| envelope.message.clone());

    log_failure(method.as_str(), &path, status, &envelope.message, &detail);

    let bytes = match serde_json::to_vec(&envelope) {
        Ok(bytes) => bytes,
        Err(e) => {
            error!(error = %e, "Failed to serialize error envelope");
            return Response::from_parts(parts, body);
        }
    };

    parts.headers.remove(CONTENT_LENGTH);
    parts
        .headers
        .insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    Response::from_parts(parts, Body::from(bytes))
}

fn log_failure(method: &str, path: &str, status: StatusCode, message: &str, detail: &str) {
    let code = status.as_u16();
    if status.is_server_error() {
        error!(detail = %detail, "{method} {path} - {code} - {message}");
    } else {
        warn!("{method} {path} - {code} - {message}");
    }
}
