//! Serves stored uploads.

use axum::extract::{Path, State};
use axum::http::header::{CACHE_CONTROL, CONTENT_TYPE};
use axum::response::{IntoResponse, Response};

use crate::error::ApiResult;
use crate::state::AppState;

/// GET /uploads/{*path}
pub async fn serve_upload(
    State(state): State<AppState>,
    Path(path): Path<String>,
) -> ApiResult<Response> {
    // The blob store rejects `..` and absolute components.
    let file = state.upload_service.read(&path).await?;
    Ok((
        [
            (CONTENT_TYPE, file.content_type),
            (CACHE_CONTROL, "public, max-age=86400"),
        ],
        file.data,
    )
        .into_response())
}
