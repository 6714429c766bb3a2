//! Portfolio handlers.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;

use findit_entity::portfolio::PortfolioItem;
use findit_service::PortfolioUpload;

use crate::dto::request::{CreatePortfolioRequest, UpdatePortfolioRequest};
use crate::dto::response::MessageResponse;
use crate::error::ApiResult;
use crate::extractors::path::parse_uuid;
use crate::extractors::{AuthUser, ImageForm, ValidatedJson};
use crate::state::AppState;

/// GET /api/users/{id}/portfolio
pub async fn list_for_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Vec<PortfolioItem>>> {
    let items = state
        .portfolio_service
        .list_for_user(parse_uuid(&id)?)
        .await?;
    Ok(Json(items))
}

/// POST /api/portfolio
pub async fn create_item(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(req): ValidatedJson<CreatePortfolioRequest>,
) -> ApiResult<(StatusCode, Json<PortfolioItem>)> {
    let item = state
        .portfolio_service
        .create(&auth, req.image_url, req.title, req.description)
        .await?;
    Ok((StatusCode::CREATED, Json(item)))
}

/// POST /api/portfolio/upload
pub async fn upload_item(
    State(state): State<AppState>,
    auth: AuthUser,
    mut form: ImageForm,
) -> ApiResult<(StatusCode, Json<PortfolioItem>)> {
    let file = form.require_file()?;
    let upload = PortfolioUpload {
        data: file.data,
        file_name: file.file_name,
        content_type: file.content_type,
        title: form.take_field("title"),
        description: form.take_field("description"),
    };

    let item = state.portfolio_service.upload(&auth, upload).await?;
    Ok((StatusCode::CREATED, Json(item)))
}

/// PATCH /api/portfolio/{id}
pub async fn update_item(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
    ValidatedJson(req): ValidatedJson<UpdatePortfolioRequest>,
) -> ApiResult<Json<PortfolioItem>> {
    let item = state
        .portfolio_service
        .update(&auth, parse_uuid(&id)?, req.into())
        .await?;
    Ok(Json(item))
}

/// DELETE /api/portfolio/{id}
pub async fn delete_item(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> ApiResult<Json<MessageResponse>> {
    state
        .portfolio_service
        .delete(&auth, parse_uuid(&id)?)
        .await?;
    Ok(Json(MessageResponse::new("Portfolio item deleted successfully")))
}
