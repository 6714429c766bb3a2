//! Category handlers. Reads are public; mutations require an admin.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;

use findit_entity::category::Category;

use crate::dto::request::{CategoryListQuery, CreateCategoryRequest, UpdateCategoryRequest};
use crate::dto::response::MessageResponse;
use crate::error::ApiResult;
use crate::extractors::path::parse_uuid;
use crate::extractors::{ApiQuery, AuthUser, ValidatedJson};
use crate::state::AppState;

/// GET /api/categories
pub async fn list_categories(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<CategoryListQuery>,
) -> ApiResult<Json<Vec<Category>>> {
    let categories = state.category_service.list(query.all).await?;
    Ok(Json(categories))
}

/// GET /api/categories/{id}
pub async fn get_category(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Category>> {
    let category = state.category_service.get(parse_uuid(&id)?).await?;
    Ok(Json(category))
}

/// POST /api/categories
pub async fn create_category(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(req): ValidatedJson<CreateCategoryRequest>,
) -> ApiResult<(StatusCode, Json<Category>)> {
    let category = state.category_service.create(&auth, req.into()).await?;
    Ok((StatusCode::CREATED, Json(category)))
}

/// PATCH /api/categories/{id}
pub async fn update_category(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
    ValidatedJson(req): ValidatedJson<UpdateCategoryRequest>,
) -> ApiResult<Json<Category>> {
    let category = state
        .category_service
        .update(&auth, parse_uuid(&id)?, req.into())
        .await?;
    Ok(Json(category))
}

/// DELETE /api/categories/{id}
pub async fn delete_category(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> ApiResult<Json<MessageResponse>> {
    state.category_service.delete(&auth, parse_uuid(&id)?).await?;
    Ok(Json(MessageResponse::new("Category deleted successfully")))
}
