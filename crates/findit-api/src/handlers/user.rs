//! User profile handlers.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;

use findit_entity::user::{User, UserStats};

use crate::dto::request::UpdateProfileRequest;
use crate::dto::response::MessageResponse;
use crate::error::ApiResult;
use crate::extractors::path::parse_uuid;
use crate::extractors::{ApiQuery, AuthUser, ImageForm, PaginationParams, ValidatedJson};
use crate::state::AppState;

/// GET /api/users
pub async fn list_users(
    State(state): State<AppState>,
    ApiQuery(params): ApiQuery<PaginationParams>,
) -> ApiResult<Json<Vec<User>>> {
    let users = state
        .user_service
        .list_users(params.into_pagination())
        .await?;
    Ok(Json(users))
}

/// GET /api/users/me
pub async fn get_profile(State(state): State<AppState>, auth: AuthUser) -> ApiResult<Json<User>> {
    let user = state.user_service.get_profile(&auth).await?;
    Ok(Json(user))
}

/// PATCH /api/users/me
pub async fn update_profile(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(req): ValidatedJson<UpdateProfileRequest>,
) -> ApiResult<Json<User>> {
    let user = state
        .user_service
        .update_profile(&auth, req.into())
        .await?;
    Ok(Json(user))
}

/// POST /api/users/me/photo
pub async fn upload_photo(
    State(state): State<AppState>,
    auth: AuthUser,
    mut form: ImageForm,
) -> ApiResult<(StatusCode, Json<User>)> {
    let file = form.require_file()?;
    let user = state
        .user_service
        .upload_photo(
            &auth,
            file.data,
            &file.file_name,
            file.content_type.as_deref(),
        )
        .await?;
    Ok((StatusCode::CREATED, Json(user)))
}

/// DELETE /api/users/me/photo
pub async fn delete_photo(State(state): State<AppState>, auth: AuthUser) -> ApiResult<Json<User>> {
    let user = state.user_service.delete_photo(&auth).await?;
    Ok(Json(user))
}

/// GET /api/users/{id}
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<User>> {
    let user_id = parse_uuid(&id)?;
    let user = state.user_service.get_user(user_id).await?;
    Ok(Json(user))
}

/// GET /api/users/{id}/stats
pub async fn get_stats(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<UserStats>> {
    let user_id = parse_uuid(&id)?;
    let stats = state.user_service.stats(user_id).await?;
    Ok(Json(stats))
}

/// DELETE /api/users/{id}
pub async fn delete_user(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> ApiResult<Json<MessageResponse>> {
    let user_id = parse_uuid(&id)?;
    state.user_service.delete_user(&auth, user_id).await?;
    Ok(Json(MessageResponse::new("User deleted successfully")))
}
