//! Feedback handlers.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;

use findit_entity::feedback::{Feedback, FeedbackWithReviewer, RatingSummary};

use crate::dto::request::{CreateFeedbackRequest, UpdateFeedbackRequest};
use crate::dto::response::MessageResponse;
use crate::error::ApiResult;
use crate::extractors::path::parse_uuid;
use crate::extractors::{ApiQuery, AuthUser, PaginationParams, ValidatedJson};
use crate::state::AppState;

/// GET /api/users/{id}/feedbacks
pub async fn list_for_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ApiQuery(params): ApiQuery<PaginationParams>,
) -> ApiResult<Json<Vec<FeedbackWithReviewer>>> {
    let feedbacks = state
        .feedback_service
        .list_for_user(parse_uuid(&id)?, params.into_pagination())
        .await?;
    Ok(Json(feedbacks))
}

/// GET /api/users/{id}/rating
pub async fn rating(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<RatingSummary>> {
    let summary = state.feedback_service.rating(parse_uuid(&id)?).await?;
    Ok(Json(summary))
}

/// POST /api/feedbacks
pub async fn create_feedback(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(req): ValidatedJson<CreateFeedbackRequest>,
) -> ApiResult<(StatusCode, Json<Feedback>)> {
    let feedback = state
        .feedback_service
        .create(&auth, req.reviewee_id, req.rating, req.comment)
        .await?;
    Ok((StatusCode::CREATED, Json(feedback)))
}

/// PATCH /api/feedbacks/{id}
pub async fn update_feedback(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
    ValidatedJson(req): ValidatedJson<UpdateFeedbackRequest>,
) -> ApiResult<Json<Feedback>> {
    let feedback = state
        .feedback_service
        .update(&auth, parse_uuid(&id)?, req.into())
        .await?;
    Ok(Json(feedback))
}

/// DELETE /api/feedbacks/{id}
pub async fn delete_feedback(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> ApiResult<Json<MessageResponse>> {
    state
        .feedback_service
        .delete(&auth, parse_uuid(&id)?)
        .await?;
    Ok(Json(MessageResponse::new("Feedback deleted successfully")))
}
