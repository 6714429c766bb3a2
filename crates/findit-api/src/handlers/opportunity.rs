//! Opportunity handlers.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use validator::Validate;

use findit_core::error::AppError;
use findit_core::types::Pagination;
use findit_core::types::pagination::DEFAULT_LIMIT;
use findit_entity::opportunity::{
    Opportunity, OpportunityDetail, OpportunityFilter, OpportunityListing, OpportunitySort,
};

use crate::dto::request::{
    CompleteOpportunityRequest, CountQuery, CreateOpportunityRequest, OpportunityQuery,
    UpdateOpportunityRequest,
};
use crate::dto::response::{CountResponse, MessageResponse};
use crate::error::ApiResult;
use crate::extractors::json::validation_error;
use crate::extractors::path::parse_uuid;
use crate::extractors::{ApiQuery, AuthUser, PaginationParams, ValidatedJson};
use crate::state::AppState;

/// Blank query values mean "no filter".
fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl TryFrom<OpportunityQuery> for OpportunityFilter {
    type Error = AppError;

    fn try_from(query: OpportunityQuery) -> Result<Self, Self::Error> {
        let sort = match non_blank(query.sort) {
            Some(s) => s.parse::<OpportunitySort>()?,
            None => OpportunitySort::default(),
        };

        Ok(Self {
            category: non_blank(query.category),
            city: non_blank(query.city),
            state: non_blank(query.state),
            country: non_blank(query.country),
            price_min: query.price_min,
            price_max: query.price_max,
            min_rating: query.min_rating,
            min_completed_jobs: query.min_completed_jobs,
            sort,
            pagination: Pagination::from_query(query.limit, query.offset, DEFAULT_LIMIT),
        })
    }
}

/// GET /api/opportunities
pub async fn search(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<OpportunityQuery>,
) -> ApiResult<Json<Vec<OpportunityListing>>> {
    query.validate().map_err(validation_error)?;
    let filter = OpportunityFilter::try_from(query)?;
    let listings = state.opportunity_service.search(&filter).await?;
    Ok(Json(listings))
}

/// GET /api/opportunities/count
pub async fn count(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<CountQuery>,
) -> ApiResult<Json<CountResponse>> {
    let category = non_blank(query.category);
    let count = state
        .opportunity_service
        .count(category.as_deref())
        .await?;
    Ok(Json(CountResponse { count }))
}

/// GET /api/opportunities/{id}
pub async fn get_opportunity(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<OpportunityDetail>> {
    let detail = state.opportunity_service.get(parse_uuid(&id)?).await?;
    Ok(Json(detail))
}

/// GET /api/opportunities/user/me
pub async fn list_mine(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiQuery(params): ApiQuery<PaginationParams>,
) -> ApiResult<Json<Vec<Opportunity>>> {
    let items = state
        .opportunity_service
        .list_by_user(auth.user_id, params.into_pagination())
        .await?;
    Ok(Json(items))
}

/// GET /api/opportunities/user/{id}
pub async fn list_by_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ApiQuery(params): ApiQuery<PaginationParams>,
) -> ApiResult<Json<Vec<Opportunity>>> {
    let items = state
        .opportunity_service
        .list_by_user(parse_uuid(&id)?, params.into_pagination())
        .await?;
    Ok(Json(items))
}

/// POST /api/opportunities
pub async fn create_opportunity(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(req): ValidatedJson<CreateOpportunityRequest>,
) -> ApiResult<(StatusCode, Json<Opportunity>)> {
    let data = req.into_create(auth.user_id);
    let opportunity = state.opportunity_service.create(&auth, data).await?;
    Ok((StatusCode::CREATED, Json(opportunity)))
}

/// PATCH /api/opportunities/{id}
pub async fn update_opportunity(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
    ValidatedJson(req): ValidatedJson<UpdateOpportunityRequest>,
) -> ApiResult<Json<Opportunity>> {
    let opportunity = state
        .opportunity_service
        .update(&auth, parse_uuid(&id)?, req.into())
        .await?;
    Ok(Json(opportunity))
}

/// PATCH /api/opportunities/{id}/complete
pub async fn complete_opportunity(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
    ValidatedJson(req): ValidatedJson<CompleteOpportunityRequest>,
) -> ApiResult<Json<Opportunity>> {
    let (opportunity, _) = state
        .opportunity_service
        .complete(&auth, parse_uuid(&id)?, req.completed_by_user_id)
        .await?;
    Ok(Json(opportunity))
}

/// DELETE /api/opportunities/{id}
pub async fn delete_opportunity(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> ApiResult<Json<MessageResponse>> {
    state
        .opportunity_service
        .delete(&auth, parse_uuid(&id)?)
        .await?;
    Ok(Json(MessageResponse::new("Opportunity deleted successfully")))
}
