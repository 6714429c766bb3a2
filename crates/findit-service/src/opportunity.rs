//! Opportunity postings: search, detail, and owner-guarded mutations.

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use findit_core::error::AppError;
use findit_core::types::Pagination;
use findit_database::repositories::opportunity::OpportunityRepository;
use findit_entity::opportunity::{
    CompletedOpportunity, CreateOpportunity, Opportunity, OpportunityDetail, OpportunityFilter,
    OpportunityListing, UpdateOpportunity,
};

use crate::context::RequestContext;

/// Handles opportunity use cases.
#[derive(Debug, Clone)]
pub struct OpportunityService {
    /// Opportunity repository.
    opportunity_repo: Arc<OpportunityRepository>,
}

impl OpportunityService {
    /// Creates a new opportunity service.
    pub fn new(opportunity_repo: Arc<OpportunityRepository>) -> Self {
        Self { opportunity_repo }
    }

    /// Search live opportunities.
    ///
    /// Price bounds are applied independently, so an inverted range simply
    /// matches nothing.
    pub async fn search(&self, filter: &OpportunityFilter) -> Result<Vec<OpportunityListing>, AppError> {
        self.opportunity_repo.search(filter).await
    }

    /// Count live opportunities, optionally within a category.
    pub async fn count(&self, category_slug: Option<&str>) -> Result<i64, AppError> {
        self.opportunity_repo.count(category_slug).await
    }

    /// Public detail view. Deleted postings are not found.
    pub async fn get(&self, id: Uuid) -> Result<OpportunityDetail, AppError> {
        self.opportunity_repo
            .find_detail(id)
            .await?
            .ok_or_else(|| AppError::not_found("Opportunity not found"))
    }

    /// A user's live postings, newest first.
    pub async fn list_by_user(
        &self,
        user_id: Uuid,
        page: Pagination,
    ) -> Result<Vec<Opportunity>, AppError> {
        self.opportunity_repo.find_by_user(user_id, page).await
    }

    /// Create a posting owned by the caller.
    pub async fn create(
        &self,
        ctx: &RequestContext,
        mut data: CreateOpportunity,
    ) -> Result<Opportunity, AppError> {
        validate_price_range(data.price_min, data.price_max)?;
        data.user_id = ctx.user_id;

        let opportunity = self.opportunity_repo.create(&data).await?;
        info!(
            user_id = %ctx.user_id,
            opportunity_id = %opportunity.id,
            "Opportunity created"
        );
        Ok(opportunity)
    }

    /// Update a posting. Owner or admin.
    pub async fn update(
        &self,
        ctx: &RequestContext,
        id: Uuid,
        data: UpdateOpportunity,
    ) -> Result<Opportunity, AppError> {
        let existing = self.find_live(id).await?;
        if !ctx.owns_or_admin(existing.user_id) {
            return Err(AppError::forbidden("Cannot update other users opportunities"));
        }

        validate_price_range(
            data.price_min.or(existing.price_min),
            data.price_max.or(existing.price_max),
        )?;

        let opportunity = self.opportunity_repo.update(id, &data).await?;
        info!(user_id = %ctx.user_id, opportunity_id = %id, "Opportunity updated");
        Ok(opportunity)
    }

    /// Mark a posting completed by another user. Owner only.
    pub async fn complete(
        &self,
        ctx: &RequestContext,
        id: Uuid,
        completed_by: Uuid,
    ) -> Result<(Opportunity, CompletedOpportunity), AppError> {
        let existing = self.find_live(id).await?;
        if !existing.is_owned_by(ctx.user_id) {
            return Err(AppError::forbidden(
                "Only the owner can mark opportunity as completed",
            ));
        }

        let result = self.opportunity_repo.mark_completed(id, completed_by).await?;
        info!(
            opportunity_id = %id,
            completed_by = %completed_by,
            "Opportunity completed"
        );
        Ok(result)
    }

    /// Soft-delete a posting. Owner or admin.
    pub async fn delete(&self, ctx: &RequestContext, id: Uuid) -> Result<(), AppError> {
        let existing = self.find_live(id).await?;
        if !ctx.owns_or_admin(existing.user_id) {
            return Err(AppError::forbidden("Cannot delete other users opportunities"));
        }

        if !self.opportunity_repo.soft_delete(id).await? {
            return Err(AppError::not_found("Opportunity not found"));
        }
        info!(user_id = %ctx.user_id, opportunity_id = %id, "Opportunity deleted");
        Ok(())
    }

    async fn find_live(&self, id: Uuid) -> Result<Opportunity, AppError> {
        self.opportunity_repo
            .find_by_id(id)
            .await?
            .filter(|o| !o.is_deleted)
            .ok_or_else(|| AppError::not_found("Opportunity not found"))
    }
}

/// Prices must be non-negative, and the minimum may not exceed the maximum.
fn validate_price_range(min: Option<f64>, max: Option<f64>) -> Result<(), AppError> {
    if min.is_some_and(|v| v < 0.0) || max.is_some_and(|v| v < 0.0) {
        return Err(AppError::validation("Prices cannot be negative"));
    }
    if let (Some(min), Some(max)) = (min, max)
        && min > max
    {
        return Err(AppError::validation(
            "priceMin must be less than or equal to priceMax",
        ));
    }
    Ok(())
}
