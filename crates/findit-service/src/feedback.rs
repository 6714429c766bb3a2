//! Feedback between users.

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use findit_core::error::AppError;
use findit_core::types::Pagination;
use findit_database::repositories::feedback::FeedbackRepository;
use findit_database::repositories::user::UserRepository;
use findit_entity::feedback::{
    CreateFeedback, Feedback, FeedbackWithReviewer, MAX_RATING, MIN_RATING, RatingSummary,
    UpdateFeedback, is_valid_rating,
};

use crate::context::RequestContext;

/// Handles feedback use cases.
#[derive(Debug, Clone)]
pub struct FeedbackService {
    feedback_repo: Arc<FeedbackRepository>,
    user_repo: Arc<UserRepository>,
}

impl FeedbackService {
    /// Creates a new feedback service.
    pub fn new(feedback_repo: Arc<FeedbackRepository>, user_repo: Arc<UserRepository>) -> Self {
        Self {
            feedback_repo,
            user_repo,
        }
    }

    /// Feedback a user has received, newest first.
    pub async fn list_for_user(
        &self,
        user_id: Uuid,
        page: Pagination,
    ) -> Result<Vec<FeedbackWithReviewer>, AppError> {
        self.feedback_repo.find_by_reviewee(user_id, page).await
    }

    /// Average rating and count for a user.
    pub async fn rating(&self, user_id: Uuid) -> Result<RatingSummary, AppError> {
        self.feedback_repo.rating_summary(user_id).await
    }

    /// Leave feedback for another user. One per reviewer and reviewee.
    pub async fn create(
        &self,
        ctx: &RequestContext,
        reviewee_id: Uuid,
        rating: i32,
        comment: Option<String>,
    ) -> Result<Feedback, AppError> {
        if reviewee_id == ctx.user_id {
            return Err(AppError::validation("Cannot leave feedback for yourself"));
        }
        check_rating(rating)?;
        if !self.user_repo.exists(reviewee_id).await? {
            return Err(AppError::not_found("User not found"));
        }

        let feedback = self
            .feedback_repo
            .create(&CreateFeedback {
                reviewer_id: ctx.user_id,
                reviewee_id,
                rating,
                comment,
            })
            .await?;

        info!(
            reviewer_id = %ctx.user_id,
            reviewee_id = %reviewee_id,
            rating,
            "Feedback created"
        );
        Ok(feedback)
    }

    /// Edit one's own feedback.
    pub async fn update(
        &self,
        ctx: &RequestContext,
        id: Uuid,
        data: UpdateFeedback,
    ) -> Result<Feedback, AppError> {
        let existing = self.find(id).await?;
        if existing.reviewer_id != ctx.user_id {
            return Err(AppError::forbidden("Cannot update other users feedback"));
        }
        if let Some(rating) = data.rating {
            check_rating(rating)?;
        }

        let feedback = self.feedback_repo.update(id, &data).await?;
        info!(feedback_id = %id, "Feedback updated");
        Ok(feedback)
    }

    /// Remove one's own feedback.
    pub async fn delete(&self, ctx: &RequestContext, id: Uuid) -> Result<(), AppError> {
        let existing = self.find(id).await?;
        if existing.reviewer_id != ctx.user_id {
            return Err(AppError::forbidden("Cannot delete other users feedback"));
        }

        if !self.feedback_repo.delete(id).await? {
            return Err(AppError::not_found("Feedback not found"));
        }
        info!(feedback_id = %id, "Feedback deleted");
        Ok(())
    }

    async fn find(&self, id: Uuid) -> Result<Feedback, AppError> {
        self.feedback_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Feedback not found"))
    }
}

fn check_rating(rating: i32) -> Result<(), AppError> {
    if is_valid_rating(rating) {
        Ok(())
    } else {
        Err(AppError::validation(format!(
            "Rating must be between {MIN_RATING} and {MAX_RATING}"
        )))
    }
}
