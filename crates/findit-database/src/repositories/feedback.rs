//! Feedback repository implementation.

use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use findit_core::error::{AppError, ErrorKind};
use findit_core::result::AppResult;
use findit_core::types::Pagination;
use findit_entity::feedback::{
    CreateFeedback, Feedback, FeedbackWithReviewer, RatingSummary, UpdateFeedback,
};
use findit_entity::user::UserSummary;

use super::{is_foreign_key_violation, is_unique_violation};

#[derive(Debug, FromRow)]
struct FeedbackRow {
    #[sqlx(flatten)]
    feedback: Feedback,
    r_name: String,
    r_user_photo: Option<String>,
}

impl From<FeedbackRow> for FeedbackWithReviewer {
    fn from(row: FeedbackRow) -> Self {
        let reviewer = UserSummary {
            id: row.feedback.reviewer_id,
            name: row.r_name,
            user_photo: row.r_user_photo,
        };
        Self {
            feedback: row.feedback,
            reviewer,
        }
    }
}

/// Repository for user-to-user feedback.
#[derive(Debug, Clone)]
pub struct FeedbackRepository {
    pool: PgPool,
}

impl FeedbackRepository {
    /// Create a new feedback repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a feedback by primary key.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Feedback>> {
        sqlx::query_as::<_, Feedback>("SELECT * FROM feedbacks WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find feedback", e))
    }

    /// Feedback received by a user, newest first.
    pub async fn find_by_reviewee(
        &self,
        reviewee_id: Uuid,
        page: Pagination,
    ) -> AppResult<Vec<FeedbackWithReviewer>> {
        let rows = sqlx::query_as::<_, FeedbackRow>(
            "SELECT f.*, u.name AS r_name, u.user_photo AS r_user_photo \
             FROM feedbacks f \
             JOIN users u ON u.id = f.reviewer_id \
             WHERE f.reviewee_id = $1 \
             ORDER BY f.created_at DESC, f.id \
             LIMIT $2 OFFSET $3",
        )
        .bind(reviewee_id)
        .bind(page.limit)
        .bind(page.offset)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list feedback", e))?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// Average rating and count for a user.
    pub async fn rating_summary(&self, reviewee_id: Uuid) -> AppResult<RatingSummary> {
        let (average, total): (Option<f64>, i64) = sqlx::query_as(
            "SELECT AVG(rating)::float8, COUNT(*) FROM feedbacks WHERE reviewee_id = $1",
        )
        .bind(reviewee_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to compute rating", e))?;

        Ok(RatingSummary::new(average, total))
    }

    /// Insert feedback. A second feedback for the same pair is a conflict.
    pub async fn create(&self, data: &CreateFeedback) -> AppResult<Feedback> {
        sqlx::query_as::<_, Feedback>(
            "INSERT INTO feedbacks (reviewer_id, reviewee_id, rating, comment) \
             VALUES ($1, $2, $3, $4) RETURNING *",
        )
        .bind(data.reviewer_id)
        .bind(data.reviewee_id)
        .bind(data.rating)
        .bind(&data.comment)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e, "feedbacks_reviewer_reviewee_key") {
                AppError::conflict("You have already left feedback for this user")
            } else if is_foreign_key_violation(&e) {
                AppError::not_found("User not found")
            } else {
                AppError::with_source(ErrorKind::Database, "Failed to create feedback", e)
            }
        })
    }

    /// Apply a partial update.
    pub async fn update(&self, id: Uuid, data: &UpdateFeedback) -> AppResult<Feedback> {
        sqlx::query_as::<_, Feedback>(
            "UPDATE feedbacks SET rating = COALESCE($2, rating), \
                                  comment = COALESCE($3, comment), \
                                  updated_at = NOW() \
             WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(data.rating)
        .bind(&data.comment)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update feedback", e))?
        .ok_or_else(|| AppError::not_found("Feedback not found"))
    }

    /// Delete a feedback.
    pub async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM feedbacks WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to delete feedback", e)
            })?;
        Ok(result.rows_affected() > 0)
    }
}
