//! Feedback (ratings between users).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::user::UserSummary;

/// Lowest accepted rating.
pub const MIN_RATING: i32 = 1;
/// Highest accepted rating.
pub const MAX_RATING: i32 = 5;

/// One user's rating of another.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Feedback {
    /// Feedback ID.
    pub id: Uuid,
    /// Author of the rating.
    pub reviewer_id: Uuid,
    /// Subject of the rating.
    pub reviewee_id: Uuid,
    /// 1 to 5.
    pub rating: i32,
    /// Optional text.
    pub comment: Option<String>,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Last update time.
    pub updated_at: DateTime<Utc>,
}

/// Feedback with the reviewer's public card.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackWithReviewer {
    /// Feedback fields.
    #[serde(flatten)]
    pub feedback: Feedback,
    /// Reviewer.
    pub reviewer: UserSummary,
}

/// Data for creating feedback.
#[derive(Debug, Clone)]
pub struct CreateFeedback {
    /// Author.
    pub reviewer_id: Uuid,
    /// Subject.
    pub reviewee_id: Uuid,
    /// Rating.
    pub rating: i32,
    /// Comment.
    pub comment: Option<String>,
}

/// Partial feedback update.
#[derive(Debug, Clone, Default)]
pub struct UpdateFeedback {
    /// New rating.
    pub rating: Option<i32>,
    /// New comment.
    pub comment: Option<String>,
}

/// Average rating summary for a user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RatingSummary {
    /// Mean rating rounded to one decimal, 0 when unrated.
    pub average_rating: f64,
    /// Number of feedbacks.
    pub total_feedbacks: i64,
}

impl RatingSummary {
    /// Build a summary from a raw SQL average.
    pub fn new(average: Option<f64>, total: i64) -> Self {
        Self {
            average_rating: round_rating(average.unwrap_or(0.0)),
            total_feedbacks: total,
        }
    }
}

/// Round a rating to one decimal place.
pub fn round_rating(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Whether `rating` is within the accepted range.
pub fn is_valid_rating(rating: i32) -> bool {
    (MIN_RATING..=MAX_RATING).contains(&rating)
}
