//! Reduced user views embedded in other resources.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Public card for a user: id, name, and photo.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct UserSummary {
    /// User ID.
    pub id: Uuid,
    /// Display name.
    pub name: String,
    /// Profile photo path.
    pub user_photo: Option<String>,
}

/// Contact card shown on an opportunity's detail page.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    /// User ID.
    pub id: Uuid,
    /// Display name.
    pub name: String,
    /// Email.
    pub email: String,
    /// Profile photo path.
    pub user_photo: Option<String>,
    /// City.
    pub city: Option<String>,
    /// State.
    pub state: Option<String>,
    /// Country.
    pub country: Option<String>,
}

/// Aggregated reputation numbers for a user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserStats {
    /// Opportunities this user was recorded as completing.
    pub completed_jobs: i64,
    /// Mean feedback rating, rounded to one decimal.
    pub average_rating: f64,
    /// Number of feedbacks received.
    pub feedback_count: i64,
}
