//! Opportunity entity and its read views.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::status::OpportunityStatus;
use crate::category::Category;
use crate::user::{UserProfile, UserSummary};

/// A job posting.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Opportunity {
    /// Opportunity ID.
    pub id: Uuid,
    /// Owner.
    pub user_id: Uuid,
    /// Category.
    pub category_id: Uuid,
    /// Title.
    pub title: String,
    /// Description.
    pub description: String,
    /// Lower bound of the budget.
    pub price_min: Option<f64>,
    /// Upper bound of the budget.
    pub price_max: Option<f64>,
    /// City.
    pub city: Option<String>,
    /// State or region.
    pub state: Option<String>,
    /// Country.
    pub country: String,
    /// Lifecycle status.
    pub status: OpportunityStatus,
    /// Soft-delete flag.
    pub is_deleted: bool,
    /// When the opportunity was soft-deleted.
    pub deleted_at: Option<DateTime<Utc>>,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Last update time.
    pub updated_at: DateTime<Utc>,
}

impl Opportunity {
    /// Whether `user_id` owns this opportunity.
    pub fn is_owned_by(&self, user_id: Uuid) -> bool {
        self.user_id == user_id
    }
}

/// An opportunity as shown in search results.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OpportunityListing {
    /// The opportunity fields.
    #[serde(flatten)]
    pub opportunity: Opportunity,
    /// Its category.
    pub category: Category,
    /// The poster's public card.
    pub user: UserSummary,
}

/// An opportunity as shown on its detail page.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OpportunityDetail {
    /// The opportunity fields.
    #[serde(flatten)]
    pub opportunity: Opportunity,
    /// Its category.
    pub category: Category,
    /// The poster's contact card.
    pub user: UserProfile,
}

/// Data for creating an opportunity.
#[derive(Debug, Clone)]
pub struct CreateOpportunity {
    /// Owner.
    pub user_id: Uuid,
    /// Category.
    pub category_id: Uuid,
    /// Title.
    pub title: String,
    /// Description.
    pub description: String,
    /// Budget lower bound.
    pub price_min: Option<f64>,
    /// Budget upper bound.
    pub price_max: Option<f64>,
    /// City.
    pub city: Option<String>,
    /// State.
    pub state: Option<String>,
    /// Country.
    pub country: String,
}

/// Partial opportunity update.
#[derive(Debug, Clone, Default)]
pub struct UpdateOpportunity {
    /// New category.
    pub category_id: Option<Uuid>,
    /// New title.
    pub title: Option<String>,
    /// New description.
    pub description: Option<String>,
    /// New lower bound.
    pub price_min: Option<f64>,
    /// New upper bound.
    pub price_max: Option<f64>,
    /// New city.
    pub city: Option<String>,
    /// New state.
    pub state: Option<String>,
    /// New country.
    pub country: Option<String>,
    /// New status.
    pub status: Option<OpportunityStatus>,
}

/// Record that a user completed an opportunity. Feeds reputation stats.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct CompletedOpportunity {
    /// Row ID.
    pub id: Uuid,
    /// The completed opportunity.
    pub opportunity_id: Uuid,
    /// Who did the work.
    pub completed_by_user_id: Uuid,
    /// When completion was recorded.
    pub created_at: DateTime<Utc>,
}
