//! Portfolio gallery items.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// An image in a user's portfolio.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioItem {
    /// Item ID.
    pub id: Uuid,
    /// Owner.
    pub user_id: Uuid,
    /// Image location.
    pub image_url: String,
    /// Title.
    pub title: Option<String>,
    /// Description.
    pub description: Option<String>,
    /// Soft-delete flag.
    pub is_deleted: bool,
    /// When the item was soft-deleted.
    pub deleted_at: Option<DateTime<Utc>>,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Last update time.
    pub updated_at: DateTime<Utc>,
}

/// Data for creating a portfolio item.
#[derive(Debug, Clone)]
pub struct CreatePortfolioItem {
    /// Owner.
    pub user_id: Uuid,
    /// Image location.
    pub image_url: String,
    /// Title.
    pub title: Option<String>,
    /// Description.
    pub description: Option<String>,
}

/// Partial portfolio update.
#[derive(Debug, Clone, Default)]
pub struct UpdatePortfolioItem {
    /// New image location.
    pub image_url: Option<String>,
    /// New title.
    pub title: Option<String>,
    /// New description.
    pub description: Option<String>,
}
