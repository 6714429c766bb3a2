//! Category entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A browsable work category such as "Web Development".
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    /// Category ID.
    pub id: Uuid,
    /// Unique display name.
    pub name: String,
    /// Unique URL slug.
    pub slug: String,
    /// Description.
    pub description: Option<String>,
    /// Icon URL.
    pub icon_url: Option<String>,
    /// Hidden from public listings when false.
    pub is_active: bool,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Last update time.
    pub updated_at: DateTime<Utc>,
}

/// Data for creating a category.
#[derive(Debug, Clone)]
pub struct CreateCategory {
    /// Name.
    pub name: String,
    /// Slug.
    pub slug: String,
    /// Description.
    pub description: Option<String>,
    /// Icon URL.
    pub icon_url: Option<String>,
}

/// Partial category update.
#[derive(Debug, Clone, Default)]
pub struct UpdateCategory {
    /// New name.
    pub name: Option<String>,
    /// New slug.
    pub slug: Option<String>,
    /// New description.
    pub description: Option<String>,
    /// New icon URL.
    pub icon_url: Option<String>,
    /// Activate or deactivate.
    pub is_active: Option<bool>,
}
