//! Search filters for opportunity listings.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use findit_core::AppError;
use findit_core::types::Pagination;

/// Result ordering for opportunity listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OpportunitySort {
    /// Most recently created first.
    #[default]
    Newest,
    /// Oldest first.
    Oldest,
    /// Cheapest lower bound first.
    PriceAsc,
    /// Most expensive upper bound first.
    PriceDesc,
}

impl OpportunitySort {
    /// SQL `ORDER BY` clause for this sort. Ties break on id so paging is stable.
    pub fn order_by(&self) -> &'static str {
        match self {
            Self::Newest => "o.created_at DESC, o.id",
            Self::Oldest => "o.created_at ASC, o.id",
            Self::PriceAsc => "o.price_min ASC NULLS LAST, o.id",
            Self::PriceDesc => "o.price_max DESC NULLS LAST, o.id",
        }
    }
}

impl FromStr for OpportunitySort {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "newest" => Ok(Self::Newest),
            "oldest" => Ok(Self::Oldest),
            "price_asc" => Ok(Self::PriceAsc),
            "price_desc" => Ok(Self::PriceDesc),
            other => Err(AppError::validation(format!("Invalid sort order: '{other}'"))),
        }
    }
}

/// Every optional constraint a listing query may apply.
#[derive(Debug, Clone, Default)]
pub struct OpportunityFilter {
    /// Category slug.
    pub category: Option<String>,
    /// Case-insensitive substring of the city.
    pub city: Option<String>,
    /// Case-insensitive substring of the state.
    pub state: Option<String>,
    /// Case-insensitive substring of the country.
    pub country: Option<String>,
    /// Lower bound on `price_min`.
    pub price_min: Option<f64>,
    /// Upper bound on `price_max`.
    pub price_max: Option<f64>,
    /// Minimum average rating of the poster.
    pub min_rating: Option<f64>,
    /// Minimum number of completed jobs of the poster.
    pub min_completed_jobs: Option<i64>,
    /// Ordering.
    pub sort: OpportunitySort,
    /// Window.
    pub pagination: Pagination,
}
