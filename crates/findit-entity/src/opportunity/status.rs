//! Opportunity lifecycle status.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use findit_core::AppError;

/// Where an opportunity is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "opportunity_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum OpportunityStatus {
    /// Accepting applicants.
    Open,
    /// Work has started.
    InProgress,
    /// Work is done.
    Completed,
    /// Withdrawn by the owner.
    Cancelled,
}

impl OpportunityStatus {
    /// Return the status as stored in the database.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::InProgress => "in_progress",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }
}

impl Default for OpportunityStatus {
    fn default() -> Self {
        Self::Open
    }
}

impl fmt::Display for OpportunityStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for OpportunityStatus {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "open" => Ok(Self::Open),
            "in_progress" => Ok(Self::InProgress),
            "completed" => Ok(Self::Completed),
            "cancelled" => Ok(Self::Cancelled),
            other => Err(AppError::validation(format!(
                "Invalid opportunity status: '{other}'"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_round_trip() {
        for status in [
            OpportunityStatus::Open,
            OpportunityStatus::InProgress,
            OpportunityStatus::Completed,
            OpportunityStatus::Cancelled,
        ] {
            assert_eq!(status.as_str().parse::<OpportunityStatus>().unwrap(), status);
        }
        assert!("archived".parse::<OpportunityStatus>().is_err());
    }

    #[test]
    fn test_serde_uses_snake_case() {
        let json = serde_json::to_string(&OpportunityStatus::InProgress).unwrap();
        assert_eq!(json, "\"in_progress\"");
        assert_eq!(OpportunityStatus::default(), OpportunityStatus::Open);
    }
}
