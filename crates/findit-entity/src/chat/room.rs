//! Two-party chat rooms.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::user::UserSummary;

/// A conversation between exactly two users, optionally about an opportunity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct ChatRoom {
    /// Room ID.
    pub id: Uuid,
    /// Related opportunity.
    pub opportunity_id: Option<Uuid>,
    /// The user who opened the room.
    pub sender_id: Uuid,
    /// The other participant.
    pub receiver_id: Uuid,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Bumped on every message; drives inbox ordering.
    pub updated_at: DateTime<Utc>,
}

impl ChatRoom {
    /// Whether `user_id` is one of the two participants.
    pub fn is_participant(&self, user_id: Uuid) -> bool {
        self.sender_id == user_id || self.receiver_id == user_id
    }

    /// The participant that is not `user_id`.
    pub fn other_participant(&self, user_id: Uuid) -> Uuid {
        if self.sender_id == user_id {
            self.receiver_id
        } else {
            self.sender_id
        }
    }
}

/// The canonical, order-independent key of a room.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RoomPair {
    /// The smaller participant id.
    pub low: Uuid,
    /// The larger participant id.
    pub high: Uuid,
    /// Related opportunity.
    pub opportunity_id: Option<Uuid>,
}

impl RoomPair {
    /// Normalize a participant pair so `(a, b)` and `(b, a)` are equal.
    pub fn new(a: Uuid, b: Uuid, opportunity_id: Option<Uuid>) -> Self {
        let (low, high) = if a <= b { (a, b) } else { (b, a) };
        Self {
            low,
            high,
            opportunity_id,
        }
    }
}

/// Minimal reference to the opportunity a room is about.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct OpportunityRef {
    /// Opportunity ID.
    pub id: Uuid,
    /// Opportunity title.
    pub title: String,
}

/// A single room as seen by one participant.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomView {
    /// Room fields.
    #[serde(flatten)]
    pub room: ChatRoom,
    /// The other participant.
    pub other_user: UserSummary,
}

/// An inbox entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRoom {
    /// Room fields.
    #[serde(flatten)]
    pub room: ChatRoom,
    /// Related opportunity, if any.
    pub opportunity: Option<OpportunityRef>,
    /// The other participant.
    pub other_user: UserSummary,
}
