//! Chat messages.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::user::UserSummary;

/// A message posted to a chat room.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    /// Message ID.
    pub id: Uuid,
    /// Room.
    pub chat_room_id: Uuid,
    /// Author.
    pub sender_id: Uuid,
    /// Body text.
    pub content: String,
    /// Read flag.
    pub is_read: bool,
    /// Post time.
    pub created_at: DateTime<Utc>,
}

/// A message with its author's public card.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageWithSender {
    /// Message fields.
    #[serde(flatten)]
    pub message: Message,
    /// Author.
    pub sender: UserSummary,
}
