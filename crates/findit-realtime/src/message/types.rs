//! Inbound and outbound event definitions.
//!
//! Every frame is a JSON object `{"event": "<name>", "data": <payload>}`.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use findit_entity::chat::{ChatRoom, Message};

/// Events sent by the client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "camelCase")]
pub enum InboundEvent {
    /// Join a room group. Payload is the room ID.
    JoinRoom(Uuid),
    /// Leave a room group.
    LeaveRoom(Uuid),
    /// Persist and broadcast a message.
    SendMessage(SendMessagePayload),
    /// Flag a message as read.
    MarkAsRead(Uuid),
}

/// Payload of a `sendMessage` event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendMessagePayload {
    pub room_id: Uuid,
    pub content: String,
}

/// Events sent by the server.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "camelCase")]
pub enum OutboundEvent {
    /// A message stored in a room the connection has joined.
    NewMessage(NewMessagePayload),
    /// A room was opened with this user.
    RoomCreated(ChatRoom),
    /// A request could not be served.
    Error(ErrorPayload),
}

/// A stored message plus its sender reference.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewMessagePayload {
    #[serde(flatten)]
    pub message: Message,
    pub sender: SenderRef,
}

/// Minimal sender reference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SenderRef {
    pub id: Uuid,
}

/// Error payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorPayload {
    pub message: String,
}

impl OutboundEvent {
    /// Build a `newMessage` event from a stored message.
    pub fn new_message(message: Message) -> Self {
        let sender = SenderRef {
            id: message.sender_id,
        };
        Self::NewMessage(NewMessagePayload { message, sender })
    }

    /// Build an `error` event.
    pub fn error(message: impl Into<String>) -> Self {
        Self::Error(ErrorPayload {
            message: message.into(),
        })
    }

    /// Serialize to a text frame.
    pub fn to_frame(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
