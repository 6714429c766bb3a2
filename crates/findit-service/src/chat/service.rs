//! Chat room and message operations with participant checks.

use std::sync::Arc;

use tracing::{debug, info};
use uuid::Uuid;

use findit_core::error::AppError;
use findit_core::types::Pagination;
use findit_database::repositories::chat::{ChatRoomRepository, MessageRepository};
use findit_database::repositories::user::UserRepository;
use findit_entity::chat::{ChatRoom, Message, MessageWithSender, RoomView, UserRoom};

/// Maximum message length in characters.
pub const MAX_MESSAGE_LENGTH: usize = 5000;

/// Handles chat use cases. Callers identify themselves by user ID so the
/// same checks apply over HTTP and WebSocket.
#[derive(Debug, Clone)]
pub struct ChatService {
    /// Room repository.
    room_repo: Arc<ChatRoomRepository>,
    /// Message repository.
    message_repo: Arc<MessageRepository>,
    /// User repository (for receiver and participant lookups).
    user_repo: Arc<UserRepository>,
}

impl ChatService {
    /// Creates a new chat service.
    pub fn new(
        room_repo: Arc<ChatRoomRepository>,
        message_repo: Arc<MessageRepository>,
        user_repo: Arc<UserRepository>,
    ) -> Self {
        Self {
            room_repo,
            message_repo,
            user_repo,
        }
    }

    /// Return the room for this pair and opportunity, creating it if needed.
    /// With no opportunity, any existing room between the two users is returned.
    ///
    /// The flag is `true` when the room was created by this call.
    pub async fn create_room(
        &self,
        requester_id: Uuid,
        receiver_id: Uuid,
        opportunity_id: Option<Uuid>,
    ) -> Result<(ChatRoom, bool), AppError> {
        if requester_id == receiver_id {
            return Err(AppError::validation("Cannot create chat room with yourself"));
        }
        if !self.user_repo.exists(receiver_id).await? {
            return Err(AppError::not_found("User not found"));
        }

        let (room, created) = self
            .room_repo
            .find_or_create(requester_id, receiver_id, opportunity_id)
            .await?;

        if created {
            info!(
                room_id = %room.id,
                sender_id = %requester_id,
                receiver_id = %receiver_id,
                "Chat room created"
            );
        }
        Ok((room, created))
    }

    /// Every room the user takes part in, most recent activity first.
    pub async fn user_rooms(&self, user_id: Uuid) -> Result<Vec<UserRoom>, AppError> {
        self.room_repo.find_by_user(user_id).await
    }

    /// Load a room, requiring the caller to be a participant.
    pub async fn authorize(&self, room_id: Uuid, user_id: Uuid) -> Result<ChatRoom, AppError> {
        let room = self
            .room_repo
            .find_by_id(room_id)
            .await?
            .ok_or_else(|| AppError::not_found("Chat room not found"))?;

        if !room.is_participant(user_id) {
            return Err(AppError::forbidden("Not a participant of this chat room"));
        }
        Ok(room)
    }

    /// A room with the other participant's public profile.
    pub async fn get_room(&self, room_id: Uuid, user_id: Uuid) -> Result<RoomView, AppError> {
        let room = self.authorize(room_id, user_id).await?;
        let other_user = self
            .user_repo
            .find_summary(room.other_participant(user_id))
            .await?
            .ok_or_else(|| AppError::not_found("User not found"))?;

        Ok(RoomView { room, other_user })
    }

    /// Store a message from a participant.
    pub async fn send_message(
        &self,
        room_id: Uuid,
        sender_id: Uuid,
        content: &str,
    ) -> Result<Message, AppError> {
        let content = validate_content(content)?;
        self.authorize(room_id, sender_id).await?;

        let message = self.message_repo.create(room_id, sender_id, content).await?;
        debug!(room_id = %room_id, sender_id = %sender_id, message_id = %message.id, "Message stored");
        Ok(message)
    }

    /// Messages in a room, newest first.
    pub async fn get_messages(
        &self,
        room_id: Uuid,
        user_id: Uuid,
        page: Pagination,
    ) -> Result<Vec<MessageWithSender>, AppError> {
        self.authorize(room_id, user_id).await?;
        self.message_repo.find_by_room(room_id, page).await
    }

    /// Flag a message as read.
    ///
    /// Any authenticated user may do this; there is no participant check.
    pub async fn mark_as_read(&self, message_id: Uuid, user_id: Uuid) -> Result<Message, AppError> {
        let message = self
            .message_repo
            .mark_read(message_id)
            .await?
            .ok_or_else(|| AppError::not_found("Message not found"))?;
        debug!(message_id = %message_id, user_id = %user_id, "Message marked read");
        Ok(message)
    }
}

/// Trimmed, non-empty content within the length limit.
fn validate_content(content: &str) -> Result<&str, AppError> {
    let trimmed = content.trim();
    if trimmed.is_empty() {
        return Err(AppError::validation("Message content cannot be empty"));
    }
    if trimmed.chars().count() > MAX_MESSAGE_LENGTH {
        return Err(AppError::validation(format!(
            "Message content cannot exceed {MAX_MESSAGE_LENGTH} characters"
        )));
    }
    Ok(trimmed)
}
