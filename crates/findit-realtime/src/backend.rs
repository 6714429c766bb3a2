//! Chat operations the real-time channel needs from the service layer.

use async_trait::async_trait;
use uuid::Uuid;

use findit_core::error::AppError;
use findit_entity::chat::Message;
use findit_service::ChatService;

/// Persistence and authorization for socket events.
#[async_trait]
pub trait ChatBackend: Send + Sync + std::fmt::Debug + 'static {
    /// Fail unless `user_id` may see `room_id`.
    async fn authorize_room(&self, room_id: Uuid, user_id: Uuid) -> Result<(), AppError>;

    /// Store a message and return it.
    async fn send_message(
        &self,
        room_id: Uuid,
        sender_id: Uuid,
        content: &str,
    ) -> Result<Message, AppError>;

    /// Flag a message as read.
    async fn mark_as_read(&self, message_id: Uuid, user_id: Uuid) -> Result<Message, AppError>;
}

#[async_trait]
impl ChatBackend for ChatService {
    async fn authorize_room(&self, room_id: Uuid, user_id: Uuid) -> Result<(), AppError> {
        self.authorize(room_id, user_id).await.map(|_| ())
    }

    async fn send_message(
        &self,
        room_id: Uuid,
        sender_id: Uuid,
        content: &str,
    ) -> Result<Message, AppError> {
        ChatService::send_message(self, room_id, sender_id, content).await
    }

    async fn mark_as_read(&self, message_id: Uuid, user_id: Uuid) -> Result<Message, AppError> {
        ChatService::mark_as_read(self, message_id, user_id).await
    }
}
