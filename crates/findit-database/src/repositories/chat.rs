//! Chat room and message repositories.

use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use findit_core::error::{AppError, ErrorKind};
use findit_core::result::AppResult;
use findit_core::types::Pagination;
use findit_entity::chat::{ChatRoom, Message, MessageWithSender, OpportunityRef, RoomPair, UserRoom};
use findit_entity::user::UserSummary;

use super::is_foreign_key_violation;

/// Repository for two-party chat rooms.
#[derive(Debug, Clone)]
pub struct ChatRoomRepository {
    pool: PgPool,
}

#[derive(Debug, FromRow)]
struct UserRoomRow {
    #[sqlx(flatten)]
    room: ChatRoom,
    opp_id: Option<Uuid>,
    opp_title: Option<String>,
    other_id: Uuid,
    other_name: String,
    other_user_photo: Option<String>,
}

impl From<UserRoomRow> for UserRoom {
    fn from(row: UserRoomRow) -> Self {
        let opportunity = match (row.opp_id, row.opp_title) {
            (Some(id), Some(title)) => Some(OpportunityRef { id, title }),
            _ => None,
        };
        Self {
            room: row.room,
            opportunity,
            other_user: UserSummary {
                id: row.other_id,
                name: row.other_name,
                user_photo: row.other_user_photo,
            },
        }
    }
}

impl ChatRoomRepository {
    /// Create a new chat room repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a room by primary key.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<ChatRoom>> {
        sqlx::query_as::<_, ChatRoom>("SELECT * FROM chat_rooms WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find chat room", e))
    }

    /// Find the room for a canonical participant pair.
    pub async fn find_by_pair(&self, pair: &RoomPair) -> AppResult<Option<ChatRoom>> {
        sqlx::query_as::<_, ChatRoom>(
            "SELECT * FROM chat_rooms \
             WHERE LEAST(sender_id, receiver_id) = $1 \
               AND GREATEST(sender_id, receiver_id) = $2 \
               AND opportunity_id IS NOT DISTINCT FROM $3",
        )
        .bind(pair.low)
        .bind(pair.high)
        .bind(pair.opportunity_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find chat room", e))
    }

    /// Most recently active room between two users, whatever its opportunity.
    pub async fn find_latest_for_users(&self, a: Uuid, b: Uuid) -> AppResult<Option<ChatRoom>> {
        sqlx::query_as::<_, ChatRoom>(
            "SELECT * FROM chat_rooms \
             WHERE LEAST(sender_id, receiver_id) = LEAST($1::uuid, $2::uuid) \
               AND GREATEST(sender_id, receiver_id) = GREATEST($1::uuid, $2::uuid) \
             ORDER BY updated_at DESC, id \
             LIMIT 1",
        )
        .bind(a)
        .bind(b)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find chat room", e))
    }

    /// Return the room for this pair, creating it if needed.
    ///
    /// Without an opportunity any existing room of the pair is reused. The
    /// insert relies on the participant-pair unique index, so concurrent
    /// callers converge on one row. The flag is `true` when this call created it.
    pub async fn find_or_create(
        &self,
        sender_id: Uuid,
        receiver_id: Uuid,
        opportunity_id: Option<Uuid>,
    ) -> AppResult<(ChatRoom, bool)> {
        if opportunity_id.is_none()
            && let Some(room) = self.find_latest_for_users(sender_id, receiver_id).await?
        {
            return Ok((room, false));
        }

        let inserted = sqlx::query_as::<_, ChatRoom>(
            "INSERT INTO chat_rooms (sender_id, receiver_id, opportunity_id) \
             VALUES ($1, $2, $3) \
             ON CONFLICT DO NOTHING \
             RETURNING *",
        )
        .bind(sender_id)
        .bind(receiver_id)
        .bind(opportunity_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            if is_foreign_key_violation(&e) {
                AppError::not_found("Chat participant or opportunity not found")
            } else {
                AppError::with_source(ErrorKind::Database, "Failed to create chat room", e)
            }
        })?;

        if let Some(room) = inserted {
            return Ok((room, true));
        }

        let pair = RoomPair::new(sender_id, receiver_id, opportunity_id);
        self.find_by_pair(&pair)
            .await?
            .map(|room| (room, false))
            .ok_or_else(|| AppError::internal("Chat room vanished after conflict"))
    }

    /// Inbox for a user: every room they are in, most recent activity first.
    pub async fn find_by_user(&self, user_id: Uuid) -> AppResult<Vec<UserRoom>> {
        let rows = sqlx::query_as::<_, UserRoomRow>(
            "SELECT r.*, \
                    o.id AS opp_id, o.title AS opp_title, \
                    u.id AS other_id, u.name AS other_name, u.user_photo AS other_user_photo \
             FROM chat_rooms r \
             LEFT JOIN opportunities o ON o.id = r.opportunity_id \
             JOIN users u ON u.id = CASE WHEN r.sender_id = $1 THEN r.receiver_id ELSE r.sender_id END \
             WHERE r.sender_id = $1 OR r.receiver_id = $1 \
             ORDER BY r.updated_at DESC, r.id",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list chat rooms", e))?;

        Ok(rows.into_iter().map(Into::into).collect())
    }
}

/// Repository for chat messages.
#[derive(Debug, Clone)]
pub struct MessageRepository {
    pool: PgPool,
}

#[derive(Debug, FromRow)]
struct MessageRow {
    #[sqlx(flatten)]
    message: Message,
    s_name: String,
    s_user_photo: Option<String>,
}

impl From<MessageRow> for MessageWithSender {
    fn from(row: MessageRow) -> Self {
        let sender = UserSummary {
            id: row.message.sender_id,
            name: row.s_name,
            user_photo: row.s_user_photo,
        };
        Self {
            message: row.message,
            sender,
        }
    }
}

impl MessageRepository {
    /// Create a new message repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a message by primary key.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Message>> {
        sqlx::query_as::<_, Message>("SELECT * FROM messages WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find message", e))
    }

    /// Store a message and bump the room's activity time in one transaction.
    pub async fn create(&self, room_id: Uuid, sender_id: Uuid, content: &str) -> AppResult<Message> {
        let mut tx = self.pool.begin().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to begin transaction", e)
        })?;

        let message = sqlx::query_as::<_, Message>(
            "INSERT INTO messages (chat_room_id, sender_id, content) \
             VALUES ($1, $2, $3) RETURNING *",
        )
        .bind(room_id)
        .bind(sender_id)
        .bind(content)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to store message", e))?;

        touch_room(&mut tx, room_id, message.created_at).await?;

        tx.commit()
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to commit message", e))?;

        Ok(message)
    }

    /// Messages in a room, newest first, each with its sender.
    pub async fn find_by_room(
        &self,
        room_id: Uuid,
        page: Pagination,
    ) -> AppResult<Vec<MessageWithSender>> {
        let rows = sqlx::query_as::<_, MessageRow>(
            "SELECT m.*, u.name AS s_name, u.user_photo AS s_user_photo \
             FROM messages m \
             JOIN users u ON u.id = m.sender_id \
             WHERE m.chat_room_id = $1 \
             ORDER BY m.created_at DESC, m.id \
             LIMIT $2 OFFSET $3",
        )
        .bind(room_id)
        .bind(page.limit)
        .bind(page.offset)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list messages", e))?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// Flag a message as read.
    pub async fn mark_read(&self, id: Uuid) -> AppResult<Option<Message>> {
        sqlx::query_as::<_, Message>(
            "UPDATE messages SET is_read = TRUE WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to mark message read", e))
    }
}

async fn touch_room(
    tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
    room_id: Uuid,
    at: DateTime<Utc>,
) -> AppResult<()> {
    sqlx::query("UPDATE chat_rooms SET updated_at = GREATEST(updated_at, $2) WHERE id = $1")
        .bind(room_id)
        .bind(at)
        .execute(&mut **tx)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to touch chat room", e))?;
    Ok(())
}
