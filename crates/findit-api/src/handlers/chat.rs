//! Chat REST handlers. Stored messages and new rooms are also pushed to
//! live WebSocket connections.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use tracing::debug;

use findit_entity::chat::{ChatRoom, Message, MessageWithSender, RoomView, UserRoom};
use findit_realtime::OutboundEvent;

use crate::dto::request::{CreateRoomRequest, SendMessageRequest};
use crate::error::ApiResult;
use crate::extractors::path::parse_uuid;
use crate::extractors::{ApiQuery, AuthUser, PaginationParams, ValidatedJson};
use crate::state::AppState;

/// GET /api/chat/rooms
pub async fn list_rooms(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<Vec<UserRoom>>> {
    let rooms = state.chat_service.user_rooms(auth.user_id).await?;
    Ok(Json(rooms))
}

/// GET /api/chat/rooms/{id}
pub async fn get_room(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> ApiResult<Json<RoomView>> {
    let room = state
        .chat_service
        .get_room(parse_uuid(&id)?, auth.user_id)
        .await?;
    Ok(Json(room))
}

/// POST /api/chat/rooms
pub async fn create_room(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(req): ValidatedJson<CreateRoomRequest>,
) -> ApiResult<(StatusCode, Json<ChatRoom>)> {
    let (room, created) = state
        .chat_service
        .create_room(auth.user_id, req.receiver_id, req.opportunity_id)
        .await?;

    if created {
        let delivered = state
            .realtime
            .connections
            .send_to_user(&req.receiver_id, &OutboundEvent::RoomCreated(room.clone()));
        debug!(room_id = %room.id, delivered, "roomCreated pushed");
    }

    Ok((StatusCode::CREATED, Json(room)))
}

/// GET /api/chat/rooms/{id}/messages
pub async fn get_messages(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
    ApiQuery(params): ApiQuery<PaginationParams>,
) -> ApiResult<Json<Vec<MessageWithSender>>> {
    let messages = state
        .chat_service
        .get_messages(
            parse_uuid(&id)?,
            auth.user_id,
            params.into_message_pagination(),
        )
        .await?;
    Ok(Json(messages))
}

/// POST /api/chat/rooms/{id}/messages
pub async fn send_message(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
    ValidatedJson(req): ValidatedJson<SendMessageRequest>,
) -> ApiResult<(StatusCode, Json<Message>)> {
    let room_id = parse_uuid(&id)?;
    let message = state
        .chat_service
        .send_message(room_id, auth.user_id, &req.content)
        .await?;

    let delivered = state
        .realtime
        .connections
        .broadcast_to_room(room_id, &OutboundEvent::new_message(message.clone()));
    debug!(room_id = %room_id, message_id = %message.id, delivered, "newMessage broadcast");

    Ok((StatusCode::CREATED, Json(message)))
}

/// PATCH /api/chat/messages/{id}/read
pub async fn mark_as_read(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> ApiResult<Json<Message>> {
    let message = state
        .chat_service
        .mark_as_read(parse_uuid(&id)?, auth.user_id)
        .await?;
    Ok(Json(message))
}
