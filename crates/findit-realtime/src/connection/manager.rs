//! Connection manager: connection lifecycle, event dispatch, and fan-out.

use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use findit_core::config::realtime::RealtimeConfig;

use crate::backend::ChatBackend;
use crate::channel::registry::RoomRegistry;
use crate::message::types::{InboundEvent, OutboundEvent};
use crate::message::validator::{JOIN_FAILED, SEND_FAILED, parse_inbound};

use super::handle::{ConnectionHandle, ConnectionId, Frame};
use super::pool::ConnectionPool;

/// Manages all active WebSocket connections.
#[derive(Debug)]
pub struct ConnectionManager {
    /// Connection pool.
    pool: Arc<ConnectionPool>,
    /// Room groups.
    rooms: Arc<RoomRegistry>,
    /// Chat persistence and authorization.
    chat: Arc<dyn ChatBackend>,
    /// Configuration.
    config: RealtimeConfig,
}

impl ConnectionManager {
    /// Creates a new connection manager.
    pub fn new(config: RealtimeConfig, rooms: Arc<RoomRegistry>, chat: Arc<dyn ChatBackend>) -> Self {
        Self {
            pool: Arc::new(ConnectionPool::new()),
            rooms,
            chat,
            config,
        }
    }

    /// Registers a new authenticated connection.
    ///
    /// Returns the connection handle and a receiver for outbound frames.
    /// When the user is at the connection limit, the oldest connection is closed.
    pub fn register(&self, user_id: Uuid) -> (Arc<ConnectionHandle>, mpsc::Receiver<Frame>) {
        let (tx, rx) = mpsc::channel(self.config.channel_buffer_size);
        let handle = Arc::new(ConnectionHandle::new(user_id, tx));

        let existing = self.pool.for_user(&user_id);
        if existing.len() >= self.config.max_connections_per_user {
            warn!(
                user_id = %user_id,
                count = existing.len(),
                max = self.config.max_connections_per_user,
                "User at max connections, closing oldest"
            );
            if let Some(oldest) = existing.first() {
                oldest.close();
                self.unregister(&oldest.id);
            }
        }

        self.pool.insert(handle.clone());

        info!(
            conn_id = %handle.id,
            user_id = %user_id,
            sockets = self.pool.len(),
            users = self.pool.online_users(),
            "WebSocket connection registered"
        );
        (handle, rx)
    }

    /// Unregisters a connection and removes it from every room group.
    pub fn unregister(&self, conn_id: &ConnectionId) {
        if let Some(handle) = self.pool.take(conn_id) {
            handle.mark_closed();
            self.rooms.leave_all(*conn_id);
            info!(conn_id = %conn_id, user_id = %handle.user_id, "WebSocket connection unregistered");
        }
    }

    /// Processes an inbound text frame from a client.
    pub async fn handle_inbound(&self, conn_id: &ConnectionId, raw: &str) {
        let Some(handle) = self.pool.lookup(conn_id) else {
            warn!(conn_id = %conn_id, "Frame from unknown connection");
            return;
        };

        let event = match parse_inbound(raw, self.config.max_message_size_bytes) {
            Ok(event) => event,
            Err(e) => {
                reply(&handle, &OutboundEvent::error(e.message));
                return;
            }
        };

        match event {
            InboundEvent::JoinRoom(room_id) => self.join_room(&handle, room_id).await,
            InboundEvent::LeaveRoom(room_id) => {
                self.rooms.leave(room_id, handle.id);
                debug!(conn_id = %conn_id, room_id = %room_id, "Left room");
            }
            InboundEvent::SendMessage(payload) => {
                match self
                    .chat
                    .send_message(payload.room_id, handle.user_id, &payload.content)
                    .await
                {
                    Ok(message) => {
                        self.broadcast_to_room(payload.room_id, &OutboundEvent::new_message(message));
                    }
                    Err(e) => {
                        debug!(conn_id = %conn_id, error = %e, "Socket send rejected");
                        reply(&handle, &OutboundEvent::error(SEND_FAILED));
                    }
                }
            }
            InboundEvent::MarkAsRead(message_id) => {
                if let Err(e) = self.chat.mark_as_read(message_id, handle.user_id).await {
                    debug!(conn_id = %conn_id, message_id = %message_id, error = %e, "Mark read ignored");
                }
            }
        }
    }

    async fn join_room(&self, handle: &ConnectionHandle, room_id: Uuid) {
        match self.chat.authorize_room(room_id, handle.user_id).await {
            Ok(()) => {
                self.rooms.join(room_id, handle.id);
                // The socket may have been evicted while authorization was pending
                if !handle.is_alive() {
                    self.rooms.leave(room_id, handle.id);
                    debug!(conn_id = %handle.id, room_id = %room_id, "Join dropped for closed connection");
                    return;
                }
                debug!(conn_id = %handle.id, room_id = %room_id, "Joined room");
            }
            Err(e) => {
                debug!(conn_id = %handle.id, room_id = %room_id, error = %e, "Join rejected");
                reply(handle, &OutboundEvent::error(JOIN_FAILED));
            }
        }
    }

    /// Sends an event to every connection of a user. Returns the number queued.
    pub fn send_to_user(&self, user_id: &Uuid, event: &OutboundEvent) -> usize {
        let Some(frame) = encode(event) else {
            return 0;
        };
        self.pool
            .for_user(user_id)
            .iter()
            .filter(|conn| conn.send_text(frame.clone()))
            .count()
    }

    /// Sends an event to every connection in a room group. Returns the number queued.
    pub fn broadcast_to_room(&self, room_id: Uuid, event: &OutboundEvent) -> usize {
        let Some(frame) = encode(event) else {
            return 0;
        };
        self.rooms
            .members(room_id)
            .iter()
            .filter_map(|conn_id| self.pool.lookup(conn_id))
            .filter(|conn| conn.send_text(frame.clone()))
            .count()
    }

    /// Closes all connections.
    pub fn close_all(&self) {
        let all = self.pool.snapshot();
        for conn in &all {
            conn.close();
            self.unregister(&conn.id);
        }
        info!(count = all.len(), "All connections closed");
    }

    /// Returns the total connection count.
    pub fn connection_count(&self) -> usize {
        self.pool.len()
    }

    /// Checks if a user is currently connected.
    pub fn is_user_connected(&self, user_id: &Uuid) -> bool {
        !self.pool.for_user(user_id).is_empty()
    }

    /// Returns the real-time configuration.
    pub fn config(&self) -> &RealtimeConfig {
        &self.config
    }
}

fn encode(event: &OutboundEvent) -> Option<String> {
    match event.to_frame() {
        Ok(frame) => Some(frame),
        Err(e) => {
            error!(error = %e, "Failed to serialize outbound event");
            None
        }
    }
}

fn reply(handle: &ConnectionHandle, event: &OutboundEvent) {
    if let Some(frame) = encode(event) {
        handle.send_text(frame);
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use chrono::Utc;
    use serde_json::Value;

    use findit_core::error::AppError;
    use findit_entity::chat::Message;

    use super::*;

    /// One room with two participants.
    #[derive(Debug)]
    struct FakeChat {
        room_id: Uuid,
        members: [Uuid; 2],
    }

    #[async_trait]
    impl ChatBackend for FakeChat {
        async fn authorize_room(&self, room_id: Uuid, user_id: Uuid) -> Result<(), AppError> {
            if room_id != self.room_id {
                return Err(AppError::not_found("Chat room not found"));
            }
            if !self.members.contains(&user_id) {
                return Err(AppError::forbidden("Not a participant of this chat room"));
            }
            Ok(())
        }

        async fn send_message(
            &self,
            room_id: Uuid,
            sender_id: Uuid,
            content: &str,
        ) -> Result<Message, AppError> {
            self.authorize_room(room_id, sender_id).await?;
            Ok(Message {
                id: Uuid::new_v4(),
                chat_room_id: room_id,
                sender_id,
                content: content.to_string(),
                is_read: false,
                created_at: Utc::now(),
            })
        }

        async fn mark_as_read(&self, _message_id: Uuid, _user_id: Uuid) -> Result<Message, AppError> {
            Err(AppError::not_found("Message not found"))
        }
    }

    fn setup(max_per_user: usize) -> (ConnectionManager, FakeChatIds) {
        let ids = FakeChatIds {
            room_id: Uuid::new_v4(),
            alice: Uuid::new_v4(),
            bob: Uuid::new_v4(),
        };
        let chat = FakeChat {
            room_id: ids.room_id,
            members: [ids.alice, ids.bob],
        };
        let config = RealtimeConfig {
            max_connections_per_user: max_per_user,
            ..RealtimeConfig::default()
        };
        let manager = ConnectionManager::new(config, Arc::new(RoomRegistry::new()), Arc::new(chat));
        (manager, ids)
    }

    struct FakeChatIds {
        room_id: Uuid,
        alice: Uuid,
        bob: Uuid,
    }

    fn next_json(rx: &mut mpsc::Receiver<Frame>) -> Value {
        match rx.try_recv() {
            Ok(Frame::Text(text)) => serde_json::from_str(&text).unwrap(),
            other => panic!("expected text frame, got {other:?}"),
        }
    }

    fn join(room_id: Uuid) -> String {
        join_raw(&room_id.to_string())
    }

    fn join_raw(room_id: &str) -> String {
        format!(r#"{{"event":"joinRoom","data":"{room_id}"}}"#)
    }

    fn send(room_id: Uuid, content: &str) -> String {
        format!(r#"{{"event":"sendMessage","data":{{"roomId":"{room_id}","content":"{content}"}}}}"#)
    }

    #[tokio::test]
    async fn test_message_fans_out_to_joined_connections() {
        let (manager, ids) = setup(10);
        let (alice, mut alice_rx) = manager.register(ids.alice);
        let (bob, mut bob_rx) = manager.register(ids.bob);

        manager.handle_inbound(&alice.id, &join(ids.room_id)).await;
        manager.handle_inbound(&bob.id, &join(ids.room_id)).await;
        manager.handle_inbound(&alice.id, &send(ids.room_id, "hi")).await;

        for rx in [&mut alice_rx, &mut bob_rx] {
            let frame = next_json(rx);
            assert_eq!(frame["event"], "newMessage");
            assert_eq!(frame["data"]["content"], "hi");
            assert_eq!(frame["data"]["sender"]["id"], ids.alice.to_string());
        }
    }

    #[tokio::test]
    async fn test_non_participant_cannot_join_or_send() {
        let (manager, ids) = setup(10);
        let (mallory, mut rx) = manager.register(Uuid::new_v4());

        manager.handle_inbound(&mallory.id, &join(ids.room_id)).await;
        assert_eq!(next_json(&mut rx)["data"]["message"], JOIN_FAILED);

        manager.handle_inbound(&mallory.id, &send(ids.room_id, "x")).await;
        assert_eq!(next_json(&mut rx)["data"]["message"], SEND_FAILED);
    }

    #[tokio::test]
    async fn test_leave_and_disconnect_stop_delivery() {
        let (manager, ids) = setup(10);
        let (alice, _alice_rx) = manager.register(ids.alice);
        let (bob, mut bob_rx) = manager.register(ids.bob);

        manager.handle_inbound(&bob.id, &join(ids.room_id)).await;
        manager
            .handle_inbound(&bob.id, &format!(r#"{{"event":"leaveRoom","data":"{}"}}"#, ids.room_id))
            .await;
        manager.handle_inbound(&alice.id, &send(ids.room_id, "gone")).await;
        assert!(bob_rx.try_recv().is_err());

        manager.handle_inbound(&bob.id, &join(ids.room_id)).await;
        manager.unregister(&bob.id);
        let event = OutboundEvent::error("x");
        assert_eq!(manager.broadcast_to_room(ids.room_id, &event), 0);
        assert!(!manager.is_user_connected(&ids.bob));
    }

    #[tokio::test]
    async fn test_invalid_frame_and_ignored_mark_read() {
        let (manager, ids) = setup(10);
        let (alice, mut rx) = manager.register(ids.alice);

        manager.handle_inbound(&alice.id, "not json").await;
        assert_eq!(next_json(&mut rx)["data"]["message"], "Invalid message");

        manager.handle_inbound(&alice.id, &join_raw("not-a-uuid")).await;
        assert_eq!(next_json(&mut rx)["data"]["message"], JOIN_FAILED);

        let mark = format!(r#"{{"event":"markAsRead","data":"{}"}}"#, Uuid::new_v4());
        manager.handle_inbound(&alice.id, &mark).await;
        assert!(rx.try_recv().is_err());
    }

    /// Authorizes every join, closing `victim` while the check is pending.
    #[derive(Debug, Default)]
    struct EvictingChat {
        victim: std::sync::Mutex<Option<Arc<ConnectionHandle>>>,
    }

    #[async_trait]
    impl ChatBackend for EvictingChat {
        async fn authorize_room(&self, _room_id: Uuid, _user_id: Uuid) -> Result<(), AppError> {
            tokio::task::yield_now().await;
            if let Some(victim) = self.victim.lock().unwrap().take() {
                victim.mark_closed();
            }
            Ok(())
        }

        async fn send_message(&self, _: Uuid, _: Uuid, _: &str) -> Result<Message, AppError> {
            Err(AppError::forbidden("read only"))
        }

        async fn mark_as_read(&self, _: Uuid, _: Uuid) -> Result<Message, AppError> {
            Err(AppError::not_found("Message not found"))
        }
    }

    #[tokio::test]
    async fn test_connection_closed_during_join_is_not_added() {
        let chat = Arc::new(EvictingChat::default());
        let rooms = Arc::new(RoomRegistry::new());
        let manager = ConnectionManager::new(RealtimeConfig::default(), rooms.clone(), chat.clone());
        let room_id = Uuid::new_v4();

        let (conn, _rx) = manager.register(Uuid::new_v4());
        *chat.victim.lock().unwrap() = Some(conn.clone());
        manager.handle_inbound(&conn.id, &join(room_id)).await;

        assert!(!conn.is_alive());
        assert!(rooms.members(room_id).is_empty());
        assert_eq!(rooms.joined_count(conn.id), 0);

        let (live, _live_rx) = manager.register(Uuid::new_v4());
        manager.handle_inbound(&live.id, &join(room_id)).await;
        assert!(rooms.is_member(room_id, live.id));
    }

    #[tokio::test]
    async fn test_send_to_user_and_connection_limit() {
        let (manager, ids) = setup(2);
        let (first, mut first_rx) = manager.register(ids.alice);
        let (_second, _rx2) = manager.register(ids.alice);
        let (_third, _rx3) = manager.register(ids.alice);

        assert!(!first.is_alive());
        assert_eq!(first_rx.try_recv().unwrap(), Frame::Close);
        assert_eq!(manager.connection_count(), 2);

        let delivered = manager.send_to_user(&ids.alice, &OutboundEvent::error("ping"));
        assert_eq!(delivered, 2);
        assert_eq!(manager.send_to_user(&ids.bob, &OutboundEvent::error("ping")), 0);
    }
}
