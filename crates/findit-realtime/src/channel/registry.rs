//! Room registry: room ID → joined connections.

use std::collections::HashSet;

use dashmap::DashMap;
use uuid::Uuid;

use crate::connection::handle::ConnectionId;

use super::subscription::SubscriptionTracker;

/// Registry of room groups. Empty groups are dropped.
#[derive(Debug, Default)]
pub struct RoomRegistry {
    /// Room ID → member connections.
    rooms: DashMap<Uuid, HashSet<ConnectionId>>,
    /// Reverse index for disconnect cleanup.
    subscriptions: SubscriptionTracker,
}

impl RoomRegistry {
    /// Creates a new room registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a connection to a room group.
    pub fn join(&self, room_id: Uuid, conn_id: ConnectionId) {
        self.rooms.entry(room_id).or_default().insert(conn_id);
        self.subscriptions.add(conn_id, room_id);
    }

    /// Removes a connection from a room group.
    pub fn leave(&self, room_id: Uuid, conn_id: ConnectionId) {
        self.remove_member(room_id, conn_id);
        self.subscriptions.remove(conn_id, room_id);
    }

    /// Removes a connection from every room group it joined.
    pub fn leave_all(&self, conn_id: ConnectionId) {
        for room_id in self.subscriptions.remove_all(conn_id) {
            self.remove_member(room_id, conn_id);
        }
    }

    /// Connections currently in a room group.
    pub fn members(&self, room_id: Uuid) -> Vec<ConnectionId> {
        self.rooms
            .get(&room_id)
            .map(|members| members.iter().copied().collect())
            .unwrap_or_default()
    }

    /// Whether a connection is in a room group.
    pub fn is_member(&self, room_id: Uuid, conn_id: ConnectionId) -> bool {
        self.rooms
            .get(&room_id)
            .is_some_and(|members| members.contains(&conn_id))
    }

    /// Number of rooms a connection has joined.
    pub fn joined_count(&self, conn_id: ConnectionId) -> usize {
        self.subscriptions.count(conn_id)
    }

    /// Number of non-empty room groups.
    pub fn room_count(&self) -> usize {
        self.rooms.len()
    }

    fn remove_member(&self, room_id: Uuid, conn_id: ConnectionId) {
        if let Some(mut members) = self.rooms.get_mut(&room_id) {
            members.remove(&conn_id);
            if members.is_empty() {
                drop(members);
                self.rooms.remove_if(&room_id, |_, m| m.is_empty());
            }
        }
    }
}
