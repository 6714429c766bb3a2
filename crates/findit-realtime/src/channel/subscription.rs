//! Reverse index from connection to joined rooms.

use std::collections::HashSet;

use dashmap::DashMap;
use uuid::Uuid;

use crate::connection::handle::ConnectionId;

/// Tracks which rooms each connection has joined.
#[derive(Debug, Default)]
pub struct SubscriptionTracker {
    /// Connection ID → joined room IDs.
    conn_to_rooms: DashMap<ConnectionId, HashSet<Uuid>>,
}

impl SubscriptionTracker {
    /// Creates a new subscription tracker.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a join. Returns `false` if it was already recorded.
    pub fn add(&self, conn_id: ConnectionId, room_id: Uuid) -> bool {
        self.conn_to_rooms.entry(conn_id).or_default().insert(room_id)
    }

    /// Removes a join.
    pub fn remove(&self, conn_id: ConnectionId, room_id: Uuid) {
        if let Some(mut rooms) = self.conn_to_rooms.get_mut(&conn_id) {
            rooms.remove(&room_id);
        }
    }

    /// Returns the number of rooms a connection has joined.
    pub fn count(&self, conn_id: ConnectionId) -> usize {
        self.conn_to_rooms
            .get(&conn_id)
            .map(|entry| entry.value().len())
            .unwrap_or(0)
    }

    /// Removes and returns every room a connection has joined.
    pub fn remove_all(&self, conn_id: ConnectionId) -> HashSet<Uuid> {
        self.conn_to_rooms
            .remove(&conn_id)
            .map(|(_, rooms)| rooms)
            .unwrap_or_default()
    }
}
