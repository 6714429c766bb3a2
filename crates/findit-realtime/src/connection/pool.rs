//! Live socket registry, indexed both by connection and by user.

use std::sync::Arc;

use dashmap::DashMap;
use uuid::Uuid;

use super::handle::{ConnectionHandle, ConnectionId};

/// Every open socket on this node.
///
/// A user may hold several sockets (tabs, devices). The per-user list keeps
/// insertion order so the oldest socket is always first.
#[derive(Debug, Default)]
pub struct ConnectionPool {
    sockets: DashMap<ConnectionId, Arc<ConnectionHandle>>,
    per_user: DashMap<Uuid, Vec<Arc<ConnectionHandle>>>,
}

impl ConnectionPool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Track a freshly opened socket.
    pub fn insert(&self, handle: Arc<ConnectionHandle>) {
        self.per_user
            .entry(handle.user_id)
            .or_default()
            .push(Arc::clone(&handle));
        self.sockets.insert(handle.id, handle);
    }

    /// Stop tracking a socket, returning it if it was known.
    pub fn take(&self, conn_id: &ConnectionId) -> Option<Arc<ConnectionHandle>> {
        let (_, handle) = self.sockets.remove(conn_id)?;
        let user_id = handle.user_id;

        let now_empty = match self.per_user.get_mut(&user_id) {
            Some(mut list) => {
                list.retain(|c| c.id != *conn_id);
                list.is_empty()
            }
            None => false,
        };
        if now_empty {
            self.per_user.remove_if(&user_id, |_, list| list.is_empty());
        }

        Some(handle)
    }

    /// Sockets held by one user, oldest first.
    pub fn for_user(&self, user_id: &Uuid) -> Vec<Arc<ConnectionHandle>> {
        match self.per_user.get(user_id) {
            Some(list) => list.clone(),
            None => Vec::new(),
        }
    }

    pub fn lookup(&self, conn_id: &ConnectionId) -> Option<Arc<ConnectionHandle>> {
        self.sockets.get(conn_id).map(|s| Arc::clone(s.value()))
    }

    /// Number of open sockets.
    pub fn len(&self) -> usize {
        self.sockets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sockets.is_empty()
    }

    /// Number of distinct users with at least one socket.
    pub fn online_users(&self) -> usize {
        self.per_user.len()
    }

    /// Point-in-time copy of every open socket.
    pub fn snapshot(&self) -> Vec<Arc<ConnectionHandle>> {
        self.sockets.iter().map(|s| Arc::clone(s.value())).collect()
    }
}
