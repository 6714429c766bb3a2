//! The chat engine handed to the HTTP layer.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::broadcast;
use tracing::info;

use findit_core::config::realtime::RealtimeConfig;

use crate::backend::ChatBackend;
use crate::channel::registry::RoomRegistry;
use crate::connection::manager::ConnectionManager;

/// Owned by `AppState`. The socket handler registers connections here and
/// REST handlers use it to push `newMessage` and `roomCreated`.
#[derive(Debug, Clone)]
pub struct RealtimeEngine {
    pub connections: Arc<ConnectionManager>,
    /// Which sockets have joined which chat room.
    pub rooms: Arc<RoomRegistry>,
    shutdown_tx: broadcast::Sender<()>,
}

impl RealtimeEngine {
    pub fn new(config: RealtimeConfig, chat: Arc<dyn ChatBackend>) -> Self {
        let (shutdown_tx, _) = broadcast::channel(1);
        let rooms = Arc::new(RoomRegistry::new());
        let connections = Arc::new(ConnectionManager::new(config, rooms.clone(), chat));

        info!("Chat engine ready");

        Self {
            connections,
            rooms,
            shutdown_tx,
        }
    }

    pub fn ping_interval(&self) -> Duration {
        self.connections.config().ping_interval()
    }

    /// Fires once when [`RealtimeEngine::shutdown`] runs.
    pub fn shutdown_receiver(&self) -> broadcast::Receiver<()> {
        self.shutdown_tx.subscribe()
    }

    /// Stop every socket task. Called once the HTTP server has stopped accepting.
    pub fn shutdown(&self) {
        let listeners = self.shutdown_tx.send(()).unwrap_or(0);
        self.connections.close_all();
        info!(listeners, "Chat engine stopped");
    }
}
