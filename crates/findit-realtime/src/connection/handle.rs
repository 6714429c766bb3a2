//! Individual WebSocket connection handle.

use std::sync::atomic::{AtomicBool, Ordering};

use chrono::{DateTime, Utc};
use tokio::sync::mpsc;
use uuid::Uuid;

/// Unique connection identifier
pub type ConnectionId = Uuid;

/// A frame queued for the socket writer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Frame {
    /// JSON text frame.
    Text(String),
    /// Keepalive ping.
    Ping,
    /// Ask the writer to close the socket.
    Close,
}

/// A handle to a single WebSocket connection.
///
/// Holds the sender for pushing frames to the client's writer task,
/// plus the user the connection authenticated as.
#[derive(Debug)]
pub struct ConnectionHandle {
    /// Unique connection ID
    pub id: ConnectionId,
    /// User who owns this connection
    pub user_id: Uuid,
    /// Sender for outbound frames
    sender: mpsc::Sender<Frame>,
    /// When the connection was established
    pub connected_at: DateTime<Utc>,
    /// Whether the connection is still alive
    alive: AtomicBool,
}

impl ConnectionHandle {
    /// Create a new connection handle
    pub fn new(user_id: Uuid, sender: mpsc::Sender<Frame>) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            sender,
            connected_at: Utc::now(),
            alive: AtomicBool::new(true),
        }
    }

    /// Queue a frame. Returns `false` if it was dropped.
    ///
    /// Never waits: a full buffer drops the frame, so one slow client cannot
    /// stall a room broadcast.
    pub fn send(&self, frame: Frame) -> bool {
        if !self.is_alive() {
            return false;
        }
        match self.sender.try_send(frame) {
            Ok(()) => true,
            Err(mpsc::error::TrySendError::Full(_)) => {
                tracing::warn!(conn_id = %self.id, "Send buffer full, dropping frame");
                false
            }
            Err(mpsc::error::TrySendError::Closed(_)) => {
                self.mark_closed();
                false
            }
        }
    }

    /// Queue a text frame.
    pub fn send_text(&self, text: String) -> bool {
        self.send(Frame::Text(text))
    }

    /// Check if connection is alive
    pub fn is_alive(&self) -> bool {
        self.alive.load(Ordering::SeqCst)
    }

    /// Mark connection as closed
    pub fn mark_closed(&self) {
        self.alive.store(false, Ordering::SeqCst);
    }

    /// Ask the writer to close, then stop accepting frames.
    pub fn close(&self) {
        if self.is_alive() {
            let _ = self.sender.try_send(Frame::Close);
        }
        self.mark_closed();
    }
}
