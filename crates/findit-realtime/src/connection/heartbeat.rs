//! Periodic ping for WebSocket keepalive.

use std::sync::Arc;
use std::time::Duration;

use tokio::time;

use super::handle::{ConnectionHandle, Frame};

/// Send a ping every `interval` until the connection goes away.
pub async fn run_heartbeat(handle: Arc<ConnectionHandle>, interval: Duration) {
    let mut ticker = time::interval(interval);
    // The first tick completes immediately.
    ticker.tick().await;

    loop {
        ticker.tick().await;

        if !handle.is_alive() {
            break;
        }
        // A full buffer skips this ping; the next tick tries again.
        handle.send(Frame::Ping);
    }

    tracing::debug!(conn_id = %handle.id, "Heartbeat loop ended");
}
