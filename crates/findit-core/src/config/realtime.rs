//! WebSocket chat settings.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Every field falls back to [`RealtimeConfig::default`] when omitted.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RealtimeConfig {
    /// Opening one more socket than this closes the user's oldest.
    pub max_connections_per_user: usize,
    /// Outbound frames queued per socket before sends are dropped.
    pub channel_buffer_size: usize,
    pub ping_interval_seconds: u64,
    /// Largest accepted inbound frame.
    pub max_message_size_bytes: usize,
}

impl RealtimeConfig {
    /// Keepalive period, never below one second.
    pub fn ping_interval(&self) -> Duration {
        Duration::from_secs(self.ping_interval_seconds.max(1))
    }
}

impl Default for RealtimeConfig {
    fn default() -> Self {
        Self {
            max_connections_per_user: 10,
            channel_buffer_size: 256,
            ping_interval_seconds: 30,
            max_message_size_bytes: 64 * 1024,
        }
    }
}
