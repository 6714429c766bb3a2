//! # findit-realtime
//!
//! Real-time chat engine for FindIt. Provides:
//!
//! - WebSocket authentication with the same access tokens as the REST API
//! - A per-user connection registry for server-to-user pushes
//! - Room groups that fan out new messages to every joined connection
//! - The `{event, data}` JSON codec spoken on the wire
//!
//! All state is process-local.

pub mod backend;
pub mod channel;
pub mod connection;
pub mod message;
pub mod server;

pub use backend::ChatBackend;
pub use channel::registry::RoomRegistry;
pub use connection::manager::ConnectionManager;
pub use message::types::{InboundEvent, OutboundEvent};
pub use server::RealtimeEngine;
