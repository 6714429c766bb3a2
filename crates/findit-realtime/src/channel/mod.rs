//! Room groups: which connections receive a room's messages.

pub mod registry;
pub mod subscription;

pub use registry::RoomRegistry;
