//! Chat rooms and messages, shared by the REST handlers and the
//! real-time channel.

pub mod service;

pub use service::ChatService;
