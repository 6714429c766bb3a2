//! # findit-api
//!
//! HTTP API layer for FindIt: the axum router, handlers, extractors,
//! middleware, the JSON error envelope, and the WebSocket upgrade for the
//! real-time chat channel.

pub mod app;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use app::{build_app, build_state, run_server};
pub use error::{ApiError, ApiResult};
pub use state::AppState;
