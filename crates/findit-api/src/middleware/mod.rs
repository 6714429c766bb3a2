//! Axum middleware stack.

pub mod cors;
pub mod error;
pub mod logging;
