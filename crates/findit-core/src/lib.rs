//! # findit-core
//!
//! Core crate for the FindIt marketplace backend. Contains configuration
//! schemas, pagination types, the blob store trait, and the unified
//! error system.
//!
//! This crate has **no** internal dependencies on other FindIt crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;
pub mod types;

pub use error::{AppError, ErrorKind};
pub use result::AppResult;
