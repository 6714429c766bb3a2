//! # findit-entity
//!
//! Domain entity models for FindIt. Every struct in this crate represents
//! a database row, a joined read view, or an input for a write. Entities
//! serialize with camelCase field names, which is the JSON shape the HTTP
//! API returns.

pub mod category;
pub mod chat;
pub mod feedback;
pub mod opportunity;
pub mod portfolio;
pub mod refresh_token;
pub mod user;
