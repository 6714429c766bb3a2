//! Route handlers organized by domain.

pub mod auth;
pub mod category;
pub mod chat;
pub mod feedback;
pub mod health;
pub mod opportunity;
pub mod portfolio;
pub mod upload;
pub mod user;
pub mod ws;
