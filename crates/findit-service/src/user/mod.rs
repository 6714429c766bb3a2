//! User profile and account operations.

pub mod service;

pub use service::UserService;
