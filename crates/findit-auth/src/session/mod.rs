//! Credential lifecycle: register, login, refresh rotation, logout.

pub mod manager;
pub mod token;

pub use manager::{AuthResponse, SessionManager, TokenPair};
pub use token::RefreshTokenGenerator;
