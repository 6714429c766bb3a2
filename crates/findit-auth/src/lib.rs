//! # findit-auth
//!
//! Authentication for the FindIt backend.
//!
//! ## Modules
//!
//! - `jwt`: signed access tokens carrying `{sub, email, isAdmin}`
//! - `password`: Argon2id hashing and the minimum-length policy
//! - `session`: register/login/refresh/logout flows and opaque refresh tokens

pub mod jwt;
pub mod password;
pub mod session;

pub use jwt::{Claims, JwtDecoder, JwtEncoder};
pub use password::{PasswordHasher, PasswordValidator};
pub use session::{AuthResponse, SessionManager, TokenPair};
