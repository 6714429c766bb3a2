//! User domain entities.

pub mod model;
pub mod summary;

pub use model::{CreateUser, UpdateProfile, User};
pub use summary::{UserProfile, UserStats, UserSummary};
