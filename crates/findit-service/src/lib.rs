//! # findit-service
//!
//! Business logic service layer for FindIt. Each service orchestrates
//! repositories and the upload store to implement one resource's use cases,
//! including ownership and admin checks.
//!
//! Services follow constructor injection: all dependencies are provided
//! at construction time via `Arc` references.

pub mod category;
pub mod chat;
pub mod context;
pub mod feedback;
pub mod opportunity;
pub mod portfolio;
pub mod upload;
pub mod user;

pub use category::CategoryService;
pub use chat::ChatService;
pub use context::RequestContext;
pub use feedback::FeedbackService;
pub use opportunity::OpportunityService;
pub use portfolio::PortfolioService;
pub use portfolio::PortfolioUpload;
pub use upload::{UploadService, UploadedFile};
pub use user::UserService;
