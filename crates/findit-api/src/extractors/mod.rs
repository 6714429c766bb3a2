//! Custom Axum extractors.

pub mod auth;
pub mod json;
pub mod multipart;
pub mod pagination;
pub mod path;
pub mod query;

pub use auth::AuthUser;
pub use json::ValidatedJson;
pub use multipart::ImageForm;
pub use pagination::PaginationParams;
pub use query::ApiQuery;
