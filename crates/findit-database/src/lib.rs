//! # findit-database
//!
//! PostgreSQL connection management, embedded migrations, and concrete
//! repository implementations for all FindIt entities.

pub mod connection;
pub mod migration;
pub mod repositories;

pub use connection::DatabasePool;
