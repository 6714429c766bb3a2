//! Abstractions implemented by other crates.

pub mod storage;

pub use storage::BlobStore;
