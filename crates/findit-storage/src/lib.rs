//! # findit-storage
//!
//! [`BlobStore`](findit_core::traits::BlobStore) backends for uploaded
//! files. Only the local disk backend exists today.

pub mod local;

pub use local::DiskStore;
