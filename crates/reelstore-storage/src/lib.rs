//! Reelstore Storage Library
//!
//! This crate provides the storage abstraction used by the upload workflow and
//! an `object_store`-backed implementation for S3, Azure Blob and the local
//! filesystem.
//!
//! # Storage key format
//!
//! - **Videos**: `videos/{filename}`
//! - **Thumbnails**: `thumbnails/{filename}`
//!
//! Keys must not contain `..`, a leading `/`, or control characters. Key
//! generation is centralized in the `keys` module so all backends stay consistent.

pub mod azure;
pub mod factory;
pub mod keys;
pub mod local;
pub mod object;
pub mod s3;
pub mod traits;

// Re-export commonly used types
pub use factory::create_storage;
pub use keys::{thumbnail_key, video_key};
pub use object::ObjectStorage;
pub use reelstore_core::StorageBackend;
pub use traits::{Storage, StorageError, StorageResult};
