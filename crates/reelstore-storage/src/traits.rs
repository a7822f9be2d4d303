//! Storage abstraction trait
//!
//! This module defines the Storage trait that all storage backends must implement.

use crate::StorageBackend;
use async_trait::async_trait;
use bytes::Bytes;
use thiserror::Error;

/// Storage operation errors
#[derive(Debug, Error)]
pub enum StorageError {
    /// Credentials are missing, expired or rejected by the backend
    #[error("Storage authentication failed: {0}")]
    Unauthorized(String),

    #[error("Upload failed: {0}")]
    UploadFailed(String),

    #[error("Delete failed: {0}")]
    DeleteFailed(String),

    #[error("Invalid storage key: {0}")]
    InvalidKey(String),

    #[error("Storage backend error: {0}")]
    BackendError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Storage abstraction trait
///
/// All storage backends (S3, Azure Blob, local filesystem) implement this trait,
/// so the upload workflow never sees backend-specific details.
///
/// Keys are produced by [`crate::keys`]: `videos/{filename}` for video files and
/// `thumbnails/{filename}` for thumbnails. Operations are never retried here.
#[async_trait]
pub trait Storage: Send + Sync {
    /// Upload `data` under `key` and return the public URL of the stored object.
    async fn upload(&self, key: &str, content_type: &str, data: Bytes) -> StorageResult<String>;

    /// Delete the object stored under `key`. Deleting a missing object is not an error.
    async fn delete(&self, key: &str) -> StorageResult<()>;

    /// Verify the backend is reachable with the configured credentials
    async fn health_check(&self) -> StorageResult<()>;

    /// Get the storage backend type
    fn backend_type(&self) -> StorageBackend;
}
