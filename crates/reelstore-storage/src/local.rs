use crate::object::ObjectStorage;
use crate::traits::{StorageError, StorageResult};
use crate::StorageBackend;
use object_store::local::LocalFileSystem;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::fs;

impl ObjectStorage {
    /// Create storage rooted at a local directory
    ///
    /// # Arguments
    /// * `base_path` - Root directory for file storage (e.g., "/var/lib/reelstore")
    /// * `base_url` - Base URL the directory is served from (e.g., "http://localhost:8080/media")
    pub async fn local(base_path: impl Into<PathBuf>, base_url: &str) -> StorageResult<Self> {
        let base_path = base_path.into();

        fs::create_dir_all(&base_path).await.map_err(|e| {
            StorageError::ConfigError(format!(
                "Failed to create storage directory {}: {}",
                base_path.display(),
                e
            ))
        })?;

        let store = LocalFileSystem::new_with_prefix(&base_path)
            .map_err(|e| StorageError::ConfigError(e.to_string()))?;

        // The local filesystem store rejects object attributes.
        Ok(
            ObjectStorage::new(Arc::new(store), StorageBackend::Local, base_url)
                .without_attributes(),
        )
    }
}
