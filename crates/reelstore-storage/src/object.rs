//! `object_store`-backed storage shared by every backend.
//!
//! Backends differ only in how the store is built and how public URLs are
//! formed; see `s3.rs`, `azure.rs` and `local.rs` for the constructors.

use crate::keys::validate_key;
use crate::traits::{Storage, StorageError, StorageResult};
use crate::StorageBackend;
use async_trait::async_trait;
use bytes::Bytes;
use object_store::path::Path;
use object_store::Error as ObjectStoreError;
use object_store::{Attribute, Attributes, ObjectStore, ObjectStoreExt, PutOptions, PutPayload};
use std::sync::Arc;
use std::time::Instant;

/// Storage over any `ObjectStore`
#[derive(Clone)]
pub struct ObjectStorage {
    store: Arc<dyn ObjectStore>,
    backend: StorageBackend,
    /// Public URL prefix; object URLs are `{url_base}/{key}`
    url_base: String,
    /// Whether the store accepts object attributes such as Content-Type
    supports_attributes: bool,
}

impl ObjectStorage {
    pub fn new(
        store: Arc<dyn ObjectStore>,
        backend: StorageBackend,
        url_base: impl Into<String>,
    ) -> Self {
        ObjectStorage {
            store,
            backend,
            url_base: url_base.into().trim_end_matches('/').to_string(),
            supports_attributes: true,
        }
    }

    /// Disable Content-Type attributes for stores that reject them
    pub fn without_attributes(mut self) -> Self {
        self.supports_attributes = false;
        self
    }

    pub fn url_for(&self, key: &str) -> String {
        format!("{}/{}", self.url_base, key)
    }

    fn put_options(&self, content_type: &str) -> PutOptions {
        let mut attributes = Attributes::new();
        if self.supports_attributes && !content_type.is_empty() {
            attributes.insert(Attribute::ContentType, content_type.to_string().into());
        }
        PutOptions {
            attributes,
            ..Default::default()
        }
    }
}

/// Map an object store failure onto the storage taxonomy.
fn map_put_error(err: ObjectStoreError) -> StorageError {
    match err {
        ObjectStoreError::Unauthenticated { .. } | ObjectStoreError::PermissionDenied { .. } => {
            StorageError::Unauthorized(err.to_string())
        }
        other => StorageError::UploadFailed(other.to_string()),
    }
}

#[async_trait]
impl Storage for ObjectStorage {
    async fn upload(&self, key: &str, content_type: &str, data: Bytes) -> StorageResult<String> {
        validate_key(key)?;

        let size = data.len() as u64;
        let location = Path::from(key);
        let start = Instant::now();

        self.store
            .put_opts(
                &location,
                PutPayload::from(data),
                self.put_options(content_type),
            )
            .await
            .map_err(|e| {
                tracing::error!(
                    error = %e,
                    backend = %self.backend,
                    key = %key,
                    size_bytes = size,
                    duration_ms = start.elapsed().as_secs_f64() * 1000.0,
                    "Storage upload failed"
                );
                map_put_error(e)
            })?;

        let url = self.url_for(location.as_ref());

        tracing::info!(
            backend = %self.backend,
            key = %key,
            content_type = %content_type,
            size_bytes = size,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Storage upload successful"
        );

        Ok(url)
    }

    async fn delete(&self, key: &str) -> StorageResult<()> {
        validate_key(key)?;

        let start = Instant::now();
        let location = Path::from(key);

        match self.store.delete(&location).await {
            Ok(()) | Err(ObjectStoreError::NotFound { .. }) => {}
            Err(e) => {
                tracing::error!(
                    error = %e,
                    backend = %self.backend,
                    key = %key,
                    duration_ms = start.elapsed().as_secs_f64() * 1000.0,
                    "Storage delete failed"
                );
                return Err(match e {
                    ObjectStoreError::Unauthenticated { .. }
                    | ObjectStoreError::PermissionDenied { .. } => {
                        StorageError::Unauthorized(e.to_string())
                    }
                    other => StorageError::DeleteFailed(other.to_string()),
                });
            }
        }

        tracing::info!(
            backend = %self.backend,
            key = %key,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Storage delete successful"
        );

        Ok(())
    }

    async fn health_check(&self) -> StorageResult<()> {
        let prefix = Path::from(crate::keys::VIDEO_PREFIX);
        match self.store.list_with_delimiter(Some(&prefix)).await {
            Ok(_) | Err(ObjectStoreError::NotFound { .. }) => Ok(()),
            Err(
                e @ (ObjectStoreError::Unauthenticated { .. }
                | ObjectStoreError::PermissionDenied { .. }),
            ) => Err(StorageError::Unauthorized(e.to_string())),
            Err(e) => Err(StorageError::BackendError(e.to_string())),
        }
    }

    fn backend_type(&self) -> StorageBackend {
        self.backend
    }
}
