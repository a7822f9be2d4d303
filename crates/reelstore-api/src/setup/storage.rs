//! Storage setup and initialization

use anyhow::Result;
use reelstore_core::Config;
use reelstore_storage::{create_storage, Storage};
use std::sync::Arc;

/// Build the configured storage backend
///
/// Connectivity is checked but not required; credentials may only be
/// usable for writes, and the first upload reports any real failure.
pub async fn setup_storage(config: &Config) -> Result<Arc<dyn Storage>> {
    tracing::info!(backend = %config.storage_backend(), "Initializing storage...");
    let storage = create_storage(config).await?;

    if let Err(e) = storage.health_check().await {
        tracing::warn!(
            error = %e,
            backend = %storage.backend_type(),
            "Storage health check failed at startup"
        );
    }

    tracing::info!(
        backend = %storage.backend_type(),
        "Storage initialized successfully"
    );

    Ok(storage)
}
