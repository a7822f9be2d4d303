use crate::object::ObjectStorage;
use crate::traits::{StorageError, StorageResult};
use crate::StorageBackend;
use object_store::azure::MicrosoftAzureBuilder;
use std::sync::Arc;

/// Public URL prefix for blobs in an Azure container
pub fn azure_url_base(account: &str, container: &str) -> String {
    format!("https://{}.blob.core.windows.net/{}", account, container)
}

impl ObjectStorage {
    /// Create storage for an Azure Blob container using a shared account key
    pub fn azure(account: &str, access_key: &str, container: &str) -> StorageResult<Self> {
        let store = MicrosoftAzureBuilder::new()
            .with_account(account)
            .with_access_key(access_key)
            .with_container_name(container)
            .build()
            .map_err(|e| StorageError::ConfigError(e.to_string()))?;

        tracing::debug!(account = %account, container = %container, "Azure storage configured");

        Ok(ObjectStorage::new(
            Arc::new(store),
            StorageBackend::Azure,
            azure_url_base(account, container),
        ))
    }
}
