use crate::{ObjectStorage, Storage, StorageBackend, StorageError, StorageResult};
use reelstore_core::Config;
use std::sync::Arc;

fn required<'a>(value: &'a Option<String>, name: &str) -> StorageResult<&'a str> {
    value
        .as_deref()
        .ok_or_else(|| StorageError::ConfigError(format!("{} not configured", name)))
}

/// Create a storage backend based on configuration
pub async fn create_storage(config: &Config) -> StorageResult<Arc<dyn Storage>> {
    let settings = &config.storage;

    let storage = match settings.backend {
        StorageBackend::S3 => {
            let bucket = required(&settings.s3_bucket, "AWS_S3_BUCKET")?;
            let region = required(&settings.aws_region, "AWS_REGION")?;
            ObjectStorage::s3(bucket, region, settings.s3_endpoint.as_deref())?
        }
        StorageBackend::Azure => {
            let account = required(&settings.azure_account_name, "AZURE_ACCOUNT_NAME")?;
            let key = required(&settings.azure_account_key, "AZURE_ACCOUNT_KEY")?;
            ObjectStorage::azure(account, key, &settings.azure_container)?
        }
        StorageBackend::Local => {
            let base_path = required(&settings.local_storage_path, "LOCAL_STORAGE_PATH")?;
            let base_url = required(&settings.local_storage_base_url, "LOCAL_STORAGE_BASE_URL")?;
            ObjectStorage::local(base_path, base_url).await?
        }
    };

    Ok(Arc::new(storage))
}
