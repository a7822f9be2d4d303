use crate::object::ObjectStorage;
use crate::traits::{StorageError, StorageResult};
use crate::StorageBackend;
use object_store::aws::AmazonS3Builder;
use std::sync::Arc;

/// Public URL prefix for objects in an S3 bucket
///
/// For AWS S3 this is `https://{bucket}.s3.{region}.amazonaws.com`.
/// For S3-compatible providers the path-style `{endpoint}/{bucket}` form is used.
pub fn s3_url_base(bucket: &str, region: &str, endpoint_url: Option<&str>) -> String {
    match endpoint_url {
        Some(endpoint) => format!("{}/{}", endpoint.trim_end_matches('/'), bucket),
        None => format!("https://{}.s3.{}.amazonaws.com", bucket, region),
    }
}

impl ObjectStorage {
    /// Create storage for an S3 bucket
    ///
    /// Credentials come from the standard AWS environment variables.
    ///
    /// # Arguments
    /// * `bucket` - S3 bucket name
    /// * `region` - AWS region (or region identifier for S3-compatible providers)
    /// * `endpoint_url` - Optional custom endpoint for S3-compatible providers
    ///   (e.g., "http://localhost:9000" for MinIO)
    pub fn s3(bucket: &str, region: &str, endpoint_url: Option<&str>) -> StorageResult<Self> {
        let mut builder = AmazonS3Builder::from_env()
            .with_region(region)
            .with_bucket_name(bucket);

        if let Some(endpoint) = endpoint_url {
            builder = builder
                .with_endpoint(endpoint)
                .with_allow_http(endpoint.starts_with("http://"));
        }

        let store = builder
            .build()
            .map_err(|e| StorageError::ConfigError(e.to_string()))?;

        tracing::debug!(bucket = %bucket, region = %region, "S3 storage configured");

        Ok(ObjectStorage::new(
            Arc::new(store),
            StorageBackend::S3,
            s3_url_base(bucket, region, endpoint_url),
        ))
    }
}
