//! Configuration module
//!
//! Configuration is read from environment variables (with `.env` support via
//! `dotenvy`). Parsing goes through [`Config::from_lookup`] so it can be
//! exercised without touching the process environment.

use std::env;
use std::str::FromStr;

use crate::storage_types::StorageBackend;

const DEFAULT_SERVER_PORT: u16 = 8080;
const DEFAULT_MONGO_URI: &str = "mongodb://localhost:27017";
const DEFAULT_MONGO_DATABASE: &str = "video_service_meta";
const DEFAULT_MONGO_COLLECTION: &str = "videos";
const DEFAULT_DB_TIMEOUT_SECS: u64 = 10;
const DEFAULT_AZURE_CONTAINER: &str = "videos";
const DEFAULT_FFPROBE_PATH: &str = "ffprobe";
const DEFAULT_MAX_UPLOAD_SIZE_BYTES: usize = 512 * 1024 * 1024;

/// Document database settings
#[derive(Clone, Debug)]
pub struct DatabaseConfig {
    pub uri: String,
    pub database: String,
    pub collection: String,
    pub timeout_seconds: u64,
}

/// Blob storage settings. Only the fields for the selected backend are required.
#[derive(Clone, Debug)]
pub struct StorageConfig {
    pub backend: StorageBackend,
    pub aws_region: Option<String>,
    pub s3_bucket: Option<String>,
    /// Custom endpoint for S3-compatible providers (MinIO, DigitalOcean Spaces, ...)
    pub s3_endpoint: Option<String>,
    pub azure_account_name: Option<String>,
    pub azure_account_key: Option<String>,
    pub azure_container: String,
    pub local_storage_path: Option<String>,
    pub local_storage_base_url: Option<String>,
}

/// Application configuration
#[derive(Clone, Debug)]
pub struct Config {
    pub server_port: u16,
    pub environment: String,
    pub cors_origins: Vec<String>,
    pub max_upload_size_bytes: usize,
    pub ffprobe_path: String,
    pub database: DatabaseConfig,
    pub storage: StorageConfig,
}

fn parse_or<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: T,
) -> Result<T, anyhow::Error> {
    match lookup(key) {
        Some(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse::<T>()
            .map_err(|_| anyhow::anyhow!("{} has an invalid value: {}", key, raw)),
        _ => Ok(default),
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

impl Config {
    /// Load configuration from the process environment (and `.env`, if present).
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, anyhow::Error> {
        let server_port = match non_empty(lookup("PORT")) {
            Some(_) => parse_or(&lookup, "PORT", DEFAULT_SERVER_PORT)?,
            None => parse_or(&lookup, "SERVER_PORT", DEFAULT_SERVER_PORT)?,
        };

        let environment = non_empty(lookup("ENVIRONMENT"))
            .or_else(|| non_empty(lookup("APP_ENV")))
            .unwrap_or_else(|| "development".to_string());

        let cors_origins = lookup("CORS_ORIGINS")
            .unwrap_or_else(|| "*".to_string())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let database = DatabaseConfig {
            uri: non_empty(lookup("MONGO_URI")).unwrap_or_else(|| DEFAULT_MONGO_URI.to_string()),
            database: non_empty(lookup("MONGO_DATABASE"))
                .unwrap_or_else(|| DEFAULT_MONGO_DATABASE.to_string()),
            collection: non_empty(lookup("MONGO_COLLECTION"))
                .unwrap_or_else(|| DEFAULT_MONGO_COLLECTION.to_string()),
            timeout_seconds: parse_or(&lookup, "DB_TIMEOUT_SECONDS", DEFAULT_DB_TIMEOUT_SECS)?,
        };

        let storage = StorageConfig {
            backend: parse_or(&lookup, "STORAGE_BACKEND", StorageBackend::S3)?,
            aws_region: non_empty(lookup("AWS_REGION")),
            s3_bucket: non_empty(lookup("AWS_S3_BUCKET")),
            s3_endpoint: non_empty(lookup("S3_ENDPOINT")),
            azure_account_name: non_empty(lookup("AZURE_ACCOUNT_NAME")),
            azure_account_key: non_empty(lookup("AZURE_ACCOUNT_KEY")),
            azure_container: non_empty(lookup("AZURE_CONTAINER"))
                .unwrap_or_else(|| DEFAULT_AZURE_CONTAINER.to_string()),
            local_storage_path: non_empty(lookup("LOCAL_STORAGE_PATH")),
            local_storage_base_url: non_empty(lookup("LOCAL_STORAGE_BASE_URL")),
        };

        Ok(Config {
            server_port,
            environment,
            cors_origins,
            max_upload_size_bytes: parse_or(
                &lookup,
                "MAX_UPLOAD_SIZE_BYTES",
                DEFAULT_MAX_UPLOAD_SIZE_BYTES,
            )?,
            ffprobe_path: non_empty(lookup("FFPROBE_PATH"))
                .unwrap_or_else(|| DEFAULT_FFPROBE_PATH.to_string()),
            database,
            storage,
        })
    }

    /// Check if the application is running in production mode
    pub fn is_production(&self) -> bool {
        let env = self.environment.to_lowercase();
        env == "production" || env == "prod"
    }

    pub fn storage_backend(&self) -> StorageBackend {
        self.storage.backend
    }

    /// Fail fast on settings that would only surface as runtime errors.
    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if self.server_port == 0 {
            return Err(anyhow::anyhow!("PORT cannot be 0"));
        }

        if self.max_upload_size_bytes == 0 {
            return Err(anyhow::anyhow!("MAX_UPLOAD_SIZE_BYTES cannot be 0"));
        }

        if !self.database.uri.starts_with("mongodb://")
            && !self.database.uri.starts_with("mongodb+srv://")
        {
            return Err(anyhow::anyhow!(
                "MONGO_URI must be a valid MongoDB connection string"
            ));
        }

        if self.is_production() && self.cors_origins.iter().any(|o| o == "*") {
            return Err(anyhow::anyhow!(
                "CORS_ORIGINS cannot be '*' in production. Please specify explicit origins."
            ));
        }

        let storage = &self.storage;
        match storage.backend {
            StorageBackend::S3 => {
                if storage.s3_bucket.is_none() {
                    return Err(anyhow::anyhow!(
                        "AWS_S3_BUCKET must be set when STORAGE_BACKEND=s3"
                    ));
                }
                if storage.aws_region.is_none() {
                    return Err(anyhow::anyhow!(
                        "AWS_REGION must be set when STORAGE_BACKEND=s3"
                    ));
                }
            }
            StorageBackend::Azure => {
                if storage.azure_account_name.is_none() || storage.azure_account_key.is_none() {
                    return Err(anyhow::anyhow!(
                        "AZURE_ACCOUNT_NAME and AZURE_ACCOUNT_KEY must be set when STORAGE_BACKEND=azure"
                    ));
                }
            }
            StorageBackend::Local => {
                if storage.local_storage_path.is_none() || storage.local_storage_base_url.is_none()
                {
                    return Err(anyhow::anyhow!(
                        "LOCAL_STORAGE_PATH and LOCAL_STORAGE_BASE_URL must be set when STORAGE_BACKEND=local"
                    ));
                }
            }
        }

        Ok(())
    }
}
