//! Test helpers: build AppState and router for integration tests.
//!
//! Storage is an in-memory object store and metadata lives in the in-memory
//! repository, so no external services are needed:
//! `cargo test -p reelstore-api`.

#![allow(dead_code)]

pub mod fixtures;

use async_trait::async_trait;
use axum_test::TestServer;
use object_store::memory::InMemory;
use object_store::path::Path as ObjectPath;
use object_store::ObjectStore;
use reelstore_api::constants;
use reelstore_api::setup::routes;
use reelstore_api::state::AppState;
use reelstore_core::{Config, StorageBackend};
use reelstore_db::InMemoryMetadataRepository;
use reelstore_processing::{DurationProbe, ProbeError};
use reelstore_storage::ObjectStorage;
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

/// Public URL prefix of the test bucket.
pub const TEST_URL_BASE: &str = "https://test-bucket.s3.us-east-1.amazonaws.com";

/// API path prefix for tests (e.g. `/api/v1`).
pub fn api_path(path: &str) -> String {
    format!("{}{}", constants::API_PREFIX, path)
}

/// Probe that always reports the same duration.
pub struct FixedProbe(pub u64);

#[async_trait]
impl DurationProbe for FixedProbe {
    async fn probe_duration(&self, _path: &Path) -> Result<u64, ProbeError> {
        Ok(self.0)
    }
}

/// Probe that behaves like ffprobe on a corrupt file.
pub struct CorruptFileProbe;

#[async_trait]
impl DurationProbe for CorruptFileProbe {
    async fn probe_duration(&self, _path: &Path) -> Result<u64, ProbeError> {
        Err(ProbeError::Failed {
            status: "exit status: 1".to_string(),
            stderr: "Invalid data found when processing input".to_string(),
        })
    }
}

/// Test application: server plus handles on the backing stores.
pub struct TestApp {
    pub server: TestServer,
    pub store: Arc<InMemory>,
    pub repository: Arc<InMemoryMetadataRepository>,
}

impl TestApp {
    pub fn client(&self) -> &TestServer {
        &self.server
    }

    /// Keys stored under `prefix`, sorted.
    pub async fn stored_keys(&self, prefix: &str) -> Vec<String> {
        let listing = self
            .store
            .list_with_delimiter(Some(&ObjectPath::from(prefix)))
            .await
            .expect("Failed to list objects");
        let mut keys: Vec<String> = listing
            .objects
            .into_iter()
            .map(|meta| meta.location.to_string())
            .collect();
        keys.sort();
        keys
    }
}

pub fn create_test_config(overrides: &[(&str, &str)]) -> Config {
    let mut vars: HashMap<String, String> = HashMap::from([
        ("AWS_REGION".to_string(), "us-east-1".to_string()),
        ("AWS_S3_BUCKET".to_string(), "test-bucket".to_string()),
        ("MAX_UPLOAD_SIZE_BYTES".to_string(), (10 * 1024 * 1024).to_string()),
    ]);
    for (key, value) in overrides {
        vars.insert(key.to_string(), value.to_string());
    }
    Config::from_lookup(|key| vars.get(key).cloned()).expect("Failed to build test config")
}

/// Setup a test app whose prober reports 42 seconds.
pub async fn setup_test_app() -> TestApp {
    setup_test_app_with(create_test_config(&[]), Arc::new(FixedProbe(42))).await
}

pub async fn setup_test_app_with(config: Config, prober: Arc<dyn DurationProbe>) -> TestApp {
    let store = Arc::new(InMemory::new());
    let storage = Arc::new(ObjectStorage::new(
        store.clone(),
        StorageBackend::S3,
        TEST_URL_BASE,
    ));
    let repository = Arc::new(InMemoryMetadataRepository::new());

    let state = Arc::new(AppState::new(
        config.clone(),
        storage,
        repository.clone(),
        prober,
    ));

    let app = routes::setup_routes(&config, state)
        .await
        .expect("Failed to setup routes");
    let server = TestServer::new(app.into_make_service()).expect("Failed to create test server");

    TestApp {
        server,
        store,
        repository,
    }
}
