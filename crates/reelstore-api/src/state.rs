//! Application state shared by all handlers.

use reelstore_core::Config;
use reelstore_db::MetadataRepository;
use reelstore_processing::DurationProbe;
use reelstore_storage::Storage;
use std::sync::Arc;

/// Main application state, built once at startup and immutable afterwards.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub storage: Arc<dyn Storage>,
    pub repository: Arc<dyn MetadataRepository>,
    pub prober: Arc<dyn DurationProbe>,
}

impl AppState {
    pub fn new(
        config: Config,
        storage: Arc<dyn Storage>,
        repository: Arc<dyn MetadataRepository>,
        prober: Arc<dyn DurationProbe>,
    ) -> Self {
        Self {
            config,
            storage,
            repository,
            prober,
        }
    }
}

fn _assert_app_state_send_sync() {
    fn assert_send<T: Send>() {}
    fn assert_sync<T: Sync>() {}
    assert_send::<AppState>();
    assert_sync::<AppState>();
}
