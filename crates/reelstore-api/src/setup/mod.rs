//! Application setup and initialization
//!
//! Startup order: validate configuration, install tracing, connect the
//! database, build storage and the prober, then assemble state and routes.

pub mod database;
pub mod processing;
pub mod routes;
pub mod server;
pub mod storage;
pub mod validation;

use crate::state::AppState;
use anyhow::{Context, Result};
use reelstore_core::Config;
use std::sync::Arc;

/// Initialize the entire application
pub async fn initialize_app(config: Config) -> Result<(Arc<AppState>, axum::Router)> {
    validation::validate_config(&config).context("Configuration validation failed")?;

    crate::telemetry::init_telemetry(config.is_production())
        .map_err(|e| anyhow::anyhow!("Failed to initialize telemetry: {}", e))?;

    tracing::info!(
        environment = %config.environment,
        "Configuration loaded and validated successfully"
    );

    let repository = database::setup_database(&config).await?;
    let storage = storage::setup_storage(&config).await?;
    let prober = processing::setup_prober(&config)?;

    let state = Arc::new(AppState::new(
        config.clone(),
        storage,
        Arc::new(repository),
        prober,
    ));

    let router = routes::setup_routes(&config, state.clone()).await?;

    Ok((state, router))
}
