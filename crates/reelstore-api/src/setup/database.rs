//! Database setup and initialization

use anyhow::{Context, Result};
use reelstore_core::Config;
use reelstore_db::{MetadataRepository, MongoMetadataRepository};

/// Connect to MongoDB and verify the server answers a ping
pub async fn setup_database(config: &Config) -> Result<MongoMetadataRepository> {
    tracing::info!(
        database = %config.database.database,
        collection = %config.database.collection,
        "Connecting to database..."
    );

    let repository = MongoMetadataRepository::connect(&config.database).await?;

    repository
        .ping()
        .await
        .context("Database is not reachable")?;

    tracing::info!(
        timeout_seconds = config.database.timeout_seconds,
        "Database connected successfully"
    );

    Ok(repository)
}
