//! MongoDB metadata repository: one document per uploaded video.

use std::time::Duration;

use anyhow::Context;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use mongodb::bson::oid::ObjectId;
use mongodb::bson::{self, doc};
use mongodb::options::ClientOptions;
use mongodb::{Client, Collection, Database};
use reelstore_core::config::DatabaseConfig;
use reelstore_core::{AppError, NewVideoMetadata, VideoMetadata};
use serde::{Deserialize, Serialize};

use crate::repository::{parse_object_id, MetadataRepository, NOT_FOUND_MESSAGE};

/// Stored shape of a metadata record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VideoDocument {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub title: String,
    #[serde(default)]
    pub tags: Vec<String>,
    /// Whole seconds
    pub duration: i64,
    pub url: String,
    pub uploaded_at: bson::DateTime,
    #[serde(default)]
    pub thumbnail: String,
    #[serde(default)]
    pub thumbnail_content_type: String,
    pub content_type: String,
}

impl VideoDocument {
    pub fn from_new(id: ObjectId, metadata: &NewVideoMetadata) -> Self {
        let (thumbnail, thumbnail_content_type) = match &metadata.thumbnail {
            Some(thumb) => (thumb.url.clone(), thumb.content_type.clone()),
            None => (String::new(), String::new()),
        };

        VideoDocument {
            id,
            title: metadata.title.clone(),
            tags: metadata.tags.clone(),
            duration: i64::try_from(metadata.duration_seconds).unwrap_or(i64::MAX),
            url: metadata.url.clone(),
            uploaded_at: bson::DateTime::from_millis(metadata.uploaded_at.timestamp_millis()),
            thumbnail,
            thumbnail_content_type,
            content_type: metadata.content_type.clone(),
        }
    }

    pub fn into_metadata(self) -> VideoMetadata {
        let uploaded_at = DateTime::<Utc>::from_timestamp_millis(self.uploaded_at.timestamp_millis())
            .unwrap_or_default();

        VideoMetadata {
            id: self.id.to_hex(),
            title: self.title,
            tags: self.tags,
            duration_seconds: u64::try_from(self.duration).unwrap_or(0),
            url: self.url,
            thumbnail_url: self.thumbnail,
            thumbnail_content_type: self.thumbnail_content_type,
            content_type: self.content_type,
            uploaded_at,
        }
    }
}

fn db_error(err: mongodb::error::Error) -> AppError {
    AppError::Database(err.to_string())
}

/// Repository for the video metadata collection.
#[derive(Clone)]
pub struct MongoMetadataRepository {
    database: Database,
    collection: Collection<VideoDocument>,
}

impl MongoMetadataRepository {
    pub fn new(database: Database, collection_name: &str) -> Self {
        let collection = database.collection::<VideoDocument>(collection_name);
        Self {
            database,
            collection,
        }
    }

    /// Build a client from configuration. The driver connects lazily, so this
    /// only fails on an unparseable URI; call [`MetadataRepository::ping`] to
    /// check the server is reachable.
    pub async fn connect(config: &DatabaseConfig) -> anyhow::Result<Self> {
        let mut options = ClientOptions::parse(&config.uri)
            .await
            .context("Failed to parse MONGO_URI")?;

        let timeout = Duration::from_secs(config.timeout_seconds);
        options.connect_timeout = Some(timeout);
        options.server_selection_timeout = Some(timeout);
        options.app_name = Some("reelstore".to_string());

        let client = Client::with_options(options).context("Failed to create MongoDB client")?;
        let database = client.database(&config.database);

        Ok(Self::new(database, &config.collection))
    }
}

#[async_trait]
impl MetadataRepository for MongoMetadataRepository {
    #[tracing::instrument(skip(self, metadata), fields(db.collection = %self.collection.name(), db.operation = "insert"))]
    async fn insert(&self, metadata: NewVideoMetadata) -> Result<VideoMetadata, AppError> {
        let document = VideoDocument::from_new(ObjectId::new(), &metadata);

        self.collection
            .insert_one(&document)
            .await
            .map_err(db_error)?;

        tracing::debug!(id = %document.id, "Video metadata inserted");

        Ok(document.into_metadata())
    }

    #[tracing::instrument(skip(self), fields(db.collection = %self.collection.name(), db.operation = "find_one"))]
    async fn find_by_id(&self, id: &str) -> Result<VideoMetadata, AppError> {
        let oid = parse_object_id(id)?;

        self.collection
            .find_one(doc! { "_id": oid })
            .await
            .map_err(db_error)?
            .map(VideoDocument::into_metadata)
            .ok_or_else(|| AppError::NotFound(NOT_FOUND_MESSAGE.to_string()))
    }

    #[tracing::instrument(skip(self), fields(db.operation = "ping"))]
    async fn ping(&self) -> Result<(), AppError> {
        self.database
            .run_command(doc! { "ping": 1 })
            .await
            .map(|_| ())
            .map_err(db_error)
    }
}
