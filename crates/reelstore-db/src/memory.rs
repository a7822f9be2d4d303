//! In-memory metadata repository for tests.

use std::collections::HashMap;

use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;
use reelstore_core::{AppError, NewVideoMetadata, VideoMetadata};
use tokio::sync::RwLock;

use crate::repository::{parse_object_id, MetadataRepository, NOT_FOUND_MESSAGE};

/// Repository backed by a map, assigning ObjectIds like the MongoDB implementation
#[derive(Default)]
pub struct InMemoryMetadataRepository {
    records: RwLock<HashMap<ObjectId, VideoMetadata>>,
}

impl InMemoryMetadataRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records
    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}

#[async_trait]
impl MetadataRepository for InMemoryMetadataRepository {
    async fn insert(&self, metadata: NewVideoMetadata) -> Result<VideoMetadata, AppError> {
        let oid = ObjectId::new();
        let record = VideoMetadata::from_new(oid.to_hex(), metadata);
        self.records.write().await.insert(oid, record.clone());
        Ok(record)
    }

    async fn find_by_id(&self, id: &str) -> Result<VideoMetadata, AppError> {
        let oid = parse_object_id(id)?;
        self.records
            .read()
            .await
            .get(&oid)
            .cloned()
            .ok_or_else(|| AppError::NotFound(NOT_FOUND_MESSAGE.to_string()))
    }

    async fn ping(&self) -> Result<(), AppError> {
        Ok(())
    }
}
