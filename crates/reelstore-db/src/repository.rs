//! Metadata repository trait

use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;
use reelstore_core::{AppError, NewVideoMetadata, VideoMetadata};

pub const INVALID_ID_MESSAGE: &str = "invalid video ID format";
pub const NOT_FOUND_MESSAGE: &str = "metadata not found";

/// Persistence for video metadata records
///
/// Records are created once and never updated or deleted.
#[async_trait]
pub trait MetadataRepository: Send + Sync {
    /// Persist a new record and return it with its assigned identifier.
    async fn insert(&self, metadata: NewVideoMetadata) -> Result<VideoMetadata, AppError>;

    /// Fetch a record by identifier.
    ///
    /// Returns `AppError::InvalidIdentifier` when `id` is not a 24 character hex
    /// ObjectId and `AppError::NotFound` when it is well-formed but absent.
    async fn find_by_id(&self, id: &str) -> Result<VideoMetadata, AppError>;

    /// Check that the backing store is reachable
    async fn ping(&self) -> Result<(), AppError>;
}

/// Parse a client-supplied identifier
pub fn parse_object_id(id: &str) -> Result<ObjectId, AppError> {
    ObjectId::parse_str(id).map_err(|_| AppError::InvalidIdentifier(INVALID_ID_MESSAGE.to_string()))
}
