use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A thumbnail that has already been written to blob storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredThumbnail {
    pub url: String,
    pub content_type: String,
}

/// A metadata record that has not been persisted yet.
#[derive(Debug, Clone, PartialEq)]
pub struct NewVideoMetadata {
    pub title: String,
    pub tags: Vec<String>,
    pub duration_seconds: u64,
    pub url: String,
    pub content_type: String,
    pub thumbnail: Option<StoredThumbnail>,
    pub uploaded_at: DateTime<Utc>,
}

impl NewVideoMetadata {
    /// Current time at the precision the document store keeps.
    pub fn now() -> DateTime<Utc> {
        Utc::now().trunc_subsecs(3)
    }
}

/// A persisted metadata record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, ToSchema)]
pub struct VideoMetadata {
    /// 24 character hex identifier assigned on insert
    #[schema(example = "65f1c0ffee0ddba11deadbee")]
    pub id: String,
    pub title: String,
    pub tags: Vec<String>,
    pub duration_seconds: u64,
    pub url: String,
    /// Empty when no thumbnail was uploaded
    pub thumbnail_url: String,
    /// Empty when no thumbnail was uploaded
    pub thumbnail_content_type: String,
    pub content_type: String,
    pub uploaded_at: DateTime<Utc>,
}

impl VideoMetadata {
    pub fn from_new(id: String, new: NewVideoMetadata) -> Self {
        let (thumbnail_url, thumbnail_content_type) = match new.thumbnail {
            Some(thumb) => (thumb.url, thumb.content_type),
            None => (String::new(), String::new()),
        };

        VideoMetadata {
            id,
            title: new.title,
            tags: new.tags,
            duration_seconds: new.duration_seconds,
            url: new.url,
            thumbnail_url,
            thumbnail_content_type,
            content_type: new.content_type,
            uploaded_at: new.uploaded_at,
        }
    }

    pub fn has_thumbnail(&self) -> bool {
        !self.thumbnail_url.is_empty()
    }
}

/// Response body for a successful upload
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UploadVideoResponse {
    #[schema(example = "Video uploaded successfully")]
    pub message: String,
    pub id: String,
    pub title: String,
    pub tags: Vec<String>,
    pub duration_seconds: u64,
    pub url: String,
    pub thumbnail_url: String,
    pub content_type: String,
    pub uploaded_at: DateTime<Utc>,
    /// Degraded-outcome markers such as `duration_unavailable`
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
}

impl UploadVideoResponse {
    pub fn new(metadata: VideoMetadata, warnings: Vec<String>) -> Self {
        UploadVideoResponse {
            message: "Video uploaded successfully".to_string(),
            id: metadata.id,
            title: metadata.title,
            tags: metadata.tags,
            duration_seconds: metadata.duration_seconds,
            url: metadata.url,
            thumbnail_url: metadata.thumbnail_url,
            content_type: metadata.content_type,
            uploaded_at: metadata.uploaded_at,
            warnings,
        }
    }
}

/// Response body for a metadata lookup
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MetadataResponse {
    pub metadata: VideoMetadata,
}
