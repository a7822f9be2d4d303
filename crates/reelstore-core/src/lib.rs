//! Reelstore Core Library
//!
//! This crate provides the domain models, error types, configuration, and the
//! content-type classifier shared by every Reelstore crate.

pub mod config;
pub mod content_type;
pub mod error;
pub mod models;
pub mod storage_types;

// Re-export commonly used types
pub use config::Config;
pub use content_type::{is_image_type, is_valid_thumbnail_type, is_video_type};
pub use error::{AppError, ErrorMetadata, LogLevel};
pub use models::{
    MetadataResponse, NewVideoMetadata, StoredThumbnail, UploadVideoResponse, VideoMetadata,
};
pub use storage_types::StorageBackend;
