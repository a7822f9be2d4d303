//! Types used by the video upload service

use bytes::Bytes;
use reelstore_core::VideoMetadata;

/// A file part received from the client
#[derive(Debug, Clone)]
pub struct UploadedFile {
    /// Client-supplied filename, if any
    pub filename: Option<String>,
    pub content_type: String,
    pub data: Bytes,
}

/// Everything the client sent for one upload
#[derive(Debug, Clone, Default)]
pub struct UploadRequest {
    pub title: String,
    pub tags: Vec<String>,
    pub video: Option<UploadedFile>,
    pub thumbnail: Option<UploadedFile>,
}

/// Degraded-but-successful conditions reported alongside the record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadWarning {
    /// The duration probe failed; the record carries a duration of 0
    DurationUnavailable,
}

impl UploadWarning {
    pub fn code(&self) -> &'static str {
        match self {
            UploadWarning::DurationUnavailable => "duration_unavailable",
        }
    }
}

/// Result of a successful upload
#[derive(Debug, Clone)]
pub struct UploadOutcome {
    pub metadata: VideoMetadata,
    pub warnings: Vec<UploadWarning>,
}

impl UploadOutcome {
    pub fn warning_codes(&self) -> Vec<String> {
        self.warnings.iter().map(|w| w.code().to_string()).collect()
    }
}
