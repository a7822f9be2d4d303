//! Video upload workflow: validate → store video → probe → store thumbnail → persist

mod service;
mod types;

pub use service::VideoUploadService;
pub use types::{UploadOutcome, UploadRequest, UploadWarning, UploadedFile};
