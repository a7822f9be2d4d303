//! Reelstore API Library
//!
//! This crate provides the HTTP handlers, the upload workflow, and application setup.

mod api_doc;
pub mod constants;
mod handlers;
mod telemetry;
mod utils;

pub mod error;
pub mod services;
pub mod setup;
pub mod state;

pub use error::{ErrorResponse, HttpAppError};
pub use services::upload::{
    UploadOutcome, UploadRequest, UploadWarning, UploadedFile, VideoUploadService,
};
pub use state::AppState;
