//! Video route groups: the versioned API plus the legacy short paths.

use crate::constants::API_PREFIX;
use crate::handlers;
use crate::state::AppState;
use axum::routing::{get, post};
use axum::Router;
use std::sync::Arc;

pub fn video_routes(state: Arc<AppState>) -> Router<Arc<AppState>> {
    Router::new()
        .route(
            &format!("{}/videos/upload", API_PREFIX),
            post(handlers::video_upload::upload_video),
        )
        .route(
            &format!("{}/videos/{{id}}", API_PREFIX),
            get(handlers::video_get::get_metadata),
        )
        .with_state(state)
}

/// Unversioned paths kept for existing clients.
pub fn legacy_routes(state: Arc<AppState>) -> Router<Arc<AppState>> {
    Router::new()
        .route("/upload", post(handlers::video_upload::upload_video))
        .route("/metadata/{id}", get(handlers::video_get::get_metadata))
        .with_state(state)
}
