use crate::error::{ErrorResponse, HttpAppError};
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    Json,
};
use reelstore_core::MetadataResponse;
use std::sync::Arc;

#[utoipa::path(
    get,
    path = "/api/v1/videos/{id}",
    tag = "videos",
    params(
        ("id" = String, Path, description = "Video ID (24 character hex)")
    ),
    responses(
        (status = 200, description = "Video metadata", body = MetadataResponse),
        (status = 400, description = "Malformed video ID", body = ErrorResponse),
        (status = 404, description = "Video not found", body = ErrorResponse),
        (status = 500, description = "Database failure", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state))]
pub async fn get_metadata(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<MetadataResponse>, HttpAppError> {
    let metadata = state.repository.find_by_id(&id).await?;
    Ok(Json(MetadataResponse { metadata }))
}
