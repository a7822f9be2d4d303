use crate::error::{ErrorResponse, HttpAppError};
use crate::services::upload::VideoUploadService;
use crate::state::AppState;
use crate::utils::upload::extract_upload_request;
use axum::{
    extract::{multipart::MultipartRejection, Multipart, State},
    Json,
};
use reelstore_core::UploadVideoResponse;
use std::sync::Arc;

/// Multipart body accepted by the upload endpoint (documentation only)
#[derive(utoipa::ToSchema)]
#[allow(dead_code)]
pub struct UploadVideoForm {
    /// Video title
    title: String,
    /// Repeat the field for multiple tags
    tags: Option<Vec<String>>,
    /// Video file (video/mp4, video/avi, video/mpeg, video/quicktime, video/x-matroska)
    #[schema(format = Binary)]
    file: String,
    /// Optional thumbnail (image/jpeg, image/png, image/webp, or a video type)
    #[schema(format = Binary)]
    thumbnail: Option<String>,
}

#[utoipa::path(
    post,
    path = "/api/v1/videos/upload",
    tag = "videos",
    request_body(content = UploadVideoForm, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Video uploaded successfully", body = UploadVideoResponse),
        (status = 400, description = "Invalid input", body = ErrorResponse),
        (status = 413, description = "File too large", body = ErrorResponse),
        (status = 500, description = "Storage or database failure", body = ErrorResponse)
    )
)]
pub async fn upload_video(
    State(state): State<Arc<AppState>>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<UploadVideoResponse>, HttpAppError> {
    let request = extract_upload_request(multipart?).await?;

    let outcome = VideoUploadService::from_state(&state)
        .upload_video(request)
        .await?;

    let warnings = outcome.warning_codes();
    Ok(Json(UploadVideoResponse::new(outcome.metadata, warnings)))
}
