//! OpenAPI documentation.

use utoipa::OpenApi;

use crate::error;
use crate::handlers;
use reelstore_core::models;

/// Returns the OpenAPI spec served at `/api/openapi.json`.
pub fn get_openapi_spec() -> utoipa::openapi::OpenApi {
    ApiDoc::openapi()
}

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Reelstore API",
        version = "0.1.0",
        description = "Video upload service. Stores video files (and optional thumbnails) in S3 or Azure Blob storage, probes their duration with ffprobe, and keeps a metadata record in MongoDB. The unversioned /upload and /metadata/{id} routes are aliases of the /api/v1 routes."
    ),
    paths(
        handlers::video_upload::upload_video,
        handlers::video_get::get_metadata,
    ),
    components(
        schemas(
            models::VideoMetadata,
            models::UploadVideoResponse,
            models::MetadataResponse,
            handlers::video_upload::UploadVideoForm,
            error::ErrorResponse,
        )
    ),
    tags(
        (name = "videos", description = "Video upload and metadata lookup")
    )
)]
pub struct ApiDoc;
