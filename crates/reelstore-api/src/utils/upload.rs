//! Multipart extraction for the upload handler

use axum::extract::multipart::Field;
use axum::extract::Multipart;
use reelstore_core::AppError;

use crate::error::HttpAppError;
use crate::services::upload::{UploadRequest, UploadedFile};

const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

async fn read_file(field: Field<'_>) -> Result<UploadedFile, HttpAppError> {
    let filename = field.file_name().map(str::to_string);
    let content_type = field
        .content_type()
        .map(str::to_string)
        .unwrap_or_else(|| DEFAULT_CONTENT_TYPE.to_string());
    let data = field.bytes().await?;

    Ok(UploadedFile {
        filename,
        content_type,
        data,
    })
}

/// Collect `title`, repeated `tags`, `file` and optional `thumbnail` from a
/// multipart form. Unknown fields are skipped. Only one `file` and one
/// `thumbnail` part are accepted; an empty unnamed `thumbnail` counts as absent.
///
/// Presence and type checks are left to the upload service so validation
/// happens in one place and in one order.
pub async fn extract_upload_request(
    mut multipart: Multipart,
) -> Result<UploadRequest, HttpAppError> {
    let mut request = UploadRequest::default();

    while let Some(field) = multipart.next_field().await? {
        let field_name = field.name().map(str::to_string).unwrap_or_default();

        match field_name.as_str() {
            "title" => request.title = field.text().await?,
            "tags" => request.tags.push(field.text().await?),
            "file" => {
                if request.video.is_some() {
                    return Err(AppError::InvalidInput(
                        "Multiple file fields are not allowed; send exactly one field named 'file'"
                            .to_string(),
                    )
                    .into());
                }
                request.video = Some(read_file(field).await?);
            }
            "thumbnail" => {
                if request.thumbnail.is_some() {
                    return Err(AppError::InvalidInput(
                        "Multiple thumbnail fields are not allowed".to_string(),
                    )
                    .into());
                }
                let thumbnail = read_file(field).await?;
                // An untouched file input arrives as an empty part without a filename
                if thumbnail.data.is_empty()
                    && thumbnail.filename.as_deref().is_none_or(str::is_empty)
                {
                    tracing::debug!("Ignoring empty thumbnail field");
                    continue;
                }
                request.thumbnail = Some(thumbnail);
            }
            other => {
                tracing::debug!(field = %other, "Ignoring unknown multipart field");
            }
        }
    }

    Ok(request)
}
