//! Video upload service
//!
//! Orchestrates a single upload: validate → store video → probe duration →
//! store thumbnail → persist metadata. Nothing is retried. If a later step
//! fails after blobs were written, those blobs are deleted best-effort before
//! the original error is returned.

use std::sync::Arc;

use reelstore_core::{
    is_valid_thumbnail_type, is_video_type, AppError, NewVideoMetadata, StoredThumbnail,
};
use reelstore_db::MetadataRepository;
use reelstore_processing::DurationProbe;
use reelstore_storage::{thumbnail_key, video_key, Storage};

use super::types::{UploadOutcome, UploadRequest, UploadWarning, UploadedFile};
use crate::error::app_error_from_storage;
use crate::state::AppState;

/// Request that passed validation
struct ValidatedUpload {
    title: String,
    tags: Vec<String>,
    video: UploadedFile,
    video_key: String,
    thumbnail: Option<(UploadedFile, String)>,
}

/// Check the request in a fixed order, before any side effect.
fn validate(request: UploadRequest) -> Result<ValidatedUpload, AppError> {
    let title = request.title.trim();
    if title.is_empty() {
        return Err(AppError::InvalidInput("title required".to_string()));
    }

    let video = match request.video {
        Some(file) if !file.data.is_empty() => file,
        _ => return Err(AppError::InvalidInput("file required".to_string())),
    };

    if !is_video_type(&video.content_type) {
        return Err(AppError::InvalidInput("unsupported video type".to_string()));
    }

    if let Some(thumb) = &request.thumbnail {
        if !is_valid_thumbnail_type(&thumb.content_type) {
            return Err(AppError::InvalidInput("invalid thumbnail type".to_string()));
        }
    }

    let video_key = video_key(video.filename.as_deref()).map_err(app_error_from_storage)?;
    let thumbnail = match request.thumbnail {
        Some(thumb) => {
            let key = thumbnail_key(thumb.filename.as_deref()).map_err(app_error_from_storage)?;
            Some((thumb, key))
        }
        None => None,
    };

    Ok(ValidatedUpload {
        title: title.to_string(),
        tags: request.tags,
        video,
        video_key,
        thumbnail,
    })
}

/// Video upload service
#[derive(Clone)]
pub struct VideoUploadService {
    storage: Arc<dyn Storage>,
    repository: Arc<dyn MetadataRepository>,
    prober: Arc<dyn DurationProbe>,
}

impl VideoUploadService {
    pub fn new(
        storage: Arc<dyn Storage>,
        repository: Arc<dyn MetadataRepository>,
        prober: Arc<dyn DurationProbe>,
    ) -> Self {
        Self {
            storage,
            repository,
            prober,
        }
    }

    pub fn from_state(state: &AppState) -> Self {
        Self::new(
            state.storage.clone(),
            state.repository.clone(),
            state.prober.clone(),
        )
    }

    /// Run the full upload workflow for one request.
    #[tracing::instrument(skip(self, request), fields(title = %request.title))]
    pub async fn upload_video(&self, request: UploadRequest) -> Result<UploadOutcome, AppError> {
        let upload = validate(request)?;
        let mut warnings = Vec::new();

        let video_url = self
            .storage
            .upload(
                &upload.video_key,
                &upload.video.content_type,
                upload.video.data.clone(),
            )
            .await
            .map_err(app_error_from_storage)?;
        let mut stored_keys = vec![upload.video_key.clone()];

        let duration_seconds = match self
            .prober
            .probe_bytes(&upload.video.data, upload.video.filename.as_deref())
            .await
        {
            Ok(seconds) => seconds,
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    key = %upload.video_key,
                    "Duration probe failed, storing duration as 0"
                );
                warnings.push(UploadWarning::DurationUnavailable);
                0
            }
        };

        let thumbnail = match upload.thumbnail {
            Some((thumb, key)) => {
                match self
                    .storage
                    .upload(&key, &thumb.content_type, thumb.data)
                    .await
                {
                    Ok(url) => {
                        stored_keys.push(key);
                        Some(StoredThumbnail {
                            url,
                            content_type: thumb.content_type,
                        })
                    }
                    Err(e) => {
                        self.cleanup(&stored_keys).await;
                        return Err(app_error_from_storage(e));
                    }
                }
            }
            None => None,
        };

        let new_metadata = NewVideoMetadata {
            title: upload.title,
            tags: upload.tags,
            duration_seconds,
            url: video_url,
            content_type: upload.video.content_type,
            thumbnail,
            uploaded_at: NewVideoMetadata::now(),
        };

        let metadata = match self.repository.insert(new_metadata).await {
            Ok(metadata) => metadata,
            Err(e) => {
                self.cleanup(&stored_keys).await;
                return Err(e);
            }
        };

        tracing::info!(
            id = %metadata.id,
            duration_seconds = metadata.duration_seconds,
            has_thumbnail = metadata.has_thumbnail(),
            "Video uploaded"
        );

        Ok(UploadOutcome { metadata, warnings })
    }

    /// Delete blobs written earlier in a failed upload. Failures are logged only.
    async fn cleanup(&self, keys: &[String]) {
        for key in keys {
            if let Err(cleanup_err) = self.storage.delete(key).await {
                tracing::warn!(
                    error = %cleanup_err,
                    key = %key,
                    "Failed to cleanup storage file after upload error"
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use bytes::Bytes;
    use reelstore_core::VideoMetadata;
    use reelstore_db::InMemoryMetadataRepository;
    use reelstore_processing::ProbeError;
    use reelstore_storage::{StorageBackend, StorageError, StorageResult};
    use std::collections::HashMap;
    use std::path::Path;
    use std::sync::Mutex;

    /// Storage double that records objects and can fail uploads under a prefix
    #[derive(Default)]
    struct RecordingStorage {
        objects: Mutex<HashMap<String, String>>,
        uploads: Mutex<usize>,
        fail_prefix: Option<&'static str>,
    }

    impl RecordingStorage {
        fn failing_on(prefix: &'static str) -> Self {
            Self {
                fail_prefix: Some(prefix),
                ..Default::default()
            }
        }

        fn keys(&self) -> Vec<String> {
            let mut keys: Vec<String> = self.objects.lock().unwrap().keys().cloned().collect();
            keys.sort();
            keys
        }

        fn upload_calls(&self) -> usize {
            *self.uploads.lock().unwrap()
        }
    }

    #[async_trait]
    impl Storage for RecordingStorage {
        async fn upload(&self, key: &str, content_type: &str, _data: Bytes) -> StorageResult<String> {
            *self.uploads.lock().unwrap() += 1;
            if let Some(prefix) = self.fail_prefix {
                if key.starts_with(prefix) {
                    return Err(StorageError::UploadFailed("connection reset".to_string()));
                }
            }
            self.objects
                .lock()
                .unwrap()
                .insert(key.to_string(), content_type.to_string());
            Ok(format!("https://media.s3.us-east-1.amazonaws.com/{}", key))
        }

        async fn delete(&self, key: &str) -> StorageResult<()> {
            self.objects.lock().unwrap().remove(key);
            Ok(())
        }

        async fn health_check(&self) -> StorageResult<()> {
            Ok(())
        }

        fn backend_type(&self) -> StorageBackend {
            StorageBackend::S3
        }
    }

    struct FixedProbe(u64);

    #[async_trait]
    impl DurationProbe for FixedProbe {
        async fn probe_duration(&self, _path: &Path) -> Result<u64, ProbeError> {
            Ok(self.0)
        }
    }

    struct FailingProbe;

    #[async_trait]
    impl DurationProbe for FailingProbe {
        async fn probe_duration(&self, _path: &Path) -> Result<u64, ProbeError> {
            Err(ProbeError::MissingDuration)
        }
    }

    struct FailingRepository;

    #[async_trait]
    impl MetadataRepository for FailingRepository {
        async fn insert(&self, _metadata: NewVideoMetadata) -> Result<VideoMetadata, AppError> {
            Err(AppError::Database("server selection timeout".to_string()))
        }

        async fn find_by_id(&self, _id: &str) -> Result<VideoMetadata, AppError> {
            Err(AppError::Database("server selection timeout".to_string()))
        }

        async fn ping(&self) -> Result<(), AppError> {
            Err(AppError::Database("server selection timeout".to_string()))
        }
    }

    fn file(filename: &str, content_type: &str, data: &'static [u8]) -> UploadedFile {
        UploadedFile {
            filename: Some(filename.to_string()),
            content_type: content_type.to_string(),
            data: Bytes::from_static(data),
        }
    }

    fn demo_request() -> UploadRequest {
        UploadRequest {
            title: "Demo".to_string(),
            tags: vec!["a".to_string(), "b".to_string()],
            video: Some(file("demo.mp4", "video/mp4", b"mp4-bytes")),
            thumbnail: None,
        }
    }

    struct Harness {
        storage: Arc<RecordingStorage>,
        repository: Arc<InMemoryMetadataRepository>,
        service: VideoUploadService,
    }

    fn harness_with(storage: RecordingStorage, prober: Arc<dyn DurationProbe>) -> Harness {
        let storage = Arc::new(storage);
        let repository = Arc::new(InMemoryMetadataRepository::new());
        let service = VideoUploadService::new(storage.clone(), repository.clone(), prober);
        Harness {
            storage,
            repository,
            service,
        }
    }

    fn harness() -> Harness {
        harness_with(RecordingStorage::default(), Arc::new(FixedProbe(42)))
    }

    #[tokio::test]
    async fn test_upload_without_thumbnail() {
        let h = harness();

        let outcome = h.service.upload_video(demo_request()).await.unwrap();
        let meta = outcome.metadata;

        assert_eq!(meta.title, "Demo");
        assert_eq!(meta.tags, vec!["a", "b"]);
        assert_eq!(meta.duration_seconds, 42);
        assert_eq!(meta.content_type, "video/mp4");
        assert_eq!(
            meta.url,
            "https://media.s3.us-east-1.amazonaws.com/videos/demo.mp4"
        );
        assert_eq!(meta.thumbnail_url, "");
        assert_eq!(meta.thumbnail_content_type, "");
        assert!(outcome.warnings.is_empty());

        assert_eq!(h.storage.keys(), vec!["videos/demo.mp4"]);
        assert_eq!(h.repository.find_by_id(&meta.id).await.unwrap(), meta);
    }

    #[tokio::test]
    async fn test_upload_with_thumbnail() {
        let h = harness();
        let mut request = demo_request();
        request.thumbnail = Some(file("cover.png", "image/png", b"png"));

        let meta = h.service.upload_video(request).await.unwrap().metadata;

        assert_eq!(
            meta.thumbnail_url,
            "https://media.s3.us-east-1.amazonaws.com/thumbnails/cover.png"
        );
        assert_eq!(meta.thumbnail_content_type, "image/png");
        assert_eq!(
            h.storage.keys(),
            vec!["thumbnails/cover.png", "videos/demo.mp4"]
        );
    }

    #[tokio::test]
    async fn test_video_thumbnail_is_accepted() {
        let h = harness();
        let mut request = demo_request();
        request.thumbnail = Some(file("preview.mov", "video/quicktime", b"mov"));

        let meta = h.service.upload_video(request).await.unwrap().metadata;
        assert_eq!(meta.thumbnail_content_type, "video/quicktime");
    }

    #[tokio::test]
    async fn test_unique_ids_for_repeated_uploads() {
        let h = harness();
        let first = h.service.upload_video(demo_request()).await.unwrap();
        let second = h.service.upload_video(demo_request()).await.unwrap();
        assert_ne!(first.metadata.id, second.metadata.id);
        assert_eq!(h.repository.len().await, 2);
    }

    #[tokio::test]
    async fn test_missing_title_has_no_side_effects() {
        let h = harness();
        let mut request = demo_request();
        request.title = "   ".to_string();

        let err = h.service.upload_video(request).await.unwrap_err();
        assert!(matches!(err, AppError::InvalidInput(ref m) if m == "title required"));
        assert_eq!(h.storage.upload_calls(), 0);
        assert!(h.repository.is_empty().await);
    }

    #[tokio::test]
    async fn test_missing_or_empty_file() {
        let h = harness();

        let mut request = demo_request();
        request.video = None;
        let err = h.service.upload_video(request).await.unwrap_err();
        assert!(matches!(err, AppError::InvalidInput(ref m) if m == "file required"));

        let mut request = demo_request();
        request.video = Some(file("empty.mp4", "video/mp4", b""));
        let err = h.service.upload_video(request).await.unwrap_err();
        assert!(matches!(err, AppError::InvalidInput(ref m) if m == "file required"));

        assert_eq!(h.storage.upload_calls(), 0);
    }

    #[tokio::test]
    async fn test_unsupported_video_type() {
        let h = harness();
        let mut request = demo_request();
        request.video = Some(file("doc.pdf", "application/pdf", b"%PDF"));

        let err = h.service.upload_video(request).await.unwrap_err();
        assert!(matches!(err, AppError::InvalidInput(ref m) if m == "unsupported video type"));
        assert_eq!(h.storage.upload_calls(), 0);
    }

    #[tokio::test]
    async fn test_invalid_thumbnail_type_rejected_before_storage() {
        let h = harness();
        let mut request = demo_request();
        request.thumbnail = Some(file("cover.pdf", "application/pdf", b"%PDF"));

        let err = h.service.upload_video(request).await.unwrap_err();
        assert!(matches!(err, AppError::InvalidInput(ref m) if m == "invalid thumbnail type"));
        assert_eq!(h.storage.upload_calls(), 0);
        assert!(h.repository.is_empty().await);
    }

    #[tokio::test]
    async fn test_validation_order_title_first() {
        let h = harness();
        let request = UploadRequest {
            title: String::new(),
            tags: vec![],
            video: None,
            thumbnail: Some(file("cover.pdf", "application/pdf", b"%PDF")),
        };
        let err = h.service.upload_video(request).await.unwrap_err();
        assert!(matches!(err, AppError::InvalidInput(ref m) if m == "title required"));
    }

    #[tokio::test]
    async fn test_probe_failure_is_degraded_success() {
        let h = harness_with(RecordingStorage::default(), Arc::new(FailingProbe));

        let outcome = h.service.upload_video(demo_request()).await.unwrap();
        assert_eq!(outcome.metadata.duration_seconds, 0);
        assert_eq!(outcome.warnings, vec![UploadWarning::DurationUnavailable]);
        assert_eq!(outcome.warning_codes(), vec!["duration_unavailable"]);
        assert_eq!(h.repository.len().await, 1);
    }

    #[tokio::test]
    async fn test_video_storage_failure_persists_nothing() {
        let h = harness_with(
            RecordingStorage::failing_on("videos/"),
            Arc::new(FixedProbe(1)),
        );

        let err = h.service.upload_video(demo_request()).await.unwrap_err();
        assert!(matches!(err, AppError::Storage(_)));
        assert!(h.repository.is_empty().await);
    }

    #[tokio::test]
    async fn test_thumbnail_failure_removes_stored_video() {
        let h = harness_with(
            RecordingStorage::failing_on("thumbnails/"),
            Arc::new(FixedProbe(1)),
        );
        let mut request = demo_request();
        request.thumbnail = Some(file("cover.png", "image/png", b"png"));

        let err = h.service.upload_video(request).await.unwrap_err();
        assert!(matches!(err, AppError::Storage(_)));
        assert!(h.storage.keys().is_empty());
        assert!(h.repository.is_empty().await);
    }

    #[tokio::test]
    async fn test_repository_failure_removes_stored_blobs() {
        let storage = Arc::new(RecordingStorage::default());
        let service = VideoUploadService::new(
            storage.clone(),
            Arc::new(FailingRepository),
            Arc::new(FixedProbe(1)),
        );
        let mut request = demo_request();
        request.thumbnail = Some(file("cover.webp", "image/webp", b"webp"));

        let err = service.upload_video(request).await.unwrap_err();
        assert!(matches!(err, AppError::Database(_)));
        assert_eq!(storage.upload_calls(), 2);
        assert!(storage.keys().is_empty());
    }

    #[tokio::test]
    async fn test_traversal_filename_uses_final_component() {
        let h = harness();
        let mut request = demo_request();
        request.video = Some(file("../../etc/demo.mp4", "video/mp4", b"mp4"));

        let meta = h.service.upload_video(request).await.unwrap().metadata;
        assert!(meta.url.ends_with("/videos/demo.mp4"));
    }
}
