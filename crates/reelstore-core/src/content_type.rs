//! MIME type classification for uploads.
//!
//! Matching is exact: no parameter stripping, no case folding, no prefix or
//! wildcard matching. `video/mp4; codecs=avc1` is not a video type here.

/// Content types accepted for the main video file.
pub const VIDEO_CONTENT_TYPES: &[&str] = &[
    "video/mp4",
    "video/avi",
    "video/mpeg",
    "video/quicktime",
    "video/x-matroska",
];

/// Content types accepted as image thumbnails.
pub const IMAGE_CONTENT_TYPES: &[&str] = &["image/jpeg", "image/png", "image/webp"];

pub fn is_video_type(content_type: &str) -> bool {
    VIDEO_CONTENT_TYPES.contains(&content_type)
}

pub fn is_image_type(content_type: &str) -> bool {
    IMAGE_CONTENT_TYPES.contains(&content_type)
}

/// A thumbnail may be either a still image or a short video.
pub fn is_valid_thumbnail_type(content_type: &str) -> bool {
    is_video_type(content_type) || is_image_type(content_type)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_video_types_accepted() {
        for ct in VIDEO_CONTENT_TYPES {
            assert!(is_video_type(ct), "{} should be a video type", ct);
        }
    }

    #[test]
    fn test_image_types_accepted() {
        assert!(is_image_type("image/png"));
        assert!(is_image_type("image/jpeg"));
        assert!(is_image_type("image/webp"));
    }

    #[test]
    fn test_unrelated_types_rejected() {
        assert!(!is_video_type("application/pdf"));
        assert!(!is_image_type("application/pdf"));
        assert!(!is_video_type("image/png"));
        assert!(!is_image_type("video/mp4"));
        assert!(!is_image_type("image/gif"));
    }

    #[test]
    fn test_no_parameter_or_prefix_matching() {
        assert!(!is_video_type("video/mp4; charset=x"));
        assert!(!is_video_type("video/mp"));
        assert!(!is_video_type("video/"));
        assert!(!is_video_type("video/*"));
        assert!(!is_video_type(" video/mp4"));
        assert!(!is_image_type("image/png "));
    }

    #[test]
    fn test_case_sensitive() {
        assert!(!is_video_type("VIDEO/MP4"));
        assert!(!is_image_type("Image/Png"));
    }

    #[test]
    fn test_empty_string() {
        assert!(!is_video_type(""));
        assert!(!is_image_type(""));
        assert!(!is_valid_thumbnail_type(""));
    }

    #[test]
    fn test_thumbnail_accepts_video_or_image() {
        assert!(is_valid_thumbnail_type("image/webp"));
        assert!(is_valid_thumbnail_type("video/quicktime"));
        assert!(!is_valid_thumbnail_type("application/pdf"));
    }
}
