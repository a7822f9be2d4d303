//! Shared key generation for storage backends.
//!
//! Key format: `videos/{filename}` for video files, `thumbnails/{filename}` for
//! thumbnails. Only the final path component of a client-supplied filename is
//! kept, and it is reduced to `[A-Za-z0-9._-]` so the key is stored verbatim by
//! every backend and can be used unchanged in the public URL.

use crate::traits::{StorageError, StorageResult};

pub const VIDEO_PREFIX: &str = "videos";
pub const THUMBNAIL_PREFIX: &str = "thumbnails";

const UNKNOWN_FILENAME: &str = "unknown";
const MAX_FILENAME_LEN: usize = 255;

fn is_key_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_')
}

/// Final path component of a client-supplied filename with every character
/// outside the key charset replaced by `_`, or `unknown` if nothing usable is left.
///
/// Both `/` and `\` are treated as separators since browsers on Windows may
/// send the full local path.
pub fn base_filename(filename: Option<&str>) -> String {
    let name = filename
        .and_then(|name| name.rsplit(['/', '\\']).next())
        .map(str::trim)
        .unwrap_or_default();

    if name.is_empty() || name == "." || name == ".." {
        return UNKNOWN_FILENAME.to_string();
    }

    name.chars()
        .take(MAX_FILENAME_LEN)
        .map(|c| if is_key_char(c) { c } else { '_' })
        .collect()
}

/// Storage key for a video file
pub fn video_key(filename: Option<&str>) -> StorageResult<String> {
    build_key(VIDEO_PREFIX, filename)
}

/// Storage key for a thumbnail file
pub fn thumbnail_key(filename: Option<&str>) -> StorageResult<String> {
    build_key(THUMBNAIL_PREFIX, filename)
}

fn build_key(prefix: &str, filename: Option<&str>) -> StorageResult<String> {
    let key = format!("{}/{}", prefix, base_filename(filename));
    validate_key(&key)?;
    Ok(key)
}

/// Reject keys that could escape the bucket/container namespace or that a
/// backend would rewrite before storing.
pub fn validate_key(key: &str) -> StorageResult<()> {
    if key.is_empty() {
        return Err(StorageError::InvalidKey("Storage key is empty".to_string()));
    }
    if key
        .split('/')
        .any(|segment| segment.is_empty() || segment == "." || segment == "..")
    {
        return Err(StorageError::InvalidKey(
            "Storage key contains an invalid path segment".to_string(),
        ));
    }
    if !key.chars().all(|c| c == '/' || is_key_char(c)) {
        return Err(StorageError::InvalidKey(
            "Storage key contains invalid characters".to_string(),
        ));
    }
    Ok(())
}
