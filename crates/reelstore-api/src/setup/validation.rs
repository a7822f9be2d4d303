//! Configuration validation
//!
//! Validates critical configuration values at startup to catch misconfigurations early.

use anyhow::Result;
use reelstore_core::Config;
use reelstore_processing::validate_binary_path;

const LARGE_UPLOAD_WARNING_BYTES: usize = 2 * 1024 * 1024 * 1024;

/// Validate critical configuration values
///
/// Fails fast on settings that would only surface as errors once traffic arrives.
pub fn validate_config(config: &Config) -> Result<()> {
    config.validate()?;

    if config.database.timeout_seconds == 0 {
        return Err(anyhow::anyhow!("DB_TIMEOUT_SECONDS cannot be 0"));
    }

    validate_binary_path(&config.ffprobe_path)
        .map_err(|e| anyhow::anyhow!("FFPROBE_PATH is invalid: {}", e))?;

    if config.max_upload_size_bytes > LARGE_UPLOAD_WARNING_BYTES {
        tracing::warn!(
            max_upload_size_bytes = config.max_upload_size_bytes,
            "MAX_UPLOAD_SIZE_BYTES is very large - uploads are buffered in memory"
        );
    }

    Ok(())
}
