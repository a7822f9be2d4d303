//! Video duration probing with ffprobe

use async_trait::async_trait;
use serde::Deserialize;
use std::path::Path;
use std::process::Stdio;
use thiserror::Error;
use tokio::process::Command;

#[derive(Debug, Error)]
pub enum ProbeError {
    #[error("Invalid ffprobe path: {0}")]
    InvalidPath(String),

    #[error("Failed to run ffprobe: {0}")]
    Spawn(#[source] std::io::Error),

    #[error("ffprobe exited with {status}: {stderr}")]
    Failed { status: String, stderr: String },

    #[error("Failed to parse ffprobe output: {0}")]
    InvalidOutput(String),

    #[error("ffprobe output has no duration")]
    MissingDuration,

    #[error("Invalid duration value: {0}")]
    InvalidDuration(String),

    #[error("Failed to prepare probe input: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Deserialize)]
struct FFprobeOutput {
    format: Option<FFprobeFormat>,
}

#[derive(Debug, Deserialize)]
struct FFprobeFormat {
    duration: Option<String>,
}

/// Reject binary paths that could be abused if ever passed through a shell
pub fn validate_binary_path(path: &str) -> Result<(), ProbeError> {
    let dangerous_chars = [';', '|', '&', '$', '`', '(', ')', '<', '>', '\n', '\r'];
    if path.trim().is_empty() {
        return Err(ProbeError::InvalidPath("path is empty".to_string()));
    }
    if path.chars().any(|c| dangerous_chars.contains(&c)) {
        return Err(ProbeError::InvalidPath(format!(
            "path contains dangerous characters: {}",
            path
        )));
    }
    if path.contains("..") {
        return Err(ProbeError::InvalidPath(format!(
            "path contains directory traversal: {}",
            path
        )));
    }
    Ok(())
}

/// Parse `ffprobe -of json` output into whole seconds (truncated).
pub fn parse_duration(stdout: &[u8]) -> Result<u64, ProbeError> {
    let output: FFprobeOutput =
        serde_json::from_slice(stdout).map_err(|e| ProbeError::InvalidOutput(e.to_string()))?;

    let raw = output
        .format
        .and_then(|f| f.duration)
        .ok_or(ProbeError::MissingDuration)?;

    let seconds: f64 = raw
        .trim()
        .parse()
        .map_err(|_| ProbeError::InvalidDuration(raw.clone()))?;

    if !seconds.is_finite() || seconds < 0.0 {
        return Err(ProbeError::InvalidDuration(raw));
    }

    Ok(seconds.trunc() as u64)
}

/// Extension of the uploaded filename, kept so ffprobe can sniff the container.
fn temp_suffix(filename: Option<&str>) -> String {
    filename
        .and_then(|name| Path::new(name).extension())
        .and_then(|ext| ext.to_str())
        .filter(|ext| ext.len() <= 10 && ext.chars().all(|c| c.is_ascii_alphanumeric()))
        .map(|ext| format!(".{}", ext))
        .unwrap_or_default()
}

/// Reads the duration of a video
#[async_trait]
pub trait DurationProbe: Send + Sync {
    /// Duration in whole seconds of the media file at `path`
    async fn probe_duration(&self, path: &Path) -> Result<u64, ProbeError>;

    /// Duration of an in-memory upload.
    ///
    /// The bytes are written to a temporary file that is removed when this
    /// returns, on success and on failure.
    async fn probe_bytes(&self, data: &[u8], filename: Option<&str>) -> Result<u64, ProbeError> {
        let temp_file = tempfile::Builder::new()
            .prefix("reelstore-probe-")
            .suffix(&temp_suffix(filename))
            .tempfile()?;
        tokio::fs::write(temp_file.path(), data).await?;

        self.probe_duration(temp_file.path()).await
    }
}

/// `ffprobe` subprocess prober
#[derive(Debug, Clone)]
pub struct FfprobeDurationProber {
    ffprobe_path: String,
}

impl FfprobeDurationProber {
    pub fn new(ffprobe_path: impl Into<String>) -> Result<Self, ProbeError> {
        let ffprobe_path = ffprobe_path.into();
        validate_binary_path(&ffprobe_path)?;
        Ok(Self { ffprobe_path })
    }

    pub fn ffprobe_path(&self) -> &str {
        &self.ffprobe_path
    }
}

#[async_trait]
impl DurationProbe for FfprobeDurationProber {
    #[tracing::instrument(skip(self), fields(service = "ffprobe"))]
    async fn probe_duration(&self, path: &Path) -> Result<u64, ProbeError> {
        let start = std::time::Instant::now();

        let output = Command::new(&self.ffprobe_path)
            .args(["-v", "error", "-show_entries", "format=duration", "-of", "json"])
            .arg(path)
            .stdin(Stdio::null())
            .kill_on_drop(true)
            .output()
            .await
            .map_err(ProbeError::Spawn)?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            tracing::warn!(status = %output.status, stderr = %stderr, "ffprobe failed");
            return Err(ProbeError::Failed {
                status: output.status.to_string(),
                stderr,
            });
        }

        let seconds = parse_duration(&output.stdout)?;

        tracing::debug!(
            duration_seconds = seconds,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "ffprobe completed"
        );

        Ok(seconds)
    }
}
