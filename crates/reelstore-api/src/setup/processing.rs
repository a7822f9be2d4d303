//! Duration prober setup

use anyhow::Result;
use reelstore_core::Config;
use reelstore_processing::{DurationProbe, FfprobeDurationProber};
use std::sync::Arc;

pub fn setup_prober(config: &Config) -> Result<Arc<dyn DurationProbe>> {
    let prober = FfprobeDurationProber::new(config.ffprobe_path.as_str())?;
    tracing::info!(ffprobe_path = %prober.ffprobe_path(), "Duration prober configured");
    Ok(Arc::new(prober))
}
