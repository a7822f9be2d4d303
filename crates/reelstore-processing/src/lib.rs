//! Reelstore media processing
//!
//! Duration probing for uploaded videos via `ffprobe`.

pub mod probe;

pub use probe::{
    parse_duration, validate_binary_path, DurationProbe, FfprobeDurationProber, ProbeError,
};
