//! API constants

/// Versioned prefix for the documented API routes
pub const API_PREFIX: &str = "/api/v1";

/// Upper bound for each dependency check behind the readiness probe
pub const HEALTH_CHECK_TIMEOUT_SECS: u64 = 5;
