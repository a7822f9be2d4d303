//! Health check handlers and response types.

use crate::constants::HEALTH_CHECK_TIMEOUT_SECS;
use crate::state::AppState;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use std::fmt::Display;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

/// Run an async check with timeout; returns status string "healthy", "timeout", or "{prefix}: {error}".
async fn run_check<F, E>(timeout: Duration, f: F, error_prefix: &str) -> String
where
    F: Future<Output = Result<(), E>>,
    E: Display,
{
    match tokio::time::timeout(timeout, f).await {
        Ok(Ok(())) => "healthy".to_string(),
        Ok(Err(e)) => format!("{}: {}", error_prefix, e),
        Err(_) => "timeout".to_string(),
    }
}

#[derive(Debug, serde::Serialize, serde::Deserialize)]
pub struct ReadinessResponse {
    pub status: String,
    pub database: String,
    pub storage: String,
}

/// Liveness probe - process is running.
pub async fn liveness_check() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(serde_json::json!({ "status": "alive" })),
    )
}

/// Readiness probe.
///
/// The database gates readiness. A failing storage check only marks the
/// response as degraded since the backend may accept writes it will not list.
pub async fn readiness_check(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let timeout = Duration::from_secs(HEALTH_CHECK_TIMEOUT_SECS);

    let repository = state.repository.clone();
    let database = run_check(timeout, async move { repository.ping().await }, "not_ready").await;

    let storage = state.storage.clone();
    let storage_status =
        run_check(timeout, async move { storage.health_check().await }, "degraded").await;

    let ready = database == "healthy";
    if !ready {
        tracing::error!(database = %database, "Database readiness check failed");
    }
    if storage_status != "healthy" {
        tracing::warn!(storage = %storage_status, "Storage readiness check failed");
    }

    let status = match (ready, storage_status == "healthy") {
        (false, _) => "not_ready",
        (true, false) => "degraded",
        (true, true) => "ready",
    };

    let status_code = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (
        status_code,
        Json(ReadinessResponse {
            status: status.to_string(),
            database,
            storage: storage_status,
        }),
    )
}
