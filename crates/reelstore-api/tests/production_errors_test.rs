//! Error bodies when running with `ENVIRONMENT=production`.
//!
//! Kept in its own test binary: the details switch is process-wide.
//!
//! Run with: `cargo test -p reelstore-api --test production_errors_test`

mod helpers;

use axum_test::multipart::MultipartForm;
use helpers::{create_test_config, setup_test_app_with, FixedProbe};
use std::sync::Arc;

#[tokio::test]
async fn test_production_errors_omit_details() {
    let config = create_test_config(&[
        ("ENVIRONMENT", "production"),
        ("CORS_ORIGINS", "https://app.example"),
    ]);
    let app = setup_test_app_with(config, Arc::new(FixedProbe(1))).await;

    let form = MultipartForm::new().add_text("title", "No file");
    let response = app.client().post("/upload").multipart(form).await;

    assert_eq!(response.status_code(), 400);
    let body: serde_json::Value = response.json();
    assert_eq!(body["error"], "file required");
    assert_eq!(body["code"], "INVALID_INPUT");
    assert!(body.get("details").is_none());
    assert!(body.get("error_type").is_none());
}
