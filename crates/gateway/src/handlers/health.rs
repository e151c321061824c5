//! Health check handlers

use axum::Json;
use edurag_common::SERVICE_NAME;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
    pub message: String,
}

/// Liveness probe - always returns ok if the server is running.
///
/// Dependencies are not contacted; a misconfigured index shows up on the
/// first `/ask` instead.
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        service: SERVICE_NAME.to_string(),
        message: "Backend is running successfully".to_string(),
    })
}
