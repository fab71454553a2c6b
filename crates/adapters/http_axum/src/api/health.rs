//! Liveness endpoint.

use axum::Json;
use serde::Serialize;

/// Service name reported by the health endpoint.
pub const SERVICE_NAME: &str = "hospital-spaces-api";

/// Body of `GET /api/health`.
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
}

/// `GET /api/health`
pub async fn check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        service: SERVICE_NAME,
    })
}
