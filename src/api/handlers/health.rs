//! Health check endpoint

use axum::Json;
use serde::Serialize;
use utoipa::ToSchema;

/// Service health
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    /// `ok` when the service is running normally
    pub status: String,
    /// Service version (from Cargo.toml)
    pub version: String,
}

/// Service health check
///
/// Returns the current status and version. Use for availability
/// monitoring; requires no authentication.
#[utoipa::path(
    get,
    path = "/health",
    tag = "Health",
    responses(
        (status = 200, description = "Service is running normally", body = HealthResponse)
    )
)]
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}
