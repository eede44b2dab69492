//! # Health Check Handler
//!
//! Orchestrator-compatible liveness endpoint. No external dependencies, so
//! it stays fast and successful even when the metadata service is down.

use axum::extract::State;
use axum::Json;
use serde::Serialize;
use tracing::debug;

use crate::web::state::AppState;

/// Service identifier reported by the health endpoint
pub const SERVICE_NAME: &str = "terraform-docker-web-server";

/// Liveness payload returned by `GET /api/health`
#[derive(Debug, Serialize)]
pub struct HealthStatus {
    status: String,
    service: String,
    hostname: String,
}

impl HealthStatus {
    /// Build the fixed "service is up" payload for this host.
    pub fn current() -> Self {
        Self {
            status: "healthy".to_string(),
            service: SERVICE_NAME.to_string(),
            hostname: super::local_hostname(),
        }
    }
}

/// Liveness probe: GET /api/health
///
/// Unconditionally 200 while the process is responsive, which is exactly
/// what a liveness/readiness probe should measure here.
pub async fn api_health(State(_state): State<AppState>) -> Json<HealthStatus> {
    let status = HealthStatus::current();
    debug!(hostname = %status.hostname, "serving health check");
    Json(status)
}
