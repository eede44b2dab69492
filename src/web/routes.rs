//! # Route Definitions
//!
//! The HTTP surface is intentionally small: an information page at the root
//! and a liveness probe under `/api`.

use axum::routing::get;
use axum::Router;

use crate::web::handlers;
use crate::web::state::AppState;

/// Create information routes
///
/// - `/` - Instance information page (HTML)
pub fn info_routes() -> Router<AppState> {
    Router::new().route("/", get(handlers::info::home))
}

/// Create health routes
///
/// - `/api/health` - Liveness probe for orchestrators (JSON)
pub fn health_routes() -> Router<AppState> {
    Router::new().route("/api/health", get(handlers::health::api_health))
}
