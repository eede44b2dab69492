//! # Web Module
//!
//! Axum application assembly for the info server: route definitions,
//! request handlers, shared state, and the ambient middleware stack.
//!
//! ## Core Components
//!
//! - [`routes`] - HTTP route definitions
//! - [`handlers`] - Request handlers for the info page and health probe
//! - [`middleware`] - Request correlation middleware
//! - [`state`] - Shared application state

pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod state;

use std::time::Duration;

use axum::Router;

use state::AppState;

/// Create the axum application with all routes and middleware.
///
/// Both endpoints are public; the layer stack adds a per-request
/// correlation ID, a whole-request timeout, permissive CORS, and HTTP
/// tracing.
pub fn create_app(app_state: AppState) -> Router {
    let request_timeout = Duration::from_millis(app_state.config.request_timeout_ms);

    Router::new()
        .merge(routes::info_routes())
        .merge(routes::health_routes())
        .layer(axum::middleware::from_fn(
            middleware::request_id::add_request_id,
        ))
        .layer(tower_http::timeout::TimeoutLayer::new(request_timeout))
        .layer(
            tower_http::cors::CorsLayer::new()
                .allow_origin(tower_http::cors::Any)
                .allow_methods(tower_http::cors::Any)
                .allow_headers(tower_http::cors::Any),
        )
        .layer(tower_http::trace::TraceLayer::new_for_http())
        .with_state(app_state)
}
