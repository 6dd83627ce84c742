//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `POST  /encode`  - Issue a short URL
//! - `POST  /decode`  - Resolve a short URL (`QUERY` accepted too)
//! - `GET   /health`  - Service status and in-memory gauges
//! - anything else    - `404` with the JSON error envelope
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Panic recovery** - Handler panics become `500` responses
//! - **Path normalization** - Trailing slash handling

use crate::api;
use crate::api::handlers::{health_handler, route_not_found_handler};
use crate::api::middleware::{panic, tracing};
use crate::state::AppState;
use axum::Router;
use axum::routing::get;
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

/// Constructs the router with all routes and middleware, without path
/// normalization.
pub fn api_router(state: AppState) -> Router {
    Router::new()
        .merge(api::routes::shortener_routes())
        .route("/health", get(health_handler))
        .fallback(route_not_found_handler)
        .with_state(state)
        .layer(panic::layer())
        .layer(tracing::layer())
}

/// Constructs the application router served by the binary.
///
/// Trailing slashes are trimmed before routing, so `/encode/` reaches
/// the encode handler.
pub fn app_router(state: AppState) -> NormalizePath<Router> {
    NormalizePathLayer::trim_trailing_slash().layer(api_router(state))
}
