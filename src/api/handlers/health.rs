//! Handler for health check endpoint.

use axum::{Json, extract::State};

use crate::api::dto::health::{HealthChecks, HealthResponse};
use crate::state::AppState;

/// Returns service status with gauges for the in-memory state.
///
/// # Endpoint
///
/// `GET /health`
///
/// # Response
///
/// ```json
/// {
///   "status": "healthy",
///   "version": "0.1.0",
///   "checks": {
///     "issued_links": 42,
///     "rate_limited_clients": 3
///   }
/// }
/// ```
pub async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        checks: HealthChecks {
            issued_links: state.shortener.issued_count(),
            rate_limited_clients: state.shortener.tracked_clients(),
        },
    })
}
