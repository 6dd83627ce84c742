//! DTOs for health check endpoint.

use serde::Serialize;

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub checks: HealthChecks,
}

/// Gauges for the in-memory state.
#[derive(Debug, Serialize)]
pub struct HealthChecks {
    /// Short URLs issued since startup.
    pub issued_links: usize,
    /// `(client, scope)` pairs currently held by the rate limiter.
    pub rate_limited_clients: usize,
}
