//! Shortener route configuration.

use crate::api::handlers::{
    decode_fallback_handler, decode_handler, encode_handler, method_not_allowed_handler,
};
use crate::state::AppState;
use axum::{Router, routing::post};

/// Encode and decode routes.
///
/// # Endpoints
///
/// - `POST  /encode` - Issue a short URL
/// - `POST  /decode` - Resolve a short URL
/// - `QUERY /decode` - Same as `POST /decode`
///
/// Any other method on these paths gets `405 Method Not Allowed`.
pub fn shortener_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/encode",
            post(encode_handler).fallback(method_not_allowed_handler),
        )
        .route(
            "/decode",
            post(decode_handler).fallback(decode_fallback_handler),
        )
}
