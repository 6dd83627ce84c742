//! Handlers for the decode endpoint.

use axum::{
    Json,
    body::Bytes,
    extract::State,
    http::{HeaderMap, Method},
    response::{IntoResponse, Response},
};

use super::encode::content_type;
use crate::api::dto::url::UrlResponse;
use crate::error::AppError;
use crate::state::AppState;
use crate::utils::client_ip::ClientKey;

/// Method name of the safe, body-carrying `QUERY` request.
pub const QUERY_METHOD: &str = "QUERY";

/// Resolves a short URL to the URL it was issued for.
///
/// # Endpoint
///
/// `POST /decode` (also `QUERY /decode`)
///
/// # Request Body
///
/// ```json
/// { "url": "http://sho.rt/ms34n2" }
/// ```
///
/// # Response
///
/// ```json
/// { "url": "https://www.example.com/some/long/path" }
/// ```
///
/// # Errors
///
/// - **400 Bad Request**: Empty body, malformed JSON, or a short URL with a
///   query, fragment, extra path segment or overlong code
/// - **404 Not Found**: Code was never issued
/// - **415 Unsupported Media Type**: Content type is not JSON
/// - **418 I'm a teapot**: Code is not one this service could have produced
/// - **422 Unprocessable Entity**: `url` missing or not an absolute URL
/// - **429 Too Many Requests**: Decode quota exhausted, see `Retry-After`
pub async fn decode_handler(
    State(state): State<AppState>,
    client: ClientKey,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<UrlResponse>, AppError> {
    let url = state
        .shortener
        .decode(client.as_str(), content_type(&headers), &body)?;

    Ok(Json(UrlResponse::new(url)))
}

/// Serves `QUERY /decode` and rejects every other unrouted method.
pub async fn decode_fallback_handler(
    method: Method,
    state: State<AppState>,
    client: ClientKey,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    if method.as_str() != QUERY_METHOD {
        return AppError::MethodNotAllowed {
            method: method.to_string(),
        }
        .into_response();
    }

    decode_handler(state, client, headers, body)
        .await
        .into_response()
}
