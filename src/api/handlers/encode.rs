//! Handler for the encode endpoint.

use axum::{
    Json,
    body::Bytes,
    extract::State,
    http::{HeaderMap, header},
};

use crate::api::dto::url::UrlResponse;
use crate::error::AppError;
use crate::state::AppState;
use crate::utils::client_ip::ClientKey;

/// Issues a short URL for a long one.
///
/// # Endpoint
///
/// `POST /encode`
///
/// # Request Body
///
/// ```json
/// { "url": "https://www.example.com/some/long/path" }
/// ```
///
/// # Response
///
/// ```json
/// { "url": "http://sho.rt/ms34n2" }
/// ```
///
/// # Errors
///
/// - **400 Bad Request**: Empty body or body that is not a JSON object
/// - **415 Unsupported Media Type**: Content type is not JSON
/// - **422 Unprocessable Entity**: `url` missing or not an absolute URL
/// - **429 Too Many Requests**: Encode quota exhausted, see `Retry-After`
pub async fn encode_handler(
    State(state): State<AppState>,
    client: ClientKey,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<UrlResponse>, AppError> {
    let short_url = state
        .shortener
        .encode(client.as_str(), content_type(&headers), &body)?;

    Ok(Json(UrlResponse::new(short_url)))
}

pub(crate) fn content_type(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
}
