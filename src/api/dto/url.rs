//! DTOs for the encode and decode endpoints.

use serde::Serialize;

/// Body returned by both endpoints.
///
/// Holds the short URL after an encode and the original URL after a decode.
#[derive(Debug, Serialize)]
pub struct UrlResponse {
    pub url: String,
}

impl UrlResponse {
    pub fn new(url: String) -> Self {
        Self { url }
    }
}
