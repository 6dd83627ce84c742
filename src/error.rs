use axum::{
    Json,
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::{Value, json};
use thiserror::Error;

use crate::domain::RateLimitExceeded;
use crate::infrastructure::rate_limit::retry_after_secs;
use crate::utils::id_codec::CodecError;

#[derive(Serialize)]
struct ErrorBody {
    error: ErrorInfo,
}

#[derive(Serialize)]
struct ErrorInfo {
    code: &'static str,
    message: String,
    details: Value,
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Request body is empty")]
    PayloadMissing,

    #[error("Content type must be application/json")]
    UnsupportedContentType { content_type: Option<String> },

    #[error("Request body is not a valid JSON object")]
    MalformedPayload { reason: String },

    #[error("Missing required field '{field}'")]
    MissingField { field: &'static str },

    #[error("Invalid URL format")]
    InvalidUrl { url: String, reason: String },

    #[error("Malformed short URL")]
    MalformedShortUrl { url: String, reason: String },

    #[error("Short code cannot be decoded")]
    Codec(#[from] CodecError),

    #[error("Short URL not found")]
    NotFound { code: String },

    #[error("Rate limit exceeded")]
    RateLimited(#[from] RateLimitExceeded),

    #[error("No route for {method} {path}")]
    RouteNotFound { method: String, path: String },

    #[error("Method {method} is not allowed here")]
    MethodNotAllowed { method: String },

    #[error("{message}")]
    Internal { message: String, details: Value },
}

impl AppError {
    pub fn internal(message: impl Into<String>, details: Value) -> Self {
        Self::Internal {
            message: message.into(),
            details,
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::PayloadMissing
            | AppError::MalformedPayload { .. }
            | AppError::MalformedShortUrl { .. } => StatusCode::BAD_REQUEST,
            AppError::UnsupportedContentType { .. } => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            AppError::MissingField { .. } | AppError::InvalidUrl { .. } => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            AppError::Codec(_) => StatusCode::IM_A_TEAPOT,
            AppError::NotFound { .. } | AppError::RouteNotFound { .. } => StatusCode::NOT_FOUND,
            AppError::MethodNotAllowed { .. } => StatusCode::METHOD_NOT_ALLOWED,
            AppError::RateLimited(_) => StatusCode::TOO_MANY_REQUESTS,
            AppError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Stable machine-readable code for the error envelope.
    pub fn code(&self) -> &'static str {
        match self {
            AppError::PayloadMissing => "payload_missing",
            AppError::UnsupportedContentType { .. } => "unsupported_content_type",
            AppError::MalformedPayload { .. } => "malformed_payload",
            AppError::MissingField { .. } => "missing_field",
            AppError::InvalidUrl { .. } => "invalid_url",
            AppError::MalformedShortUrl { .. } => "malformed_short_url",
            AppError::Codec(_) => "codec_error",
            AppError::NotFound { .. } => "not_found",
            AppError::RateLimited(_) => "rate_limit_exceeded",
            AppError::RouteNotFound { .. } => "route_not_found",
            AppError::MethodNotAllowed { .. } => "method_not_allowed",
            AppError::Internal { .. } => "internal_error",
        }
    }

    fn details(&self) -> Value {
        match self {
            AppError::PayloadMissing => json!({}),
            AppError::UnsupportedContentType { content_type } => {
                json!({ "content_type": content_type, "expected": "application/json" })
            }
            AppError::MalformedPayload { reason } => json!({ "reason": reason }),
            AppError::MissingField { field } => json!({ "field": field }),
            AppError::InvalidUrl { url, reason } | AppError::MalformedShortUrl { url, reason } => {
                json!({ "url": url, "reason": reason })
            }
            AppError::Codec(e) => json!({ "reason": e.to_string() }),
            AppError::NotFound { code } => json!({ "code": code }),
            AppError::RateLimited(e) => json!({
                "scope": e.scope.as_str(),
                "retry_after_secs": retry_after_secs(e.retry_after),
            }),
            AppError::RouteNotFound { method, path } => json!({ "method": method, "path": path }),
            AppError::MethodNotAllowed { method } => json!({ "method": method }),
            AppError::Internal { details, .. } => details.clone(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let retry_after = match &self {
            AppError::RateLimited(e) => Some(retry_after_secs(e.retry_after)),
            _ => None,
        };

        let body = ErrorBody {
            error: ErrorInfo {
                code: self.code(),
                message: self.to_string(),
                details: self.details(),
            },
        };

        let mut response = (status, Json(body)).into_response();
        if let Some(secs) = retry_after {
            response
                .headers_mut()
                .insert(header::RETRY_AFTER, HeaderValue::from(secs));
        }
        response
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::Scope;
    use axum::body::to_bytes;
    use std::time::Duration;

    async fn body_json(response: Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[test]
    fn test_status_mapping() {
        assert_eq!(AppError::PayloadMissing.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            AppError::UnsupportedContentType { content_type: None }.status(),
            StatusCode::UNSUPPORTED_MEDIA_TYPE
        );
        assert_eq!(
            AppError::MissingField { field: "url" }.status(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            AppError::Codec(CodecError::Empty).status(),
            StatusCode::IM_A_TEAPOT
        );
        assert_eq!(
            AppError::NotFound { code: "mmmmmn".into() }.status(),
            StatusCode::NOT_FOUND
        );
    }

    #[tokio::test]
    async fn test_error_envelope() {
        let response = AppError::InvalidUrl {
            url: "hello there".into(),
            reason: "relative URL without a base".into(),
        }
        .into_response();

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let body = body_json(response).await;
        assert_eq!(body["error"]["code"], "invalid_url");
        assert_eq!(body["error"]["message"], "Invalid URL format");
        assert_eq!(body["error"]["details"]["url"], "hello there");
    }

    #[tokio::test]
    async fn test_rate_limited_sets_retry_after() {
        let response = AppError::RateLimited(RateLimitExceeded {
            scope: Scope::Encode,
            retry_after: Duration::from_millis(1200),
        })
        .into_response();

        assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(response.headers()[header::RETRY_AFTER], "2");

        let body = body_json(response).await;
        assert_eq!(body["error"]["details"]["scope"], "encode");
        assert_eq!(body["error"]["details"]["retry_after_secs"], 2);
    }

    #[tokio::test]
    async fn test_other_errors_have_no_retry_after() {
        let response = AppError::PayloadMissing.into_response();
        assert!(response.headers().get(header::RETRY_AFTER).is_none());
    }
}
