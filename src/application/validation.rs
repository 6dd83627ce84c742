//! Request body validation shared by the encode and decode use cases.
//!
//! Turns a raw body and its content type into a [`ValidUrlRequest`] before
//! any business logic runs. Checks run in a fixed order so that the first
//! failing stage decides the error reported to the client.

use serde_json::Value;
use url::Url;
use validator::Validate;

use crate::error::AppError;

/// Name of the JSON field carrying the URL in both directions.
pub const URL_FIELD: &str = "url";

/// A request whose `url` field is a syntactically valid absolute URL.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidUrlRequest {
    /// The URL exactly as the client sent it.
    pub raw: String,
    pub parsed: Url,
}

#[derive(Debug, Validate)]
struct UrlField {
    #[validate(url(message = "Invalid URL format"))]
    url: String,
}

/// Validates a raw request body.
///
/// # Errors
///
/// In order of precedence:
/// - [`AppError::PayloadMissing`] - body is empty or whitespace
/// - [`AppError::UnsupportedContentType`] - content type is absent or not JSON
/// - [`AppError::MalformedPayload`] - body is not a JSON object, or `url` is not a string
/// - [`AppError::MissingField`] - `url` is absent, null or empty
/// - [`AppError::InvalidUrl`] - `url` is not an absolute URL with a host
pub fn validate_url_request(
    content_type: Option<&str>,
    body: &[u8],
) -> Result<ValidUrlRequest, AppError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Err(AppError::PayloadMissing);
    }

    if !content_type.is_some_and(is_json_content_type) {
        return Err(AppError::UnsupportedContentType {
            content_type: content_type.map(str::to_owned),
        });
    }

    let payload: Value = serde_json::from_slice(body).map_err(|e| AppError::MalformedPayload {
        reason: e.to_string(),
    })?;

    let Value::Object(mut fields) = payload else {
        return Err(AppError::MalformedPayload {
            reason: "expected a JSON object".to_string(),
        });
    };

    let raw = match fields.remove(URL_FIELD) {
        None | Some(Value::Null) => return Err(AppError::MissingField { field: URL_FIELD }),
        Some(Value::String(s)) if s.is_empty() => {
            return Err(AppError::MissingField { field: URL_FIELD });
        }
        Some(Value::String(s)) => s,
        Some(other) => {
            return Err(AppError::MalformedPayload {
                reason: format!("field '{URL_FIELD}' must be a string, got {}", json_type(&other)),
            });
        }
    };

    let field = UrlField { url: raw };
    if let Err(e) = field.validate() {
        return Err(AppError::InvalidUrl {
            reason: e.to_string(),
            url: field.url,
        });
    }

    let parsed = match Url::parse(&field.url) {
        Ok(parsed) if parsed.has_host() => parsed,
        Ok(_) => {
            return Err(AppError::InvalidUrl {
                url: field.url,
                reason: "URL has no host".to_string(),
            });
        }
        Err(e) => {
            return Err(AppError::InvalidUrl {
                url: field.url,
                reason: e.to_string(),
            });
        }
    };

    Ok(ValidUrlRequest {
        raw: field.url,
        parsed,
    })
}

/// Accepts `application/json` and `application/*+json`, with parameters.
fn is_json_content_type(content_type: &str) -> bool {
    let essence = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();

    essence == "application/json"
        || essence
            .strip_prefix("application/")
            .is_some_and(|subtype| subtype.len() > "+json".len() && subtype.ends_with("+json"))
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
