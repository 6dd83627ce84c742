//! Handlers for requests no route accepts.

use axum::http::{Method, Uri};

use crate::error::AppError;

/// Router-wide fallback for unknown paths.
pub async fn route_not_found_handler(method: Method, uri: Uri) -> AppError {
    AppError::RouteNotFound {
        method: method.to_string(),
        path: uri.path().to_string(),
    }
}

/// Method fallback for routes that only accept `POST`.
pub async fn method_not_allowed_handler(method: Method) -> AppError {
    AppError::MethodNotAllowed {
        method: method.to_string(),
    }
}
