//! Application layer implementing the encode and decode use cases.
//!
//! This layer orchestrates domain operations: it asks the rate limiter for
//! admission, validates the request body, and coordinates the codec and the
//! repository. Handlers call into it and translate its errors to responses.
//!
//! # Modules
//!
//! - [`services::shortener_service::ShortenerService`] - Encode and decode
//! - [`validation`] - Request body validation

pub mod services;
pub mod validation;
