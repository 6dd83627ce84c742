//! REST API layer for HTTP request/response handling.
//!
//! This layer translates HTTP requests into service calls and formats
//! responses according to API contracts.
//!
//! # Modules
//!
//! - [`dto`] - Data Transfer Objects for response serialization
//! - [`handlers`] - HTTP request handlers
//! - [`middleware`] - Request tracing and panic recovery
//! - [`routes`] - Route configuration for the shortener endpoints

pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod routes;
