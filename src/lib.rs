//! # shortlink
//!
//! An in-memory URL shortener built with Axum.
//!
//! ## Architecture
//!
//! This crate follows Clean Architecture principles with clear layer separation:
//!
//! - **Domain Layer** ([`domain`]) - Entities and the store and limiter contracts
//! - **Application Layer** ([`application`]) - Encode and decode use cases, request validation
//! - **Infrastructure Layer** ([`infrastructure`]) - In-memory store, rate limiter and clocks
//! - **API Layer** ([`api`]) - REST handlers, DTOs, and middleware
//!
//! ## Features
//!
//! - Reversible, scrambled short codes over a 31-symbol alphabet
//! - Several rate limit quotas enforced together per client and operation
//! - Typed validation with distinct error codes for every failure
//! - `QUERY /decode` for clients that support body-carrying safe requests
//!
//! ## Quick Start
//!
//! ```bash
//! export SHORT_URL_DOMAIN="sho.rt"
//! cargo run
//!
//! curl -X POST localhost:3000/encode \
//!      -H 'content-type: application/json' \
//!      -d '{"url": "https://www.example.com"}'
//! ```
//!
//! ## Configuration
//!
//! Service configuration is loaded from environment variables via [`config::Config`].
//! See [`config`] module for available options.

pub mod api;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod state;
pub mod utils;

pub mod config;
pub mod server;

pub mod routes;

pub use error::AppError;
pub use state::AppState;

/// Commonly used types for external consumers.
///
/// Re-exports frequently used types to simplify imports for library users
/// and integration tests.
pub mod prelude {
    pub use crate::application::services::ShortenerService;
    pub use crate::domain::entities::{Quota, RateLimitPolicy, Scope, UrlRecord};
    pub use crate::error::AppError;
    pub use crate::infrastructure::persistence::InMemoryUrlRepository;
    pub use crate::infrastructure::rate_limit::InMemoryRateLimiter;
    pub use crate::state::{AppState, Shortener};
    pub use crate::utils::id_codec::IdCodec;
}
