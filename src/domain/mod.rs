//! Domain layer containing business entities and contracts.
//!
//! # Architecture
//!
//! - [`entities`] - Core data structures (url records, quotas)
//! - [`repositories`] - The id → URL store contract
//! - [`rate_limiter`] - The admission control contract
//!
//! The domain layer has no dependencies on infrastructure or presentation
//! layers. Implementations live in [`crate::infrastructure`].

pub mod entities;
pub mod rate_limiter;
pub mod repositories;

pub use rate_limiter::{RateLimitExceeded, RateLimiter};

#[cfg(test)]
pub use rate_limiter::MockRateLimiter;
