//! Infrastructure layer.
//!
//! This layer implements the contracts defined by the domain layer.
//!
//! # Modules
//!
//! - [`clock`] - Time sources (system and manually driven)
//! - [`persistence`] - In-memory url repository
//! - [`rate_limit`] - In-memory rate limiter

pub mod clock;
pub mod persistence;
pub mod rate_limit;
