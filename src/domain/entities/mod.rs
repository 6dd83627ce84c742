//! Core domain entities.
//!
//! # Entity Types
//!
//! - [`UrlRecord`] - An issued id bound to its original URL
//! - [`Quota`] - A `(count, window)` pair enforced by the rate limiter
//! - [`RateLimitPolicy`] - The quotas applied to each [`Scope`]

pub mod quota;
pub mod url_record;

pub use quota::{Quota, QuotaParseError, RateLimitPolicy, Scope};
pub use url_record::UrlRecord;
