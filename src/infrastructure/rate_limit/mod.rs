//! Rate limiter implementations.
//!
//! - [`InMemoryRateLimiter`] - Per-process fixed windows, one per quota

pub mod window_limiter;

pub use window_limiter::{InMemoryRateLimiter, retry_after_secs};
