//! Admission control contract.

use crate::domain::entities::Scope;
use std::time::Duration;
use thiserror::Error;

/// Returned when a client has used up one of its quotas.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("rate limit exceeded for {scope}, retry in {retry_after:?}")]
pub struct RateLimitExceeded {
    pub scope: Scope,
    /// Time until the longest blocking window resets.
    pub retry_after: Duration,
}

/// Per-client, per-scope admission control.
///
/// Checking and counting a request happen as one step for a given
/// `(client_key, scope)` pair, and a rejected request consumes nothing.
#[cfg_attr(test, mockall::automock)]
pub trait RateLimiter: Send + Sync {
    /// Admits the request or reports which scope is exhausted.
    fn admit(&self, client_key: &str, scope: Scope) -> Result<(), RateLimitExceeded>;

    /// Number of `(client, scope)` pairs currently tracked.
    fn tracked_clients(&self) -> usize;
}
