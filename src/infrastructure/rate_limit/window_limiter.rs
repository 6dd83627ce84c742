//! Fixed-window rate limiter keyed by client and scope.

use std::time::{Duration, Instant};

use dashmap::DashMap;
use tracing::debug;

use crate::domain::entities::{Quota, RateLimitPolicy, Scope};
use crate::domain::{RateLimitExceeded, RateLimiter};
use crate::infrastructure::clock::{Clock, SystemClock};

#[derive(Debug, Clone, Copy)]
struct Window {
    opened_at: Instant,
    count: u32,
}

impl Window {
    fn is_expired(&self, quota: &Quota, now: Instant) -> bool {
        now.duration_since(self.opened_at) >= quota.window
    }

    /// Requests counted against the quota as of `now`.
    fn effective_count(&self, quota: &Quota, now: Instant) -> u32 {
        if self.is_expired(quota, now) { 0 } else { self.count }
    }
}

/// In-memory limiter enforcing every quota of a scope at once.
///
/// Each `(client, scope)` pair keeps one window per configured quota. A window
/// opens on the first request counted against it and resets once its
/// duration has elapsed. A request is admitted only if every window has room
/// left, and only then is it counted in all of them.
pub struct InMemoryRateLimiter<C: Clock = SystemClock> {
    policy: RateLimitPolicy,
    windows: DashMap<(String, Scope), Vec<Window>>,
    clock: C,
}

impl InMemoryRateLimiter<SystemClock> {
    pub fn new(policy: RateLimitPolicy) -> Self {
        Self::with_clock(policy, SystemClock::new())
    }
}

impl<C: Clock> InMemoryRateLimiter<C> {
    pub fn with_clock(policy: RateLimitPolicy, clock: C) -> Self {
        Self {
            policy,
            windows: DashMap::new(),
            clock,
        }
    }

    pub fn policy(&self) -> &RateLimitPolicy {
        &self.policy
    }

    /// Drops clients whose windows have all expired. Returns how many were
    /// dropped.
    pub fn purge_idle(&self) -> usize {
        let now = self.clock.now();
        let before = self.windows.len();

        self.windows.retain(|(_, scope), windows| {
            let quotas = self.policy.quotas(*scope);
            windows
                .iter()
                .zip(quotas)
                .any(|(window, quota)| !window.is_expired(quota, now))
        });

        before.saturating_sub(self.windows.len())
    }
}

impl<C: Clock> RateLimiter for InMemoryRateLimiter<C> {
    fn admit(&self, client_key: &str, scope: Scope) -> Result<(), RateLimitExceeded> {
        let quotas = self.policy.quotas(scope);
        if quotas.is_empty() {
            return Ok(());
        }

        let now = self.clock.now();
        // The entry guard holds the shard lock, so check and count are one step.
        let mut entry = self
            .windows
            .entry((client_key.to_owned(), scope))
            .or_insert_with(|| {
                vec![
                    Window {
                        opened_at: now,
                        count: 0,
                    };
                    quotas.len()
                ]
            });
        let windows = entry.value_mut();

        let retry_after = windows
            .iter()
            .zip(quotas)
            .filter(|(window, quota)| window.effective_count(quota, now) >= quota.count)
            .map(|(window, quota)| {
                quota
                    .window
                    .saturating_sub(now.duration_since(window.opened_at))
            })
            .max();

        if let Some(retry_after) = retry_after {
            debug!(
                client = client_key,
                scope = %scope,
                retry_after_ms = retry_after.as_millis() as u64,
                "Request rejected by rate limiter"
            );
            return Err(RateLimitExceeded { scope, retry_after });
        }

        for (window, quota) in windows.iter_mut().zip(quotas) {
            if window.is_expired(quota, now) {
                window.opened_at = now;
                window.count = 1;
            } else {
                window.count += 1;
            }
        }

        Ok(())
    }

    fn tracked_clients(&self) -> usize {
        self.windows.len()
    }
}

/// Rounds a retry hint up to whole seconds, never below one.
pub fn retry_after_secs(retry_after: Duration) -> u64 {
    let secs = retry_after.as_secs();
    if retry_after.subsec_nanos() > 0 || secs == 0 {
        secs + 1
    } else {
        secs
    }
}
