use std::sync::Arc;

use crate::application::services::ShortenerService;
use crate::infrastructure::persistence::InMemoryUrlRepository;
use crate::infrastructure::rate_limit::InMemoryRateLimiter;

/// Shortener wired to the in-memory store and limiter.
pub type Shortener = ShortenerService<InMemoryUrlRepository, InMemoryRateLimiter>;

#[derive(Clone)]
pub struct AppState {
    pub shortener: Arc<Shortener>,
    /// Trust forwarding headers when resolving the client key.
    pub behind_proxy: bool,
}

impl AppState {
    pub fn new(shortener: Arc<Shortener>, behind_proxy: bool) -> Self {
        Self {
            shortener,
            behind_proxy,
        }
    }
}
