//! Encode and decode use cases.

use std::sync::Arc;

use serde_json::json;
use tracing::{debug, error, warn};

use crate::application::validation::validate_url_request;
use crate::domain::entities::Scope;
use crate::domain::repositories::UrlRepository;
use crate::domain::{RateLimitExceeded, RateLimiter};
use crate::error::AppError;
use crate::utils::id_codec::IdCodec;
use crate::utils::short_url::{build_short_url, extract_code};

/// Service that issues short URLs and resolves them back.
///
/// Every call is admitted by the rate limiter before its body is even looked
/// at, then validated, then handed to the codec and the repository.
pub struct ShortenerService<R: UrlRepository, L: RateLimiter> {
    repository: Arc<R>,
    rate_limiter: Arc<L>,
    codec: IdCodec,
    domain: String,
    max_code_length: usize,
}

impl<R: UrlRepository, L: RateLimiter> ShortenerService<R, L> {
    /// Creates a service that accepts codes up to the codec's minimum length.
    pub fn new(
        repository: Arc<R>,
        rate_limiter: Arc<L>,
        codec: IdCodec,
        domain: impl Into<String>,
    ) -> Self {
        Self {
            repository,
            rate_limiter,
            max_code_length: codec.min_length(),
            codec,
            domain: domain.into(),
        }
    }

    /// Overrides the longest code accepted by [`Self::decode`].
    ///
    /// Encode refuses to hand out codes longer than this.
    pub fn with_max_code_length(mut self, max_code_length: usize) -> Self {
        self.max_code_length = max_code_length;
        self
    }

    pub fn domain(&self) -> &str {
        &self.domain
    }

    /// Issues a new short URL for the URL in `body`.
    ///
    /// A fresh id is minted on every call, even for a URL seen before.
    ///
    /// # Errors
    ///
    /// - [`AppError::RateLimited`] if `client_key` is over an encode quota
    /// - Any validation failure from [`validate_url_request`]
    /// - [`AppError::Internal`] if the id no longer fits the accepted code length
    ///
    /// # Panics
    ///
    /// If the repository rejects a freshly reserved id. That only happens
    /// when the allocation discipline of the store has been broken.
    pub fn encode(
        &self,
        client_key: &str,
        content_type: Option<&str>,
        body: &[u8],
    ) -> Result<String, AppError> {
        self.admit(client_key, Scope::Encode)?;
        let request = validate_url_request(content_type, body)?;

        let id = self.repository.reserve_next_id();
        let code = self.codec.encode(id);
        if code.len() > self.max_code_length {
            error!(
                id,
                code = %code,
                max_code_length = self.max_code_length,
                "Short code space exhausted"
            );
            return Err(AppError::internal(
                "Short code space exhausted",
                json!({ "max_code_length": self.max_code_length }),
            ));
        }

        if let Err(e) = self.repository.put(id, request.raw) {
            error!(id, error = %e, "Url store invariant violated");
            panic!("url store invariant violated: {e}");
        }

        debug!(id, code = %code, "Short URL issued");
        Ok(build_short_url(&self.domain, &code))
    }

    /// Resolves the short URL in `body` to the URL it was issued for.
    ///
    /// The host of the short URL is not checked; only its path matters.
    ///
    /// # Errors
    ///
    /// - [`AppError::RateLimited`] if `client_key` is over a decode quota
    /// - Any validation failure from [`validate_url_request`]
    /// - [`AppError::MalformedShortUrl`] if the URL has a query, a fragment,
    ///   more than one path segment or an overlong code
    /// - [`AppError::Codec`] if the code is not one the codec could produce
    /// - [`AppError::NotFound`] if the id was never issued
    pub fn decode(
        &self,
        client_key: &str,
        content_type: Option<&str>,
        body: &[u8],
    ) -> Result<String, AppError> {
        self.admit(client_key, Scope::Decode)?;
        let request = validate_url_request(content_type, body)?;

        let code = extract_code(&request.parsed, self.max_code_length)?;
        let id = self.codec.decode(code)?;

        let record = self.repository.get(id).ok_or_else(|| AppError::NotFound {
            code: code.to_owned(),
        })?;

        debug!(id, code, "Short URL resolved");
        Ok(record.url)
    }

    /// Number of short URLs issued so far.
    pub fn issued_count(&self) -> usize {
        self.repository.len()
    }

    pub fn tracked_clients(&self) -> usize {
        self.rate_limiter.tracked_clients()
    }

    fn admit(&self, client_key: &str, scope: Scope) -> Result<(), RateLimitExceeded> {
        self.rate_limiter
            .admit(client_key, scope)
            .inspect_err(|e| {
                warn!(
                    client = client_key,
                    scope = %scope,
                    retry_after_ms = e.retry_after.as_millis() as u64,
                    "Rate limit exceeded"
                );
            })
    }
}
