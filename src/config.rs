//! Application configuration loaded from environment variables.
//!
//! Configuration is loaded once at startup and validated before the server starts.
//!
//! ## Variables
//!
//! - `LISTEN` - Bind address (default: `0.0.0.0:3000`)
//! - `SHORT_URL_DOMAIN` - Host used when building short URLs (default: `sho.rt`)
//! - `SHORT_CODE_MIN_LENGTH` - Codes are padded to this length (default: 6)
//! - `SHORT_CODE_MAX_LENGTH` - Longest code accepted on decode (default: the minimum length)
//! - `RATE_LIMITS` - Quotas applied to every scope
//!   (default: `200 per day; 50 per hour; 2 per second`)
//! - `ENCODE_RATE_LIMITS` / `DECODE_RATE_LIMITS` - Per-scope overrides
//! - `RATE_LIMIT_SWEEP_INTERVAL` - Seconds between idle client sweeps, `0` disables (default: 300)
//! - `BEHIND_PROXY` - Trust `X-Forwarded-For` / `X-Real-IP` (default: `false`)
//! - `RUST_LOG` - Log level (default: `info`)
//! - `LOG_FORMAT` - Log format: `text` or `json` (default: `text`)
//!
//! Quotas are written as `N/unit` or `N per [M] unit(s)` and separated by `;`
//! or `,`. An empty list disables rate limiting for that scope.
//!
//! ```bash
//! export RATE_LIMITS="100 per hour; 5/second"
//! export DECODE_RATE_LIMITS="1000 per hour"
//! ```

use anyhow::{Context, Result};
use std::env;
use std::time::Duration;

use crate::domain::entities::{Quota, RateLimitPolicy, Scope};
use crate::utils::id_codec::MAX_DIGITS;

pub const DEFAULT_RATE_LIMITS: &str = "200 per day; 50 per hour; 2 per second";

/// Service configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub listen_addr: String,
    pub log_level: String,
    pub log_format: String,
    pub short_url_domain: String,
    pub min_code_length: usize,
    pub max_code_length: usize,
    pub encode_limits: Vec<Quota>,
    pub decode_limits: Vec<Quota>,
    /// Zero disables the background sweep.
    pub sweep_interval: Duration,
    /// When true, the client key is read from X-Forwarded-For / X-Real-IP headers.
    /// Enable only when the service is behind a trusted reverse proxy.
    pub behind_proxy: bool,
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if a numeric variable does not parse or a quota list
    /// is malformed.
    pub fn from_env() -> Result<Self> {
        let listen_addr = env::var("LISTEN").unwrap_or_else(|_| "0.0.0.0:3000".to_string());
        let log_level = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
        let log_format = env::var("LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

        let short_url_domain =
            env::var("SHORT_URL_DOMAIN").unwrap_or_else(|_| "sho.rt".to_string());

        let min_code_length = parse_var("SHORT_CODE_MIN_LENGTH")?.unwrap_or(6);
        let max_code_length = parse_var("SHORT_CODE_MAX_LENGTH")?.unwrap_or(min_code_length);

        let default_limits = env::var("RATE_LIMITS").unwrap_or_else(|_| DEFAULT_RATE_LIMITS.to_string());
        let encode_limits = Self::load_limits("ENCODE_RATE_LIMITS", &default_limits)?;
        let decode_limits = Self::load_limits("DECODE_RATE_LIMITS", &default_limits)?;

        let sweep_interval =
            Duration::from_secs(parse_var("RATE_LIMIT_SWEEP_INTERVAL")?.unwrap_or(300));

        let behind_proxy = env::var("BEHIND_PROXY")
            .map(|v| v.eq_ignore_ascii_case("true") || v == "1")
            .unwrap_or(false);

        Ok(Self {
            listen_addr,
            log_level,
            log_format,
            short_url_domain,
            min_code_length,
            max_code_length,
            encode_limits,
            decode_limits,
            sweep_interval,
            behind_proxy,
        })
    }

    /// Loads a scope's quota list, falling back to the shared list.
    fn load_limits(var: &str, fallback: &str) -> Result<Vec<Quota>> {
        let raw = env::var(var).unwrap_or_else(|_| fallback.to_string());
        Quota::parse_list(&raw).with_context(|| format!("Invalid quota list in {var}: '{raw}'"))
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `min_code_length` is zero or longer than a 64-bit id can need
    /// - `max_code_length` is shorter than `min_code_length`
    /// - `short_url_domain` is empty or contains a path
    /// - `log_format` is not `text` or `json`
    /// - `listen_addr` is invalid
    pub fn validate(&self) -> Result<()> {
        if self.min_code_length == 0 || self.min_code_length > MAX_DIGITS {
            anyhow::bail!(
                "SHORT_CODE_MIN_LENGTH must be between 1 and {MAX_DIGITS}, got {}",
                self.min_code_length
            );
        }

        if self.max_code_length < self.min_code_length {
            anyhow::bail!(
                "SHORT_CODE_MAX_LENGTH ({}) must not be shorter than SHORT_CODE_MIN_LENGTH ({})",
                self.max_code_length,
                self.min_code_length
            );
        }

        if self.max_code_length > MAX_DIGITS {
            anyhow::bail!(
                "SHORT_CODE_MAX_LENGTH must be at most {MAX_DIGITS}, got {}",
                self.max_code_length
            );
        }

        if self.short_url_domain.is_empty() || self.short_url_domain.contains('/') {
            anyhow::bail!(
                "SHORT_URL_DOMAIN must be a bare host, got '{}'",
                self.short_url_domain
            );
        }

        if self.log_format != "text" && self.log_format != "json" {
            anyhow::bail!(
                "LOG_FORMAT must be 'text' or 'json', got '{}'",
                self.log_format
            );
        }

        if !self.listen_addr.contains(':') {
            anyhow::bail!(
                "LISTEN must be in format 'host:port', got '{}'",
                self.listen_addr
            );
        }

        Ok(())
    }

    /// Builds the rate limit policy for both scopes.
    pub fn rate_limit_policy(&self) -> RateLimitPolicy {
        RateLimitPolicy::unlimited()
            .with_scope(Scope::Encode, self.encode_limits.clone())
            .with_scope(Scope::Decode, self.decode_limits.clone())
    }

    /// Prints configuration summary.
    pub fn print_summary(&self) {
        tracing::info!("Configuration loaded:");
        tracing::info!("  Listen address: {}", self.listen_addr);
        tracing::info!("  Short URL domain: {}", self.short_url_domain);
        tracing::info!(
            "  Code length: {} (accepting up to {})",
            self.min_code_length,
            self.max_code_length
        );
        tracing::info!("  Encode limits: {}", format_limits(&self.encode_limits));
        tracing::info!("  Decode limits: {}", format_limits(&self.decode_limits));

        if self.sweep_interval.is_zero() {
            tracing::info!("  Idle client sweep: disabled");
        } else {
            tracing::info!("  Idle client sweep: every {}s", self.sweep_interval.as_secs());
        }

        tracing::info!("  Behind proxy: {}", self.behind_proxy);
        tracing::info!("  Log level: {}", self.log_level);
        tracing::info!("  Log format: {}", self.log_format);
    }
}

fn parse_var<T>(name: &str) -> Result<Option<T>>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .with_context(|| format!("{name} must be a non-negative integer, got '{raw}'")),
        Err(_) => Ok(None),
    }
}

fn format_limits(limits: &[Quota]) -> String {
    if limits.is_empty() {
        return "unlimited".to_string();
    }

    limits
        .iter()
        .map(Quota::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Loads and validates configuration from environment variables.
///
/// # Errors
///
/// Returns an error if a variable is malformed or validation fails.
///
/// # Note
///
/// This function expects environment variables to be already loaded
/// (e.g., via `dotenvy::dotenv()` in `main.rs`).
pub fn load_from_env() -> Result<Config> {
    let config = Config::from_env()?;
    config.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    const VARS: [&str; 9] = [
        "SHORT_URL_DOMAIN",
        "SHORT_CODE_MIN_LENGTH",
        "SHORT_CODE_MAX_LENGTH",
        "RATE_LIMITS",
        "ENCODE_RATE_LIMITS",
        "DECODE_RATE_LIMITS",
        "RATE_LIMIT_SWEEP_INTERVAL",
        "BEHIND_PROXY",
        "LISTEN",
    ];

    fn clear_env() {
        // SAFETY: Tests are run serially due to #[serial], so no concurrent access
        unsafe {
            for var in VARS {
                env::remove_var(var);
            }
        }
    }

    fn valid_config() -> Config {
        Config {
            listen_addr: "0.0.0.0:3000".to_string(),
            log_level: "info".to_string(),
            log_format: "text".to_string(),
            short_url_domain: "sho.rt".to_string(),
            min_code_length: 6,
            max_code_length: 6,
            encode_limits: vec![Quota::per_second(2)],
            decode_limits: vec![Quota::per_second(2)],
            sweep_interval: Duration::from_secs(300),
            behind_proxy: false,
        }
    }

    #[test]
    fn test_config_validation() {
        let mut config = valid_config();
        assert!(config.validate().is_ok());

        config.min_code_length = 0;
        assert!(config.validate().is_err());

        config.min_code_length = 7;
        assert!(config.validate().is_err());

        config.max_code_length = 7;
        assert!(config.validate().is_ok());

        config.max_code_length = 14;
        config.min_code_length = 6;
        assert!(config.validate().is_err());

        config.max_code_length = 6;

        config.short_url_domain = "sho.rt/x".to_string();
        assert!(config.validate().is_err());

        config.short_url_domain = "sho.rt".to_string();

        config.log_format = "invalid".to_string();
        assert!(config.validate().is_err());

        config.log_format = "json".to_string();
        assert!(config.validate().is_ok());

        config.listen_addr = "3000".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    #[serial]
    fn test_defaults() {
        clear_env();

        let config = Config::from_env().unwrap();

        assert_eq!(config.listen_addr, "0.0.0.0:3000");
        assert_eq!(config.short_url_domain, "sho.rt");
        assert_eq!(config.min_code_length, 6);
        assert_eq!(config.max_code_length, 6);
        assert_eq!(
            config.encode_limits,
            vec![Quota::per_day(200), Quota::per_hour(50), Quota::per_second(2)]
        );
        assert_eq!(config.decode_limits, config.encode_limits);
        assert_eq!(config.sweep_interval, Duration::from_secs(300));
        assert!(!config.behind_proxy);
        assert!(config.validate().is_ok());
    }

    #[test]
    #[serial]
    fn test_scope_overrides() {
        clear_env();
        // SAFETY: Tests are run serially
        unsafe {
            env::set_var("RATE_LIMITS", "10/minute");
            env::set_var("DECODE_RATE_LIMITS", "");
        }

        let config = Config::from_env().unwrap();
        let policy = config.rate_limit_policy();

        assert_eq!(
            policy.quotas(Scope::Encode),
            &[Quota::new(10, Duration::from_secs(60))]
        );
        assert!(policy.quotas(Scope::Decode).is_empty());

        clear_env();
    }

    #[test]
    #[serial]
    fn test_max_length_follows_min_length() {
        clear_env();
        // SAFETY: Tests are run serially
        unsafe {
            env::set_var("SHORT_CODE_MIN_LENGTH", "8");
        }

        let config = Config::from_env().unwrap();
        assert_eq!(config.min_code_length, 8);
        assert_eq!(config.max_code_length, 8);

        clear_env();
    }

    #[test]
    #[serial]
    fn test_malformed_values_are_rejected() {
        clear_env();
        // SAFETY: Tests are run serially
        unsafe {
            env::set_var("RATE_LIMITS", "lots per fortnight");
        }
        assert!(Config::from_env().is_err());

        clear_env();
        // SAFETY: Tests are run serially
        unsafe {
            env::set_var("SHORT_CODE_MIN_LENGTH", "six");
        }
        assert!(Config::from_env().is_err());

        clear_env();
    }

    #[test]
    #[serial]
    fn test_behind_proxy_flag() {
        clear_env();
        // SAFETY: Tests are run serially
        unsafe {
            env::set_var("BEHIND_PROXY", "TRUE");
        }
        assert!(Config::from_env().unwrap().behind_proxy);

        clear_env();
    }

    #[test]
    fn test_format_limits() {
        assert_eq!(format_limits(&[]), "unlimited");
        assert_eq!(
            format_limits(&[Quota::per_hour(50), Quota::per_second(2)]),
            "50 per 3600s, 2 per 1s"
        );
    }
}
