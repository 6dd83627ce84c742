//! Rate limit quotas and per-scope policies.
//!
//! Quotas are written the way operators usually spell them:
//!
//! ```text
//! 2/second
//! 50 per hour
//! 10 per 5 minutes
//! 200 per day; 50 per hour; 2 per second
//! ```

use regex::Regex;
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;
use std::time::Duration;
use thiserror::Error;

/// Compiled regex for a single quota expression.
static QUOTA_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(\d+)\s*(?:/|\s+per\s+)\s*(?:(\d+)\s*)?(second|minute|hour|day)s?$")
        .expect("quota regex is valid")
});

/// Errors produced while parsing quota expressions.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QuotaParseError {
    #[error("invalid quota expression: '{0}'")]
    Syntax(String),

    #[error("quota must allow at least one request: '{0}'")]
    ZeroCount(String),

    #[error("quota window must be longer than zero: '{0}'")]
    ZeroWindow(String),
}

/// Named rate limit bucket, one per public operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scope {
    Encode,
    Decode,
}

impl Scope {
    pub const ALL: [Scope; 2] = [Scope::Encode, Scope::Decode];

    pub fn as_str(&self) -> &'static str {
        match self {
            Scope::Encode => "encode",
            Scope::Decode => "decode",
        }
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// At most `count` requests per `window`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quota {
    pub count: u32,
    pub window: Duration,
}

impl Quota {
    pub fn new(count: u32, window: Duration) -> Self {
        Self { count, window }
    }

    pub fn per_second(count: u32) -> Self {
        Self::new(count, Duration::from_secs(1))
    }

    pub fn per_hour(count: u32) -> Self {
        Self::new(count, Duration::from_secs(60 * 60))
    }

    pub fn per_day(count: u32) -> Self {
        Self::new(count, Duration::from_secs(24 * 60 * 60))
    }

    /// Parses a `;`- or `,`-separated list of quota expressions.
    ///
    /// Empty items are skipped, so an empty string yields no quotas.
    pub fn parse_list(input: &str) -> Result<Vec<Quota>, QuotaParseError> {
        input
            .split([';', ','])
            .map(str::trim)
            .filter(|item| !item.is_empty())
            .map(str::parse)
            .collect()
    }
}

impl FromStr for Quota {
    type Err = QuotaParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let input = s.trim();
        let captures = QUOTA_REGEX
            .captures(input)
            .ok_or_else(|| QuotaParseError::Syntax(input.to_string()))?;

        let count: u32 = captures[1]
            .parse()
            .map_err(|_| QuotaParseError::Syntax(input.to_string()))?;
        let multiplier: u64 = match captures.get(2) {
            Some(m) => m
                .as_str()
                .parse()
                .map_err(|_| QuotaParseError::Syntax(input.to_string()))?,
            None => 1,
        };
        let unit_secs: u64 = match captures[3].to_ascii_lowercase().as_str() {
            "second" => 1,
            "minute" => 60,
            "hour" => 60 * 60,
            _ => 24 * 60 * 60,
        };

        if count == 0 {
            return Err(QuotaParseError::ZeroCount(input.to_string()));
        }
        if multiplier == 0 {
            return Err(QuotaParseError::ZeroWindow(input.to_string()));
        }

        let secs = multiplier
            .checked_mul(unit_secs)
            .ok_or_else(|| QuotaParseError::Syntax(input.to_string()))?;

        Ok(Self::new(count, Duration::from_secs(secs)))
    }
}

impl fmt::Display for Quota {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} per {}s", self.count, self.window.as_secs())
    }
}

/// Quotas enforced for each [`Scope`].
///
/// A scope without quotas is unlimited.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RateLimitPolicy {
    quotas: HashMap<Scope, Vec<Quota>>,
}

impl RateLimitPolicy {
    /// Creates a policy with no quotas at all.
    pub fn unlimited() -> Self {
        Self::default()
    }

    /// Applies the same quotas to every scope.
    pub fn uniform(quotas: Vec<Quota>) -> Self {
        let mut policy = Self::default();
        for scope in Scope::ALL {
            policy = policy.with_scope(scope, quotas.clone());
        }
        policy
    }

    /// Replaces the quotas of a single scope.
    pub fn with_scope(mut self, scope: Scope, quotas: Vec<Quota>) -> Self {
        self.quotas.insert(scope, quotas);
        self
    }

    pub fn quotas(&self, scope: Scope) -> &[Quota] {
        self.quotas.get(&scope).map(Vec::as_slice).unwrap_or(&[])
    }
}
