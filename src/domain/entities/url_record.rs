//! Url record entity: one issued id bound to one original URL.

use chrono::{DateTime, Utc};

/// A stored id → URL mapping.
///
/// Created exactly once per successful encode and never modified afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlRecord {
    pub id: u64,
    pub url: String,
    pub created_at: DateTime<Utc>,
}

impl UrlRecord {
    /// Creates a record stamped with the current time.
    pub fn new(id: u64, url: String) -> Self {
        Self {
            id,
            url,
            created_at: Utc::now(),
        }
    }
}
