//! Link entity representing a shortened URL mapping.

use chrono::{DateTime, Utc};

/// A stored short link.
///
/// `code` and `target_url` never change after creation; `clicks` only grows.
#[derive(Debug, Clone, PartialEq)]
pub struct Link {
    pub code: String,
    pub target_url: String,
    pub clicks: i64,
    pub created_at: DateTime<Utc>,
}

impl Link {
    /// Creates a new Link instance.
    pub fn new(code: String, target_url: String, clicks: i64, created_at: DateTime<Utc>) -> Self {
        Self {
            code,
            target_url,
            clicks,
            created_at,
        }
    }
}

/// Input data for inserting a new link.
#[derive(Debug, Clone, PartialEq)]
pub struct NewLink {
    pub code: String,
    pub target_url: String,
}

impl NewLink {
    /// Builds the stored record, starting with zero clicks.
    pub fn into_link(self, created_at: DateTime<Utc>) -> Link {
        Link::new(self.code, self.target_url, 0, created_at)
    }
}

/// A code that was reserved for a target URL.
#[derive(Debug, Clone, PartialEq)]
pub struct Allocation {
    pub short_code: String,
    pub target_url: String,
}
