//! DTOs for short URL endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use validator::{Validate, ValidationError};

use crate::domain::entities::{Allocation, Link};
use crate::utils::code_generator::is_valid_short_code;

/// Request to shorten a URL.
///
/// `targetUrl` is kept as raw JSON so that a missing field and a non-string
/// value are both reported as "missing" rather than as a body parse error.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateUrlRequest {
    #[serde(default)]
    pub target_url: Option<Value>,
}

impl CreateUrlRequest {
    /// Target URL if it was sent as a JSON string.
    pub fn target_url(&self) -> Option<&str> {
        self.target_url.as_ref().and_then(Value::as_str)
    }
}

/// Response for a successfully created short URL.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateUrlResponse {
    pub short_code: String,
    pub short_url: String,
    pub target_url: String,
}

impl CreateUrlResponse {
    pub fn new(allocation: Allocation, short_url: String) -> Self {
        Self {
            short_code: allocation.short_code,
            short_url,
            target_url: allocation.target_url,
        }
    }
}

/// Stored details of a short URL.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UrlDetailsResponse {
    pub short_code: String,
    pub target_url: String,
    pub clicks: i64,
    pub created_at: DateTime<Utc>,
}

impl From<Link> for UrlDetailsResponse {
    fn from(link: Link) -> Self {
        Self {
            short_code: link.code,
            target_url: link.target_url,
            clicks: link.clicks,
            created_at: link.created_at,
        }
    }
}

/// Path parameters carrying a short code.
#[derive(Debug, Deserialize, Validate)]
pub struct ShortCodePath {
    #[validate(custom(function = "validate_short_code"))]
    pub code: String,
}

fn validate_short_code(code: &str) -> Result<(), ValidationError> {
    if is_valid_short_code(code) {
        Ok(())
    } else {
        Err(ValidationError::new("short_code"))
    }
}
