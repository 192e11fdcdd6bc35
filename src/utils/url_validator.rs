//! Target URL validation.
//!
//! Only absolute `https` URLs with a host are accepted. The input is checked,
//! never rewritten: the stored target is byte-for-byte what the client sent.

use url::Url;

/// Required literal prefix of every target URL.
const HTTPS_PREFIX: &str = "https://";

/// Reasons a target URL is rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum InvalidUrl {
    #[error("targetUrl is missing")]
    Missing,

    #[error("Only URLs starting with https:// are allowed")]
    NotHttps,

    #[error("targetUrl is not a valid https URL")]
    Malformed,
}

impl InvalidUrl {
    /// Short machine-readable reason.
    pub fn reason(&self) -> &'static str {
        match self {
            Self::Missing => "missing",
            Self::NotHttps => "not-https",
            Self::Malformed => "malformed",
        }
    }
}

/// Validates a candidate target URL.
///
/// `None` covers both an absent field and a non-string value; the HTTP
/// layer maps anything that is not a JSON string to `None`.
///
/// # Errors
///
/// - [`InvalidUrl::Missing`] for `None` or an empty string
/// - [`InvalidUrl::NotHttps`] when the literal `https://` prefix is absent
/// - [`InvalidUrl::Malformed`] when parsing fails, the scheme is not
///   `https`, or the host is empty
///
/// # Examples
///
/// ```ignore
/// assert!(validate_target_url(Some("https://example.com/a?b=1")).is_ok());
/// assert_eq!(validate_target_url(Some("http://example.com")), Err(InvalidUrl::NotHttps));
/// ```
pub fn validate_target_url(candidate: Option<&str>) -> Result<(), InvalidUrl> {
    let candidate = match candidate {
        Some(s) if !s.is_empty() => s,
        _ => return Err(InvalidUrl::Missing),
    };

    if !candidate.starts_with(HTTPS_PREFIX) {
        return Err(InvalidUrl::NotHttps);
    }

    let parsed = Url::parse(candidate).map_err(|_| InvalidUrl::Malformed)?;

    if parsed.scheme() != "https" {
        return Err(InvalidUrl::Malformed);
    }

    match parsed.host_str() {
        Some(host) if !host.is_empty() => Ok(()),
        _ => Err(InvalidUrl::Malformed),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_https_url() {
        assert!(validate_target_url(Some("https://example.com")).is_ok());
    }

    #[test]
    fn test_accepts_path_query_and_port() {
        assert!(validate_target_url(Some("https://example.com:8443/path?q=1#frag")).is_ok());
    }

    #[test]
    fn test_missing_when_absent() {
        assert_eq!(validate_target_url(None), Err(InvalidUrl::Missing));
    }

    #[test]
    fn test_missing_when_empty() {
        assert_eq!(validate_target_url(Some("")), Err(InvalidUrl::Missing));
    }

    #[test]
    fn test_rejects_http() {
        assert_eq!(
            validate_target_url(Some("http://example.com")),
            Err(InvalidUrl::NotHttps)
        );
    }

    #[test]
    fn test_prefix_is_case_sensitive() {
        assert_eq!(
            validate_target_url(Some("HTTPS://example.com")),
            Err(InvalidUrl::NotHttps)
        );
    }

    #[test]
    fn test_rejects_plain_text() {
        assert_eq!(
            validate_target_url(Some("not a url")),
            Err(InvalidUrl::NotHttps)
        );
    }

    #[test]
    fn test_rejects_empty_host() {
        assert_eq!(
            validate_target_url(Some("https://")),
            Err(InvalidUrl::Malformed)
        );
    }

    #[test]
    fn test_rejects_unparseable() {
        assert_eq!(
            validate_target_url(Some("https://exa mple.com")),
            Err(InvalidUrl::Malformed)
        );
    }

    #[test]
    fn test_reason_strings() {
        assert_eq!(InvalidUrl::Missing.reason(), "missing");
        assert_eq!(InvalidUrl::NotHttps.reason(), "not-https");
        assert_eq!(InvalidUrl::Malformed.reason(), "malformed");
    }
}
