//! Field-level checks shared by drafts and patches.
//!
//! Rules:
//! - Required text fields must contain at least one non-whitespace character
//! - Image links must parse as absolute `http` or `https` URLs with a host

use url::Url;

use crate::error::TypeError;

/// Implemented by every input value that can be checked before it reaches
/// the store.
pub trait Validate {
    fn validate(&self) -> Result<(), TypeError>;
}

/// Reject empty or whitespace-only strings.
pub fn require_non_empty(field: &'static str, value: &str) -> Result<(), TypeError> {
    if value.trim().is_empty() {
        return Err(TypeError::EmptyField { field });
    }
    Ok(())
}

/// Reject anything that is not an absolute http(s) URL.
///
/// # Examples
///
/// ```
/// use cadence_types::validation::require_http_url;
///
/// assert!(require_http_url("image", "https://cdn.example.com/a.png").is_ok());
/// assert!(require_http_url("image", "not a url").is_err());
/// assert!(require_http_url("image", "ftp://example.com/a.png").is_err());
/// ```
pub fn require_http_url(field: &'static str, value: &str) -> Result<(), TypeError> {
    let parsed = Url::parse(value).map_err(|e| TypeError::InvalidUrl {
        field,
        reason: e.to_string(),
    })?;

    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(TypeError::InvalidUrl {
            field,
            reason: format!("unsupported scheme {:?}", parsed.scheme()),
        });
    }

    if parsed.host_str().map_or(true, str::is_empty) {
        return Err(TypeError::InvalidUrl {
            field,
            reason: "missing host".into(),
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_empty_accepts_text() {
        assert!(require_non_empty("title", "Morning digest").is_ok());
    }

    #[test]
    fn non_empty_rejects_blank() {
        assert_eq!(
            require_non_empty("title", ""),
            Err(TypeError::EmptyField { field: "title" })
        );
        assert!(require_non_empty("title", "   \t").is_err());
    }

    #[test]
    fn url_accepts_http_and_https() {
        assert!(require_http_url("image", "http://example.com").is_ok());
        assert!(require_http_url("image", "https://example.com/avatars/1.jpg?size=64").is_ok());
    }

    #[test]
    fn url_rejects_other_schemes_and_relative_paths() {
        assert!(require_http_url("image", "/avatars/1.jpg").is_err());
        assert!(require_http_url("image", "mailto:someone@example.com").is_err());
        assert!(require_http_url("image", "").is_err());
    }
}
