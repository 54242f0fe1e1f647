//! Base URI resolution.

use std::borrow::Cow;

use crate::constants::DEFAULT_BASE_URI;
use crate::error::ConfigError;

/// Supplies the absolute base URI links are rendered below.
///
/// Read on every render, so implementations may follow the current request.
pub trait BaseUriResolver: Send + Sync {
    /// Returns an absolute ASCII URI without trailing slash.
    fn base_uri(&self) -> Cow<'_, str>;
}

/// A base URI fixed at construction.
///
/// # Examples
///
/// ```
/// use fast_links::{BaseUriResolver, FixedBaseUri};
///
/// let base = FixedBaseUri::parse("https://api.example.com/").unwrap();
/// assert_eq!(base.base_uri(), "https://api.example.com");
///
/// assert!(FixedBaseUri::parse("api.example.com").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixedBaseUri(String);

impl FixedBaseUri {
    /// Validates and normalizes a base URI.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidBaseUri`] if the input is empty, not
    /// ASCII, or has no scheme.
    pub fn parse(input: &str) -> Result<Self, ConfigError> {
        let invalid = |reason| ConfigError::InvalidBaseUri {
            value: input.to_string(),
            reason,
        };

        if input.is_empty() {
            return Err(invalid("base URI cannot be empty"));
        }
        if !input.is_ascii() {
            return Err(invalid("base URI must be ASCII"));
        }
        if input.chars().any(|c| c.is_ascii_whitespace() || c.is_ascii_control()) {
            return Err(invalid("base URI cannot contain whitespace or control characters"));
        }
        if !has_scheme(input) {
            return Err(invalid("base URI must be absolute, e.g. 'http://localhost'"));
        }

        let trimmed = input.strip_suffix('/').unwrap_or(input);
        Ok(Self(trimmed.to_string()))
    }

    /// Returns the normalized URI.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for FixedBaseUri {
    fn default() -> Self {
        Self(DEFAULT_BASE_URI.to_string())
    }
}

impl BaseUriResolver for FixedBaseUri {
    fn base_uri(&self) -> Cow<'_, str> {
        Cow::Borrowed(&self.0)
    }
}

impl<F> BaseUriResolver for F
where
    F: Fn() -> String + Send + Sync,
{
    fn base_uri(&self) -> Cow<'_, str> {
        Cow::Owned(self())
    }
}

/// `scheme = ALPHA *( ALPHA / DIGIT / "+" / "-" / "." )` followed by `:`
fn has_scheme(input: &str) -> bool {
    let Some((scheme, _)) = input.split_once(':') else {
        return false;
    };
    let mut chars = scheme.chars();
    chars.next().is_some_and(|c| c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_slash_trimmed() {
        let base = FixedBaseUri::parse("http://localhost:8080/").unwrap();
        assert_eq!(base.as_str(), "http://localhost:8080");
    }

    #[test]
    fn context_path_kept() {
        let base = FixedBaseUri::parse("http://localhost/api").unwrap();
        assert_eq!(base.base_uri(), "http://localhost/api");
    }

    #[test]
    fn relative_rejected() {
        assert!(matches!(
            FixedBaseUri::parse("/api"),
            Err(ConfigError::InvalidBaseUri { .. })
        ));
    }

    #[test]
    fn empty_rejected() {
        assert!(FixedBaseUri::parse("").is_err());
    }

    #[test]
    fn non_ascii_rejected() {
        assert!(FixedBaseUri::parse("http://b\u{fc}cher.example").is_err());
    }

    #[test]
    fn whitespace_rejected() {
        assert!(FixedBaseUri::parse("http://local host").is_err());
    }

    #[test]
    fn default_is_valid() {
        let default = FixedBaseUri::default();
        assert_eq!(FixedBaseUri::parse(default.as_str()), Ok(default));
    }

    #[test]
    fn closure_resolver() {
        let resolver = || "http://tenant.example".to_string();
        assert_eq!(resolver.base_uri(), "http://tenant.example");
    }
}
