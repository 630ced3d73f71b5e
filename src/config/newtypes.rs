//! Validated newtype wrappers for configuration values.

use crate::error::ConfigError;
use std::fmt;

/// An EAN-Search.org access token.
///
/// The token is appended to every request as the `token` query parameter.
/// Its `Debug` output is masked so it does not leak into logs.
///
/// # Example
///
/// ```rust
/// use ean_search::ApiToken;
///
/// let token = ApiToken::new("secret-token").unwrap();
/// assert_eq!(token.as_ref(), "secret-token");
/// assert_eq!(format!("{:?}", token), "ApiToken(*****)");
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct ApiToken(String);

impl ApiToken {
    /// Creates a new validated token.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyToken`] if the token is empty or only whitespace.
    pub fn new(token: impl Into<String>) -> Result<Self, ConfigError> {
        let token = token.into();
        if token.trim().is_empty() {
            return Err(ConfigError::EmptyToken);
        }
        Ok(Self(token))
    }
}

impl AsRef<str> for ApiToken {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiToken(*****)")
    }
}

/// The base endpoint all requests are sent to.
///
/// Must carry a scheme and a host and no query string, since the executor
/// appends the query itself.
///
/// # Example
///
/// ```rust
/// use ean_search::ApiHost;
///
/// let host = ApiHost::new(" http://localhost:8080/api ").unwrap();
/// assert_eq!(host.as_ref(), "http://localhost:8080/api");
/// assert!(ApiHost::new("localhost:8080/api").is_err());
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiHost(String);

impl ApiHost {
    /// The production EAN-Search.org endpoint.
    pub const DEFAULT: &'static str = "https://api.ean-search.org/api";

    /// Creates a new validated API host.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidApiHost`] if the URL has no scheme, no
    /// host, or already carries a query string.
    pub fn new(url: impl Into<String>) -> Result<Self, ConfigError> {
        let url: String = url.into();
        let url = url.trim().to_string();
        let invalid = |url: &str| ConfigError::InvalidApiHost {
            url: url.to_string(),
        };

        let (scheme, remainder) = url.split_once("://").ok_or_else(|| invalid(&url))?;
        if scheme.is_empty() || !scheme.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(invalid(&url));
        }

        // Query parameters are appended by the executor
        if url.contains('?') || url.contains('#') {
            return Err(invalid(&url));
        }

        let host = remainder.split([':', '/']).next().unwrap_or_default();
        if host.is_empty() {
            return Err(invalid(&url));
        }

        Ok(Self(url))
    }
}

impl Default for ApiHost {
    fn default() -> Self {
        Self(Self::DEFAULT.to_string())
    }
}

impl AsRef<str> for ApiHost {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_token_rejects_empty_string() {
        assert!(matches!(ApiToken::new(""), Err(ConfigError::EmptyToken)));
        assert!(matches!(ApiToken::new("   "), Err(ConfigError::EmptyToken)));
    }

    #[test]
    fn test_api_token_masks_value_in_debug() {
        let token = ApiToken::new("super-secret-token").unwrap();
        let debug_output = format!("{token:?}");
        assert_eq!(debug_output, "ApiToken(*****)");
        assert!(!debug_output.contains("super-secret-token"));
    }

    #[test]
    fn test_api_host_accepts_valid_urls() {
        let host = ApiHost::new("https://api.ean-search.org/api").unwrap();
        assert_eq!(host.as_ref(), "https://api.ean-search.org/api");

        let host = ApiHost::new("  http://127.0.0.1:4321/api\n").unwrap();
        assert_eq!(host.as_ref(), "http://127.0.0.1:4321/api");
    }

    #[test]
    fn test_api_host_rejects_invalid() {
        assert!(ApiHost::new("api.ean-search.org").is_err());
        assert!(ApiHost::new("https://").is_err());
        assert!(ApiHost::new("://example.com").is_err());
        assert!(ApiHost::new("https://example.com/api?op=x").is_err());
        assert!(ApiHost::new("https://:8080/api").is_err());
        assert!(ApiHost::new("https:///api").is_err());
    }

    #[test]
    fn test_default_api_host_matches_parsed_default() {
        let parsed = ApiHost::new(ApiHost::DEFAULT).unwrap();
        assert_eq!(ApiHost::default(), parsed);
    }
}
