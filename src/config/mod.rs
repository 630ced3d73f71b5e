//! Configuration types for the EAN-Search client.
//!
//! # Overview
//!
//! - [`EanSearchConfig`]: all settings a client instance needs
//! - [`EanSearchConfigBuilder`]: builder for [`EanSearchConfig`]
//! - [`ApiToken`]: a validated access token with masked debug output
//! - [`ApiHost`]: a validated base endpoint
//!
//! # Example
//!
//! ```rust
//! use std::time::Duration;
//! use ean_search::{ApiToken, EanSearchConfig};
//!
//! let config = EanSearchConfig::builder()
//!     .token(ApiToken::new("my-token").unwrap())
//!     .max_retries(5)
//!     .retry_wait(Duration::from_millis(250))
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(config.max_retries(), 5);
//! ```

mod newtypes;

pub use newtypes::{ApiHost, ApiToken};

use std::time::Duration;

use crate::error::ConfigError;

/// Default number of retries after a rate-limited (HTTP 429) response.
pub const DEFAULT_MAX_RETRIES: u32 = 3;

/// Default wait between rate-limited attempts when the server sends no `Retry-After`.
pub const DEFAULT_RETRY_WAIT: Duration = Duration::from_secs(1);

/// Default upper bound on a server-requested `Retry-After` wait.
pub const DEFAULT_MAX_RETRY_WAIT: Duration = Duration::from_secs(60);

/// Configuration for an [`EanSearch`](crate::EanSearch) client.
///
/// `EanSearchConfig` is `Clone`, `Send` and `Sync`.
#[derive(Clone, Debug)]
pub struct EanSearchConfig {
    token: ApiToken,
    api_host: ApiHost,
    user_agent_prefix: Option<String>,
    max_retries: u32,
    retry_wait: Duration,
    max_retry_wait: Duration,
    timeout: Option<Duration>,
}

impl EanSearchConfig {
    /// Creates a new builder for constructing an `EanSearchConfig`.
    #[must_use]
    pub fn builder() -> EanSearchConfigBuilder {
        EanSearchConfigBuilder::new()
    }

    /// Returns the access token.
    #[must_use]
    pub const fn token(&self) -> &ApiToken {
        &self.token
    }

    /// Returns the API host.
    #[must_use]
    pub const fn api_host(&self) -> &ApiHost {
        &self.api_host
    }

    /// Returns the user agent prefix, if configured.
    #[must_use]
    pub fn user_agent_prefix(&self) -> Option<&str> {
        self.user_agent_prefix.as_deref()
    }

    /// Returns how many times a rate-limited request is retried.
    #[must_use]
    pub const fn max_retries(&self) -> u32 {
        self.max_retries
    }

    /// Returns the fallback wait between rate-limited attempts.
    #[must_use]
    pub const fn retry_wait(&self) -> Duration {
        self.retry_wait
    }

    /// Returns the longest `Retry-After` wait that is honored.
    #[must_use]
    pub const fn max_retry_wait(&self) -> Duration {
        self.max_retry_wait
    }

    /// Returns the transport timeout, if one overrides the transport default.
    #[must_use]
    pub const fn timeout(&self) -> Option<Duration> {
        self.timeout
    }
}

const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<EanSearchConfig>();
};

/// Builder for constructing [`EanSearchConfig`] instances.
///
/// Only `token` is required.
///
/// # Defaults
///
/// - `api_host`: `https://api.ean-search.org/api`
/// - `user_agent_prefix`: `None`
/// - `max_retries`: 3
/// - `retry_wait`: 1 second
/// - `max_retry_wait`: 60 seconds
/// - `timeout`: `None` (transport default)
#[derive(Debug, Default)]
pub struct EanSearchConfigBuilder {
    token: Option<ApiToken>,
    api_host: Option<ApiHost>,
    user_agent_prefix: Option<String>,
    max_retries: Option<u32>,
    retry_wait: Option<Duration>,
    max_retry_wait: Option<Duration>,
    timeout: Option<Duration>,
}

impl EanSearchConfigBuilder {
    /// Creates a new builder with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the access token (required).
    #[must_use]
    pub fn token(mut self, token: ApiToken) -> Self {
        self.token = Some(token);
        self
    }

    /// Sets the API host.
    #[must_use]
    pub fn api_host(mut self, host: ApiHost) -> Self {
        self.api_host = Some(host);
        self
    }

    /// Sets a prefix for the `User-Agent` header.
    #[must_use]
    pub fn user_agent_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.user_agent_prefix = Some(prefix.into());
        self
    }

    /// Sets how many times a rate-limited request is retried.
    #[must_use]
    pub const fn max_retries(mut self, retries: u32) -> Self {
        self.max_retries = Some(retries);
        self
    }

    /// Sets the wait between rate-limited attempts when no `Retry-After` is sent.
    #[must_use]
    pub const fn retry_wait(mut self, wait: Duration) -> Self {
        self.retry_wait = Some(wait);
        self
    }

    /// Caps how long a server-sent `Retry-After` may stall a call.
    #[must_use]
    pub const fn max_retry_wait(mut self, wait: Duration) -> Self {
        self.max_retry_wait = Some(wait);
        self
    }

    /// Sets a request timeout for the transport.
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Builds the [`EanSearchConfig`].
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingRequiredField`] if `token` is not set.
    pub fn build(self) -> Result<EanSearchConfig, ConfigError> {
        let token = self
            .token
            .ok_or(ConfigError::MissingRequiredField { field: "token" })?;

        Ok(EanSearchConfig {
            token,
            api_host: self.api_host.unwrap_or_default(),
            user_agent_prefix: self.user_agent_prefix,
            max_retries: self.max_retries.unwrap_or(DEFAULT_MAX_RETRIES),
            retry_wait: self.retry_wait.unwrap_or(DEFAULT_RETRY_WAIT),
            max_retry_wait: self.max_retry_wait.unwrap_or(DEFAULT_MAX_RETRY_WAIT),
            timeout: self.timeout,
        })
    }
}
