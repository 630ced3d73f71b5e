//! Error types for client configuration.
//!
//! Configuration is the only fallible step of using the client: once an
//! [`EanSearch`](crate::EanSearch) is built, every API operation is total and
//! reports failure through empty or default return values.
//!
//! # Example
//!
//! ```rust
//! use ean_search::{ApiToken, ConfigError};
//!
//! let result = ApiToken::new("");
//! assert!(matches!(result, Err(ConfigError::EmptyToken)));
//! ```

use thiserror::Error;

/// Errors that can occur while configuring the client.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// The API token cannot be empty.
    #[error("API token cannot be empty. Please provide a valid EAN-Search.org access token.")]
    EmptyToken,

    /// The API host is not a usable URL.
    #[error("Invalid API host '{url}'. Please provide a URL with scheme (e.g., 'https://api.ean-search.org/api').")]
    InvalidApiHost {
        /// The invalid URL that was provided.
        url: String,
    },

    /// A required field is missing.
    #[error("Missing required field: '{field}'. This field must be set before building the configuration.")]
    MissingRequiredField {
        /// The name of the missing field.
        field: &'static str,
    },

    /// The underlying HTTP client could not be created.
    #[error("Failed to initialize HTTP transport: {reason}")]
    TransportInit {
        /// Why the transport could not be built.
        reason: String,
    },
}
