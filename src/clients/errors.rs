//! Failure taxonomy of the request pipeline.
//!
//! - [`TransportError`]: the request never produced an HTTP response
//! - [`ApiError::RateLimited`]: every attempt was answered with HTTP 429
//! - [`ApiError::HttpStatus`]: any other non-2xx response
//!
//! The public [`EanSearch`](crate::EanSearch) operations fold all of these into
//! their empty return values; the distinction is kept for logging and for
//! callers that drive a [`RequestExecutor`](crate::clients::RequestExecutor)
//! directly.
//!
//! # Example
//!
//! ```rust
//! use ean_search::clients::ApiError;
//!
//! let error = ApiError::RateLimited { tries: 4 };
//! assert!(error.to_string().contains("4"));
//! ```

use thiserror::Error;

/// A request failed before a response was received (DNS, connect, timeout, body read).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("Transport error: {message}")]
pub struct TransportError {
    /// Description of the underlying failure.
    pub message: String,
}

impl TransportError {
    /// Creates a transport error with the given description.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl From<reqwest::Error> for TransportError {
    fn from(error: reqwest::Error) -> Self {
        // Strip the URL, it carries the access token
        Self::new(error.without_url().to_string())
    }
}

/// Unified error type for a single API call.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// The request could not be sent or the response could not be read.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// The service kept answering HTTP 429 until retries ran out.
    #[error("Rate limited: gave up after {tries} tries")]
    RateLimited {
        /// Total number of attempts made.
        tries: u32,
    },

    /// The service answered with a non-2xx status that is not retried.
    #[error("Unexpected HTTP status {code}")]
    HttpStatus {
        /// The HTTP status code of the response.
        code: u16,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transport_error_message() {
        let error = TransportError::new("connection refused");
        assert_eq!(error.to_string(), "Transport error: connection refused");
    }

    #[test]
    fn test_api_error_wraps_transport_error_transparently() {
        let error: ApiError = TransportError::new("dns failure").into();
        assert_eq!(error.to_string(), "Transport error: dns failure");
    }

    #[test]
    fn test_rate_limited_error_includes_try_count() {
        let message = ApiError::RateLimited { tries: 4 }.to_string();
        assert!(message.contains("Rate limited"));
        assert!(message.contains('4'));
    }

    #[test]
    fn test_http_status_error_includes_code() {
        let message = ApiError::HttpStatus { code: 403 }.to_string();
        assert_eq!(message, "Unexpected HTTP status 403");
    }

    #[test]
    fn test_error_types_implement_std_error() {
        let _: &dyn std::error::Error = &ApiError::HttpStatus { code: 500 };
        let _: &dyn std::error::Error = &TransportError::new("x");
    }
}
