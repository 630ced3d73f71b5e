//! The request pipeline behind [`EanSearch`](crate::EanSearch).
//!
//! # Overview
//!
//! - [`ApiRequest`] / [`Operation`]: an operation and its ordered parameters
//! - [`RequestExecutor`]: URL construction, retry policy, credit tracking
//! - [`Transport`] / [`ReqwestTransport`]: one blocking HTTP GET
//! - [`RawResponse`]: status, headers and undecoded body
//! - [`ApiError`] / [`TransportError`]: why a call produced no body
//!
//! # Retry Behavior
//!
//! - **429 (Rate Limited)**: retried up to `max_retries` times (default 3),
//!   waiting for `Retry-After` when present, otherwise `retry_wait`
//! - **Any other non-2xx status**: returned immediately
//! - **Transport failures**: returned immediately
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use ean_search::{ApiToken, EanSearchConfig};
//! use ean_search::clients::{ApiRequest, Operation, RequestExecutor, ReqwestTransport};
//!
//! let config = EanSearchConfig::builder()
//!     .token(ApiToken::new("my-token").unwrap())
//!     .build()
//!     .unwrap();
//! let transport = Arc::new(ReqwestTransport::new(config.timeout()).unwrap());
//! let executor = RequestExecutor::new(&config, transport);
//!
//! let request = ApiRequest::new(Operation::VerifyChecksum).param("ean", "5099750442227");
//! match executor.call(&request) {
//!     Ok(body) => println!("{body}"),
//!     Err(error) => eprintln!("{error}"),
//! }
//! ```

mod errors;
mod executor;
mod http_request;
mod http_response;
mod transport;

pub use errors::{ApiError, TransportError};
pub use executor::{RequestExecutor, SDK_VERSION, UNKNOWN_CREDITS};
pub use http_request::{ApiRequest, Operation};
pub use http_response::{RawResponse, CREDITS_REMAINING_HEADER, RETRY_AFTER_HEADER};
pub use transport::{ReqwestTransport, Transport};

#[cfg(test)]
pub(crate) use transport::testing;
