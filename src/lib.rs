//! # EAN-Search API client
//!
//! A Rust client for the [EAN-Search.org](https://www.ean-search.org) barcode
//! database: product lookup by EAN/UPC/GTIN or ISBN, checksum verification,
//! product search by name, category or barcode prefix, issuing-country lookup,
//! barcode images, and the account's remaining API credits.
//!
//! ## Overview
//!
//! - [`EanSearch`]: the client, one method per API operation
//! - [`Product`] / [`ProductFull`]: decoded results
//! - [`Language`]: language filter codes
//! - [`EanSearchConfig`]: optional settings (API host, retries, timeout)
//! - [`clients`]: the request pipeline, for callers that need raw bodies
//!   or the exact failure reason
//! - [`decoder`]: response normalization and lenient field decoding
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use ean_search::{EanSearch, Language};
//!
//! let client = EanSearch::new("your-api-token").unwrap();
//!
//! match client.barcode_lookup("5099750442227", Some(Language::English)) {
//!     Some(found) => println!("{} from {}", found.product.name, found.product.issuing_country),
//!     None => println!("not found"),
//! }
//!
//! let valid = client.verify_checksum("5099750442227");
//! let books = client.product_search("Harry Potter", None, None);
//! let credits = client.credits_remaining();
//! ```
//!
//! ## Configuration
//!
//! ```rust
//! use std::time::Duration;
//! use ean_search::{ApiToken, EanSearch, EanSearchConfig};
//!
//! let config = EanSearchConfig::builder()
//!     .token(ApiToken::new("your-api-token").unwrap())
//!     .user_agent_prefix("MyApp/1.0")
//!     .max_retries(5)
//!     .retry_wait(Duration::from_millis(500))
//!     .build()
//!     .unwrap();
//!
//! let client = EanSearch::with_config(&config).unwrap();
//! ```
//!
//! ## Error Handling
//!
//! Only construction can fail ([`ConfigError`]). Every API method is total:
//! transport failures, error statuses and malformed responses all yield the
//! method's empty value. The underlying reason is logged through `tracing`
//! and is available from [`clients::RequestExecutor::call`] and the
//! `try_*` functions in [`decoder`].
//!
//! ## Design Principles
//!
//! - **Blocking**: every method returns once the call has completed
//! - **No global state**: credentials and the credit counter belong to one client
//! - **Thread-safe**: all types are `Send + Sync`

pub mod client;
pub mod clients;
pub mod config;
pub mod decoder;
pub mod error;
pub mod models;

pub use client::{EanSearch, DEFAULT_LOOKUP_LANGUAGE, DEFAULT_SEARCH_LANGUAGE};
pub use config::{ApiHost, ApiToken, EanSearchConfig, EanSearchConfigBuilder};
pub use error::ConfigError;
pub use models::{Language, Product, ProductFull};

pub use clients::{ApiError, ApiRequest, Operation, RequestExecutor, Transport};
