//! Data records returned by the client.
//!
//! - [`Product`]: basic product information from the search endpoints
//! - [`ProductFull`]: product information plus the Google category id
//! - [`Language`]: language filter codes

mod language;
mod product;

pub use language::Language;
pub use product::{Product, ProductFull};
