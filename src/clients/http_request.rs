//! Request types for the EAN-Search API.
//!
//! Every call is a GET against the same endpoint; the operation is selected by
//! the `op` query parameter and followed by operation-specific parameters in
//! a fixed order.

use std::fmt;

/// Operations exposed by the EAN-Search API.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Operation {
    /// Product details by EAN/UPC or ISBN.
    BarcodeLookup,
    /// Checksum verification of a barcode.
    VerifyChecksum,
    /// Exact product name search.
    ProductSearch,
    /// Fuzzy product name search.
    SimilarProductSearch,
    /// Product name search within a category.
    CategorySearch,
    /// Products whose barcode starts with a prefix.
    BarcodePrefixSearch,
    /// Issuing country of a barcode.
    IssuingCountry,
    /// Rendered barcode image.
    BarcodeImage,
    /// Account information, used to read the credit counter.
    AccountStatus,
}

impl Operation {
    /// Returns the value of the `op` query parameter.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::BarcodeLookup => "barcode-lookup",
            Self::VerifyChecksum => "verify-checksum",
            Self::ProductSearch => "product-search",
            Self::SimilarProductSearch => "similar-product-search",
            Self::CategorySearch => "category-search",
            Self::BarcodePrefixSearch => "barcode-prefix-search",
            Self::IssuingCountry => "issuing-country",
            Self::BarcodeImage => "barcode-image",
            Self::AccountStatus => "account-status",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single API call: an operation plus its ordered parameters.
///
/// Parameter values are inserted into the URL exactly as given. Free-text
/// values must be escaped by the caller before they are added.
///
/// # Example
///
/// ```rust
/// use ean_search::clients::{ApiRequest, Operation};
///
/// let request = ApiRequest::new(Operation::BarcodeImage)
///     .param("ean", "5099750442227")
///     .param("width", 102)
///     .param("height", 50);
///
/// assert_eq!(
///     request.query(),
///     "op=barcode-image&ean=5099750442227&width=102&height=50"
/// );
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiRequest {
    operation: Operation,
    params: Vec<(String, String)>,
}

impl ApiRequest {
    /// Creates a request for the given operation with no parameters.
    #[must_use]
    pub const fn new(operation: Operation) -> Self {
        Self {
            operation,
            params: Vec::new(),
        }
    }

    /// Appends a parameter after the ones already present.
    #[must_use]
    pub fn param(mut self, key: impl Into<String>, value: impl fmt::Display) -> Self {
        self.params.push((key.into(), value.to_string()));
        self
    }

    /// Returns the operation of this request.
    #[must_use]
    pub const fn operation(&self) -> Operation {
        self.operation
    }

    /// Returns the parameters in insertion order.
    #[must_use]
    pub fn params(&self) -> &[(String, String)] {
        &self.params
    }

    /// Renders `op` followed by the parameters as a query string.
    #[must_use]
    pub fn query(&self) -> String {
        let mut query = format!("op={}", self.operation);
        for (key, value) in &self.params {
            query.push('&');
            query.push_str(key);
            query.push('=');
            query.push_str(value);
        }
        query
    }
}
