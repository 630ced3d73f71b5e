//! The EAN-Search API client.
//!
//! [`EanSearch`] exposes one method per API operation. Methods never return
//! an error: a failed call, an unexpected status or an undecodable body all
//! produce the operation's empty value (`None`, `false`, `""` or an empty
//! `Vec`). Callers cannot tell "not found" from "service unreachable".

use std::sync::Arc;

use crate::clients::{
    ApiRequest, Operation, RequestExecutor, ReqwestTransport, Transport, UNKNOWN_CREDITS,
};
use crate::config::{ApiToken, EanSearchConfig};
use crate::decoder;
use crate::error::ConfigError;
use crate::models::{Language, Product, ProductFull};

/// Default language for barcode lookups and prefix searches.
pub const DEFAULT_LOOKUP_LANGUAGE: Language = Language::English;

/// Default language for name searches.
pub const DEFAULT_SEARCH_LANGUAGE: Language = Language::Any;

/// Client for the EAN-Search.org barcode API.
///
/// The client is synchronous: each method blocks until the call (including
/// any rate-limit retries) has finished. It is `Send + Sync` and can be shared
/// between threads behind an `Arc`.
///
/// # Example
///
/// ```rust,no_run
/// use ean_search::{EanSearch, Language};
///
/// let client = EanSearch::new("my-token").unwrap();
///
/// if let Some(found) = client.barcode_lookup("5099750442227", Some(Language::English)) {
///     println!("{} ({})", found.product.name, found.product.category_name);
/// }
///
/// for product in client.product_search("bananas", None, None) {
///     println!("{} {}", product.ean, product.name);
/// }
/// ```
#[derive(Debug)]
pub struct EanSearch {
    executor: RequestExecutor,
}

const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<EanSearch>();
};

impl EanSearch {
    /// Creates a client for the given access token with default settings.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyToken`] for an empty token, or
    /// [`ConfigError::TransportInit`] if the HTTP client cannot be built.
    pub fn new(token: impl Into<String>) -> Result<Self, ConfigError> {
        let config = EanSearchConfig::builder()
            .token(ApiToken::new(token)?)
            .build()?;
        Self::with_config(&config)
    }

    /// Creates a client from a full configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::TransportInit`] if the HTTP client cannot be built.
    pub fn with_config(config: &EanSearchConfig) -> Result<Self, ConfigError> {
        let transport = ReqwestTransport::new(config.timeout())?;
        Ok(Self::with_transport(config, Arc::new(transport)))
    }

    /// Creates a client that sends requests through a custom transport.
    #[must_use]
    pub fn with_transport(config: &EanSearchConfig, transport: Arc<dyn Transport>) -> Self {
        Self {
            executor: RequestExecutor::new(config, transport),
        }
    }

    /// Returns the executor used by this client.
    #[must_use]
    pub const fn executor(&self) -> &RequestExecutor {
        &self.executor
    }

    /// Looks up a product by its EAN/UPC/GTIN barcode.
    ///
    /// `language` defaults to [`Language::English`].
    #[must_use]
    pub fn barcode_lookup(&self, ean: &str, language: Option<Language>) -> Option<ProductFull> {
        let request = ApiRequest::new(Operation::BarcodeLookup)
            .param("ean", ean)
            .param("language", language.unwrap_or(DEFAULT_LOOKUP_LANGUAGE));
        self.fetch(&request)
            .and_then(|body| decoder::decode_single(&body))
    }

    /// Looks up a book by its ISBN.
    #[must_use]
    pub fn isbn_lookup(&self, isbn: &str) -> Option<ProductFull> {
        let request = ApiRequest::new(Operation::BarcodeLookup).param("isbn", isbn);
        self.fetch(&request)
            .and_then(|body| decoder::decode_single(&body))
    }

    /// Asks the service whether the barcode has a valid checksum.
    ///
    /// Returns `false` if the call fails.
    #[must_use]
    pub fn verify_checksum(&self, ean: &str) -> bool {
        let request = ApiRequest::new(Operation::VerifyChecksum).param("ean", ean);
        self.fetch(&request)
            .is_some_and(|body| decoder::decode_valid(&body))
    }

    /// Searches products by exact name.
    ///
    /// `language` defaults to [`Language::Any`], `page` to 0.
    #[must_use]
    pub fn product_search(
        &self,
        name: &str,
        language: Option<Language>,
        page: Option<u32>,
    ) -> Vec<Product> {
        let request =
            ApiRequest::new(Operation::ProductSearch).param("name", urlencoding::encode(name));
        self.search(request, language.unwrap_or(DEFAULT_SEARCH_LANGUAGE), page)
    }

    /// Searches products with names similar to `name`.
    ///
    /// `language` defaults to [`Language::Any`], `page` to 0.
    #[must_use]
    pub fn similar_product_search(
        &self,
        name: &str,
        language: Option<Language>,
        page: Option<u32>,
    ) -> Vec<Product> {
        let request = ApiRequest::new(Operation::SimilarProductSearch)
            .param("name", urlencoding::encode(name));
        self.search(request, language.unwrap_or(DEFAULT_SEARCH_LANGUAGE), page)
    }

    /// Searches products by name within a numeric category.
    ///
    /// `language` defaults to [`Language::Any`], `page` to 0.
    #[must_use]
    pub fn category_search(
        &self,
        category: u32,
        name: &str,
        language: Option<Language>,
        page: Option<u32>,
    ) -> Vec<Product> {
        let request = ApiRequest::new(Operation::CategorySearch)
            .param("category", category)
            .param("name", urlencoding::encode(name));
        self.search(request, language.unwrap_or(DEFAULT_SEARCH_LANGUAGE), page)
    }

    /// Lists products whose barcode starts with `prefix`.
    ///
    /// `language` defaults to [`Language::English`], `page` to 0.
    #[must_use]
    pub fn barcode_prefix_search(
        &self,
        prefix: &str,
        language: Option<Language>,
        page: Option<u32>,
    ) -> Vec<Product> {
        let request = ApiRequest::new(Operation::BarcodePrefixSearch).param("prefix", prefix);
        self.search(request, language.unwrap_or(DEFAULT_LOOKUP_LANGUAGE), page)
    }

    /// Returns the ISO code of the country that issued the barcode, or `""`.
    #[must_use]
    pub fn issuing_country_lookup(&self, ean: &str) -> String {
        let request = ApiRequest::new(Operation::IssuingCountry).param("ean", ean);
        self.fetch(&request)
            .and_then(|body| decoder::decode_leaf(&body, "issuingCountry"))
            .unwrap_or_default()
    }

    /// Returns the base64-encoded PNG of the barcode, or `""`.
    #[must_use]
    pub fn barcode_image(&self, ean: &str, width: u32, height: u32) -> String {
        let request = ApiRequest::new(Operation::BarcodeImage)
            .param("ean", ean)
            .param("width", width)
            .param("height", height);
        self.fetch(&request)
            .and_then(|body| decoder::decode_leaf(&body, "barcode"))
            .unwrap_or_default()
    }

    /// Returns the number of API credits left on the account.
    ///
    /// The count is taken from the `X-Credits-Remaining` header of any earlier
    /// call. If no call has reported it yet, one `account-status` request is
    /// made. Returns `-1` if the count is still unknown afterwards.
    #[must_use]
    pub fn credits_remaining(&self) -> i64 {
        let cached = self.executor.credits_remaining();
        if cached != UNKNOWN_CREDITS {
            return cached;
        }

        let request = ApiRequest::new(Operation::AccountStatus);
        if let Some(body) = self.fetch(&request) {
            if self.executor.credits_remaining() == UNKNOWN_CREDITS {
                let from_body = decoder::decode_leaf(&body, "creditsRemaining")
                    .and_then(|text| text.trim().parse::<i64>().ok());
                if let Some(credits) = from_body {
                    self.executor.record_credits(credits);
                }
            }
        }

        self.executor.credits_remaining()
    }

    /// Forgets the cached credit count.
    pub fn reset_credits(&self) {
        self.executor.reset_credits();
    }

    fn search(&self, request: ApiRequest, language: Language, page: Option<u32>) -> Vec<Product> {
        let request = request
            .param("language", language)
            .param("page", page.unwrap_or(0));
        self.fetch(&request)
            .map(|body| decoder::decode_list(&body))
            .unwrap_or_default()
    }

    fn fetch(&self, request: &ApiRequest) -> Option<String> {
        self.executor.call(request).ok()
    }
}
