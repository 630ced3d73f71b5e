//! Raw HTTP responses as seen by the request executor.

use std::collections::HashMap;

/// Header carrying the number of API credits left on the account.
pub const CREDITS_REMAINING_HEADER: &str = "x-credits-remaining";

/// Header carrying the server's suggested wait before retrying.
pub const RETRY_AFTER_HEADER: &str = "retry-after";

/// An HTTP response with its body still undecoded.
///
/// Header names are stored lowercase; a header may have several values.
#[derive(Clone, Debug, PartialEq)]
pub struct RawResponse {
    /// The HTTP status code.
    pub code: u16,
    /// Response headers.
    pub headers: HashMap<String, Vec<String>>,
    /// The response body text.
    pub body: String,
    /// Remaining credits (from `X-Credits-Remaining`).
    pub credits_remaining: Option<i64>,
    /// Seconds to wait before retrying (from `Retry-After`).
    pub retry_after: Option<f64>,
}

impl RawResponse {
    /// Creates a response, parsing the headers the executor cares about.
    ///
    /// # Example
    ///
    /// ```rust
    /// use std::collections::HashMap;
    /// use ean_search::clients::RawResponse;
    ///
    /// let mut headers = HashMap::new();
    /// headers.insert("x-credits-remaining".to_string(), vec!["42".to_string()]);
    ///
    /// let response = RawResponse::new(200, headers, "{}".to_string());
    /// assert!(response.is_ok());
    /// assert_eq!(response.credits_remaining, Some(42));
    /// ```
    #[must_use]
    pub fn new(code: u16, headers: HashMap<String, Vec<String>>, body: String) -> Self {
        let credits_remaining = first_header(&headers, CREDITS_REMAINING_HEADER)
            .and_then(|value| value.trim().parse::<i64>().ok());

        let retry_after = first_header(&headers, RETRY_AFTER_HEADER)
            .and_then(|value| value.trim().parse::<f64>().ok())
            .filter(|seconds| seconds.is_finite() && *seconds >= 0.0);

        Self {
            code,
            headers,
            body,
            credits_remaining,
            retry_after,
        }
    }

    /// Returns `true` for a 2xx status.
    #[must_use]
    pub const fn is_ok(&self) -> bool {
        self.code >= 200 && self.code < 300
    }

    /// Returns `true` for HTTP 429.
    #[must_use]
    pub const fn is_rate_limited(&self) -> bool {
        self.code == 429
    }
}

fn first_header<'a>(headers: &'a HashMap<String, Vec<String>>, name: &str) -> Option<&'a str> {
    headers
        .get(name)
        .and_then(|values| values.first())
        .map(String::as_str)
}
