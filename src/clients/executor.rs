//! Request execution against the EAN-Search API.
//!
//! This module provides the [`RequestExecutor`], which turns an
//! [`ApiRequest`] into an authenticated URL, sends it through a
//! [`Transport`], retries rate-limited responses and tracks the account's
//! remaining credits.

use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use crate::clients::errors::ApiError;
use crate::clients::http_request::ApiRequest;
use crate::clients::http_response::RawResponse;
use crate::clients::transport::Transport;
use crate::config::{ApiHost, ApiToken, EanSearchConfig};

/// SDK version from Cargo.toml.
pub const SDK_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Credit counter value meaning "not known yet".
pub const UNKNOWN_CREDITS: i64 = -1;

/// Sends API requests and applies the retry policy.
///
/// The executor handles:
/// - URL construction: host, caller parameters in order, `token`, `format=json`
/// - A fixed `User-Agent` header
/// - Retrying HTTP 429 up to `max_retries` times
/// - Recording the `X-Credits-Remaining` header of every response
///
/// # Thread Safety
///
/// `RequestExecutor` is `Send + Sync`. The credit counter is a single atomic
/// with last-writer-wins semantics.
#[derive(Debug)]
pub struct RequestExecutor {
    transport: Arc<dyn Transport>,
    api_host: ApiHost,
    token: ApiToken,
    user_agent: String,
    max_retries: u32,
    retry_wait: Duration,
    max_retry_wait: Duration,
    credits: AtomicI64,
}

const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<RequestExecutor>();
};

impl RequestExecutor {
    /// Creates an executor from the configuration and a transport.
    #[must_use]
    pub fn new(config: &EanSearchConfig, transport: Arc<dyn Transport>) -> Self {
        let user_agent_prefix = config
            .user_agent_prefix()
            .map_or(String::new(), |prefix| format!("{prefix} | "));
        let user_agent = format!("{user_agent_prefix}rust-eansearch/{SDK_VERSION}");

        Self {
            transport,
            api_host: config.api_host().clone(),
            token: config.token().clone(),
            user_agent,
            max_retries: config.max_retries(),
            retry_wait: config.retry_wait(),
            max_retry_wait: config.max_retry_wait(),
            credits: AtomicI64::new(UNKNOWN_CREDITS),
        }
    }

    /// Returns the `User-Agent` sent with every request.
    #[must_use]
    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    /// Builds the full request URL.
    ///
    /// Parameter values are inserted verbatim.
    #[must_use]
    pub fn target_url(&self, request: &ApiRequest) -> String {
        self.url_with_token(request, self.token.as_ref())
    }

    fn url_with_token(&self, request: &ApiRequest, token: &str) -> String {
        format!(
            "{}?{}&token={token}&format=json",
            self.api_host.as_ref(),
            request.query()
        )
    }

    /// Sends the request and returns the response body of a 2xx answer.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if:
    /// - the transport fails (`Transport`, never retried)
    /// - the service answers with a non-2xx, non-429 status (`HttpStatus`)
    /// - every attempt is rate limited (`RateLimited`)
    pub fn call(&self, request: &ApiRequest) -> Result<String, ApiError> {
        let url = self.target_url(request);
        let log_url = self.url_with_token(request, "*****");

        let mut tries: u32 = 0;
        loop {
            tries += 1;
            tracing::debug!(url = %log_url, tries, "Sending EAN-Search request");

            let response = match self.transport.get(&url, &self.user_agent) {
                Ok(response) => response,
                Err(error) => {
                    tracing::warn!(op = %request.operation(), %error, "EAN-Search request failed");
                    return Err(error.into());
                }
            };

            if let Some(credits) = response.credits_remaining {
                self.record_credits(credits);
            }

            if response.is_ok() {
                return Ok(response.body);
            }

            if !response.is_rate_limited() {
                tracing::warn!(
                    op = %request.operation(),
                    code = response.code,
                    "EAN-Search request returned an error status"
                );
                return Err(ApiError::HttpStatus {
                    code: response.code,
                });
            }

            if tries > self.max_retries {
                tracing::warn!(
                    op = %request.operation(),
                    tries,
                    "EAN-Search request still rate limited, giving up"
                );
                return Err(ApiError::RateLimited { tries });
            }

            let delay = self.retry_delay(&response);
            tracing::warn!(
                op = %request.operation(),
                tries,
                ?delay,
                "EAN-Search request rate limited, retrying"
            );
            if !delay.is_zero() {
                std::thread::sleep(delay);
            }
        }
    }

    /// Chooses the wait before retrying a rate-limited response.
    ///
    /// `Retry-After` is honored up to `max_retry_wait`, including values too
    /// large for a `Duration`. Without the header `retry_wait` applies.
    fn retry_delay(&self, response: &RawResponse) -> Duration {
        match response.retry_after {
            Some(seconds) => Duration::try_from_secs_f64(seconds)
                .map_or(self.max_retry_wait, |delay| delay.min(self.max_retry_wait)),
            None => self.retry_wait,
        }
    }

    /// Returns the last observed credit count, or [`UNKNOWN_CREDITS`].
    #[must_use]
    pub fn credits_remaining(&self) -> i64 {
        self.credits.load(Ordering::Relaxed)
    }

    /// Stores a credit count observed from the service.
    pub fn record_credits(&self, credits: i64) {
        let previous = self.credits.swap(credits, Ordering::Relaxed);
        if previous != credits {
            tracing::trace!(previous, credits, "EAN-Search credits updated");
        }
    }

    /// Forgets the credit count so the next inquiry queries the service again.
    pub fn reset_credits(&self) {
        self.credits.store(UNKNOWN_CREDITS, Ordering::Relaxed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::http_request::Operation;
    use crate::clients::transport::testing::ScriptedTransport;

    fn config(max_retries: u32) -> EanSearchConfig {
        EanSearchConfig::builder()
            .token(ApiToken::new("secret").unwrap())
            .api_host(ApiHost::new("https://example.test/api").unwrap())
            .max_retries(max_retries)
            .retry_wait(Duration::ZERO)
            .max_retry_wait(Duration::ZERO)
            .build()
            .unwrap()
    }

    fn executor(transport: &Arc<ScriptedTransport>) -> RequestExecutor {
        RequestExecutor::new(&config(3), transport.clone())
    }

    fn rate_limited(retry_after: Option<&str>) -> RawResponse {
        let mut headers = std::collections::HashMap::new();
        if let Some(value) = retry_after {
            headers.insert("retry-after".to_string(), vec![value.to_string()]);
        }
        RawResponse::new(429, headers, String::new())
    }

    fn waiting_executor() -> RequestExecutor {
        let config = EanSearchConfig::builder()
            .token(ApiToken::new("secret").unwrap())
            .retry_wait(Duration::from_secs(2))
            .max_retry_wait(Duration::from_secs(30))
            .build()
            .unwrap();
        RequestExecutor::new(&config, Arc::new(ScriptedTransport::new()))
    }

    fn lookup() -> ApiRequest {
        ApiRequest::new(Operation::BarcodeLookup)
            .param("ean", "5099750442227")
            .param("language", 1)
    }

    #[test]
    fn test_target_url_appends_token_and_format_last() {
        let transport = Arc::new(ScriptedTransport::new());
        let url = executor(&transport).target_url(&lookup());

        assert_eq!(
            url,
            "https://example.test/api?op=barcode-lookup&ean=5099750442227&language=1&token=secret&format=json"
        );
    }

    #[test]
    fn test_success_returns_body_after_single_attempt() {
        let transport = Arc::new(ScriptedTransport::new().reply(200, r#"{"ean":"1"}"#));
        let body = executor(&transport).call(&lookup()).unwrap();

        assert_eq!(body, r#"{"ean":"1"}"#);
        assert_eq!(transport.calls(), 1);
    }

    #[test]
    fn test_user_agent_is_sent_on_every_attempt() {
        let transport = Arc::new(
            ScriptedTransport::new()
                .reply(429, "")
                .reply(200, "{}"),
        );
        let executor = executor(&transport);
        executor.call(&lookup()).unwrap();

        let agents = transport.user_agents();
        assert_eq!(agents.len(), 2);
        assert!(agents.iter().all(|agent| agent == executor.user_agent()));
        assert!(executor.user_agent().starts_with("rust-eansearch/"));
    }

    #[test]
    fn test_user_agent_prefix() {
        let config = EanSearchConfig::builder()
            .token(ApiToken::new("secret").unwrap())
            .user_agent_prefix("MyApp/2.0")
            .build()
            .unwrap();
        let executor = RequestExecutor::new(&config, Arc::new(ScriptedTransport::new()));

        assert!(executor.user_agent().starts_with("MyApp/2.0 | rust-eansearch/"));
    }

    #[test]
    fn test_rate_limit_then_success_is_retried() {
        let transport = Arc::new(
            ScriptedTransport::new()
                .reply(429, "")
                .reply(429, "")
                .reply(200, "ok"),
        );

        assert_eq!(executor(&transport).call(&lookup()).unwrap(), "ok");
        assert_eq!(transport.calls(), 3);
        let urls = transport.urls();
        assert!(urls.iter().all(|url| url == &urls[0]));
    }

    #[test]
    fn test_three_rate_limits_then_fourth_outcome_is_final() {
        let transport = Arc::new(
            ScriptedTransport::new()
                .reply(429, "")
                .reply(429, "")
                .reply(429, "")
                .reply(429, "")
                .reply(200, "never reached"),
        );

        let result = executor(&transport).call(&lookup());

        assert_eq!(result, Err(ApiError::RateLimited { tries: 4 }));
        assert_eq!(transport.calls(), 4);
    }

    #[test]
    fn test_fourth_attempt_error_status_is_returned() {
        let transport = Arc::new(
            ScriptedTransport::new()
                .reply(429, "")
                .reply(429, "")
                .reply(429, "")
                .reply(502, ""),
        );

        let result = executor(&transport).call(&lookup());

        assert_eq!(result, Err(ApiError::HttpStatus { code: 502 }));
        assert_eq!(transport.calls(), 4);
    }

    #[test]
    fn test_zero_retries_gives_up_after_first_rate_limit() {
        let transport = Arc::new(ScriptedTransport::new().reply(429, "").reply(200, "{}"));
        let executor = RequestExecutor::new(&config(0), transport.clone());

        assert_eq!(
            executor.call(&lookup()),
            Err(ApiError::RateLimited { tries: 1 })
        );
        assert_eq!(transport.calls(), 1);
    }

    #[test]
    fn test_other_error_status_is_not_retried() {
        for code in [400, 401, 403, 404, 500, 503] {
            let transport = Arc::new(ScriptedTransport::new().reply(code, "").reply(200, "{}"));

            let result = executor(&transport).call(&lookup());

            assert_eq!(result, Err(ApiError::HttpStatus { code }));
            assert_eq!(transport.calls(), 1);
        }
    }

    #[test]
    fn test_transport_failure_is_not_retried() {
        let transport = Arc::new(
            ScriptedTransport::new()
                .fail("connection refused")
                .reply(200, "{}"),
        );

        let result = executor(&transport).call(&lookup());

        assert!(matches!(result, Err(ApiError::Transport(_))));
        assert_eq!(transport.calls(), 1);
    }

    #[test]
    fn test_retry_delay_uses_retry_after_header() {
        let executor = waiting_executor();

        assert_eq!(
            executor.retry_delay(&rate_limited(Some("5"))),
            Duration::from_secs(5)
        );
        assert_eq!(
            executor.retry_delay(&rate_limited(Some("0.25"))),
            Duration::from_millis(250)
        );
    }

    #[test]
    fn test_retry_delay_falls_back_to_retry_wait() {
        let executor = waiting_executor();

        assert_eq!(executor.retry_delay(&rate_limited(None)), Duration::from_secs(2));
        assert_eq!(
            executor.retry_delay(&rate_limited(Some("soon"))),
            Duration::from_secs(2)
        );
        assert_eq!(
            executor.retry_delay(&rate_limited(Some("NaN"))),
            Duration::from_secs(2)
        );
    }

    #[test]
    fn test_retry_delay_is_capped() {
        let executor = waiting_executor();

        assert_eq!(
            executor.retry_delay(&rate_limited(Some("999999999"))),
            Duration::from_secs(30)
        );
        assert_eq!(
            executor.retry_delay(&rate_limited(Some("1e20"))),
            Duration::from_secs(30)
        );
    }

    #[test]
    fn test_oversized_retry_after_is_retried_without_panicking() {
        let transport = Arc::new(
            ScriptedTransport::new()
                .reply_with_headers(429, "", &[("Retry-After", "1e20")])
                .reply(200, "{}"),
        );

        assert_eq!(executor(&transport).call(&lookup()).unwrap(), "{}");
        assert_eq!(transport.calls(), 2);
    }

    #[test]
    fn test_credits_start_unknown() {
        let transport = Arc::new(ScriptedTransport::new());
        assert_eq!(executor(&transport).credits_remaining(), UNKNOWN_CREDITS);
    }

    #[test]
    fn test_credits_header_recorded_on_success() {
        let transport = Arc::new(ScriptedTransport::new().reply_with_headers(
            200,
            "{}",
            &[("X-Credits-Remaining", "500")],
        ));
        let executor = executor(&transport);

        executor.call(&lookup()).unwrap();

        assert_eq!(executor.credits_remaining(), 500);
    }

    #[test]
    fn test_credits_header_recorded_on_failure() {
        let transport = Arc::new(ScriptedTransport::new().reply_with_headers(
            403,
            "",
            &[("X-Credits-Remaining", "0")],
        ));
        let executor = executor(&transport);

        assert!(executor.call(&lookup()).is_err());
        assert_eq!(executor.credits_remaining(), 0);
    }

    #[test]
    fn test_latest_credits_header_wins() {
        let transport = Arc::new(
            ScriptedTransport::new()
                .reply_with_headers(429, "", &[("X-Credits-Remaining", "10")])
                .reply_with_headers(200, "{}", &[("X-Credits-Remaining", "9")]),
        );
        let executor = executor(&transport);

        executor.call(&lookup()).unwrap();

        assert_eq!(executor.credits_remaining(), 9);
    }

    #[test]
    fn test_response_without_header_keeps_credits() {
        let transport = Arc::new(ScriptedTransport::new().reply(200, "{}"));
        let executor = executor(&transport);
        executor.record_credits(77);

        executor.call(&lookup()).unwrap();

        assert_eq!(executor.credits_remaining(), 77);
    }

    #[test]
    fn test_reset_credits() {
        let transport = Arc::new(ScriptedTransport::new());
        let executor = executor(&transport);
        executor.record_credits(12);
        executor.reset_credits();

        assert_eq!(executor.credits_remaining(), UNKNOWN_CREDITS);
    }
}
