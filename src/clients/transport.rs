//! The network seam of the request executor.
//!
//! [`Transport`] performs one GET and reports either a [`RawResponse`] or a
//! [`TransportError`]. Retry policy, status classification and credit
//! tracking live in the executor, so a transport only moves bytes.

use std::collections::HashMap;
use std::fmt;
use std::time::Duration;

use crate::clients::errors::TransportError;
use crate::clients::http_response::RawResponse;
use crate::error::ConfigError;

/// Performs a single blocking HTTP GET.
///
/// Implementations must be `Send + Sync` so one client can be shared
/// across threads.
pub trait Transport: Send + Sync + fmt::Debug {
    /// Sends a GET to `url` with the given `User-Agent`.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError`] when no response could be obtained.
    fn get(&self, url: &str, user_agent: &str) -> Result<RawResponse, TransportError>;
}

/// [`Transport`] backed by a blocking `reqwest` client using rustls.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::blocking::Client,
}

impl ReqwestTransport {
    /// Creates a transport, optionally overriding the request timeout.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::TransportInit`] if the TLS backend cannot be
    /// initialized.
    pub fn new(timeout: Option<Duration>) -> Result<Self, ConfigError> {
        let mut builder = reqwest::blocking::Client::builder().use_rustls_tls();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(|error| ConfigError::TransportInit {
            reason: error.to_string(),
        })?;
        Ok(Self { client })
    }

    fn parse_response_headers(
        headers: &reqwest::header::HeaderMap,
    ) -> HashMap<String, Vec<String>> {
        let mut result: HashMap<String, Vec<String>> = HashMap::new();
        for (name, value) in headers {
            let key = name.as_str().to_lowercase();
            let value = value.to_str().unwrap_or_default().to_string();
            result.entry(key).or_default().push(value);
        }
        result
    }
}

impl Transport for ReqwestTransport {
    fn get(&self, url: &str, user_agent: &str) -> Result<RawResponse, TransportError> {
        let res = self
            .client
            .get(url)
            .header(reqwest::header::USER_AGENT, user_agent)
            .send()?;

        let code = res.status().as_u16();
        let headers = Self::parse_response_headers(res.headers());
        let body = res.text()?;

        Ok(RawResponse::new(code, headers, body))
    }
}

#[cfg(test)]
pub(crate) mod testing {
    //! Scripted transport for exercising the executor without a network.

    use std::collections::{HashMap, VecDeque};
    use std::sync::Mutex;

    use super::{RawResponse, Transport, TransportError};

    type Reply = Result<RawResponse, TransportError>;

    /// Replays queued replies in order and records every request.
    #[derive(Debug, Default)]
    pub struct ScriptedTransport {
        replies: Mutex<VecDeque<Reply>>,
        requests: Mutex<Vec<(String, String)>>,
    }

    impl ScriptedTransport {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn reply(self, code: u16, body: &str) -> Self {
            self.reply_with_headers(code, body, &[])
        }

        pub fn reply_with_headers(self, code: u16, body: &str, headers: &[(&str, &str)]) -> Self {
            let headers: HashMap<String, Vec<String>> = headers
                .iter()
                .map(|(name, value)| (name.to_lowercase(), vec![(*value).to_string()]))
                .collect();
            self.replies
                .lock()
                .unwrap()
                .push_back(Ok(RawResponse::new(code, headers, body.to_string())));
            self
        }

        pub fn fail(self, message: &str) -> Self {
            self.replies
                .lock()
                .unwrap()
                .push_back(Err(TransportError::new(message)));
            self
        }

        pub fn calls(&self) -> usize {
            self.requests.lock().unwrap().len()
        }

        pub fn urls(&self) -> Vec<String> {
            self.requests
                .lock()
                .unwrap()
                .iter()
                .map(|(url, _)| url.clone())
                .collect()
        }

        pub fn user_agents(&self) -> Vec<String> {
            self.requests
                .lock()
                .unwrap()
                .iter()
                .map(|(_, agent)| agent.clone())
                .collect()
        }
    }

    impl Transport for ScriptedTransport {
        fn get(&self, url: &str, user_agent: &str) -> Result<RawResponse, TransportError> {
            self.requests
                .lock()
                .unwrap()
                .push((url.to_string(), user_agent.to_string()));
            self.replies
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Err(TransportError::new("script exhausted")))
        }
    }
}
