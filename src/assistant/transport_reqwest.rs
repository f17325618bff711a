//! Real HTTP transport using reqwest
//!
//! Asynchronous client for the contract backend.

use crate::assistant::transport_types::{
    AsyncTransport, NetworkCause, RawResponse, TransportFailure,
};
use async_trait::async_trait;
use serde_json::Value as JsonValue;
use std::error::Error as StdError;
use std::time::Duration;

/// Default request timeout (the backend gives analysis 60s)
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Real HTTP transport using reqwest
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
    timeout: Duration,
}

impl ReqwestTransport {
    /// Create new transport with default timeout (60s)
    pub fn new() -> Result<Self, reqwest::Error> {
        Self::with_timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }

    /// Create transport with custom timeout
    pub fn with_timeout(timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .connect_timeout(timeout)
            .build()?;
        Ok(Self { client, timeout })
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

#[async_trait]
impl AsyncTransport for ReqwestTransport {
    async fn post_json(&self, url: &str, body: &JsonValue) -> Result<RawResponse, TransportFailure> {
        tracing::debug!(url, timeout_secs = self.timeout.as_secs(), "POST");

        let response = self
            .client
            .post(url)
            .header("Content-Type", "application/json")
            .json(body)
            .send()
            .await
            .map_err(TransportFailure::from)?;

        let status = response.status();
        tracing::debug!(url, status = status.as_u16(), "response received");

        // A body that cannot be read still counts as a received response
        let text = match response.text().await {
            Ok(text) => text,
            Err(e) if e.is_timeout() => return Err(TransportFailure::from(e)),
            Err(e) => {
                tracing::debug!(error = %e, "failed to read response body");
                String::new()
            }
        };

        Ok(RawResponse {
            status: status.as_u16(),
            reason: status.canonical_reason().map(str::to_string),
            body: text,
        })
    }
}

impl From<reqwest::Error> for TransportFailure {
    fn from(err: reqwest::Error) -> Self {
        let cause = if err.is_timeout() {
            NetworkCause::Timeout
        } else if is_dns_failure(&err) {
            NetworkCause::Dns
        } else if err.is_connect() {
            NetworkCause::Connect
        } else {
            NetworkCause::Other
        };
        TransportFailure::network(cause, err.to_string())
    }
}

/// Walk the source chain looking for a resolver failure
fn is_dns_failure(err: &reqwest::Error) -> bool {
    let mut source = err.source();
    while let Some(inner) = source {
        let text = inner.to_string().to_ascii_lowercase();
        if text.contains("dns error") || text.contains("failed to lookup address") {
            return true;
        }
        source = inner.source();
    }
    false
}
