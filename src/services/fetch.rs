//! Remote quote client
//!
//! One outbound GET per invocation, no retries and no caching; retry and
//! staleness policy belong to the aggregators. The trait seam lets tests
//! substitute a canned fetcher for the real HTTP client.

use crate::constants::FETCH_TIMEOUT;
use crate::error::{AppError, Result};
use async_trait::async_trait;
use reqwest::header::{ACCEPT, USER_AGENT};
use serde_json::Value;

/// Some upstreams reject requests without a browser-like user agent.
const BROWSER_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";

/// Fetch primitive injected into every aggregator.
#[async_trait]
pub trait JsonFetcher: Send + Sync {
    /// GET `url` and return the parsed JSON body.
    ///
    /// Errors: transport failure or timeout → [`AppError::Network`],
    /// non-2xx status → [`AppError::Upstream`], invalid JSON body →
    /// [`AppError::Parse`].
    async fn fetch_json(&self, url: &str) -> Result<Value>;
}

/// Production fetcher backed by a shared `reqwest` client with a bounded
/// per-request timeout.
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    pub fn new() -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(FETCH_TIMEOUT)
            .build()
            .map_err(|e| AppError::Network(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { client })
    }
}

#[async_trait]
impl JsonFetcher for HttpFetcher {
    async fn fetch_json(&self, url: &str) -> Result<Value> {
        let response = self
            .client
            .get(url)
            .header(ACCEPT, "application/json")
            .header(USER_AGENT, BROWSER_USER_AGENT)
            .send()
            .await
            .map_err(|e| AppError::Network(format!("Request to {} failed: {}", url, e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::Upstream {
                status: status.as_u16(),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| AppError::Network(format!("Failed to read response body: {}", e)))?;

        serde_json::from_str(&body)
            .map_err(|e| AppError::Parse(format!("Invalid JSON from {}: {}", url, e)))
    }
}
