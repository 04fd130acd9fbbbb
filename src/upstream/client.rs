//! Outbound JSON transport for talking to upstream addons.

use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::{Client, Response, redirect};
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

use crate::config::UpstreamConfig;

const MAX_REDIRECTS: usize = 10;

#[derive(Debug, Error)]
pub enum UpstreamError {
    #[error("failed to build HTTP client: {0}")]
    ClientBuild(String),
    #[error("connection failed: {0}")]
    Connect(String),
    #[error("request timed out")]
    Timeout,
    #[error("request failed: {0}")]
    Request(String),
    #[error("upstream answered status {0}")]
    Status(u16),
    #[error("upstream body is not JSON: {0}")]
    InvalidBody(String),
}

/// Fetch-JSON seam the aggregation core is written against. Production uses
/// [`HttpFetcher`]; tests substitute scripted implementations.
#[async_trait]
pub trait UpstreamFetch: Send + Sync {
    /// GET `url` and parse the body as JSON.
    async fn get_json(&self, url: &str) -> Result<Value, UpstreamError>;

    /// POST `body` to `url` as `application/json` and parse the response.
    async fn post_json(&self, url: &str, body: Bytes) -> Result<Value, UpstreamError>;
}

/// reqwest-backed [`UpstreamFetch`] shared by discovery and dispatch.
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(config: &UpstreamConfig) -> Result<Self, UpstreamError> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .user_agent(&config.user_agent)
            .redirect(redirect::Policy::limited(MAX_REDIRECTS))
            .build()
            .map_err(|e| UpstreamError::ClientBuild(e.to_string()))?;
        Ok(Self { client })
    }

    async fn read_json(response: Response) -> Result<Value, UpstreamError> {
        let status = response.status();
        if !status.is_success() {
            return Err(UpstreamError::Status(status.as_u16()));
        }
        let body = response
            .bytes()
            .await
            .map_err(|e| UpstreamError::Request(e.to_string()))?;
        serde_json::from_slice(&body).map_err(|e| UpstreamError::InvalidBody(e.to_string()))
    }
}

#[async_trait]
impl UpstreamFetch for HttpFetcher {
    async fn get_json(&self, url: &str) -> Result<Value, UpstreamError> {
        debug!(url, "upstream GET");
        let response = self.client.get(url).send().await.map_err(send_error)?;
        Self::read_json(response).await
    }

    async fn post_json(&self, url: &str, body: Bytes) -> Result<Value, UpstreamError> {
        debug!(url, "upstream POST");
        let response = self
            .client
            .post(url)
            .header(
                reqwest::header::CONTENT_TYPE,
                mime::APPLICATION_JSON.as_ref(),
            )
            .body(body)
            .send()
            .await
            .map_err(send_error)?;
        Self::read_json(response).await
    }
}

fn send_error(err: reqwest::Error) -> UpstreamError {
    if err.is_timeout() {
        UpstreamError::Timeout
    } else if err.is_connect() {
        UpstreamError::Connect(err.to_string())
    } else {
        UpstreamError::Request(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::UpstreamConfig;

    #[test]
    fn test_builds_client_from_config() {
        let config = UpstreamConfig {
            connect_timeout_secs: 5,
            request_timeout_secs: 20,
            user_agent: "AddonHub-test".to_string(),
        };
        assert!(HttpFetcher::new(&config).is_ok());
    }
}
