//! HTTP transport seam
//!
//! [`MaponClient`](crate::MaponClient) never talks to the network directly:
//! it hands a fully formed [`HttpRequest`] to a [`Transport`] and gets back
//! status, headers and body bytes. [`ReqwestTransport`] is the production
//! implementation and owns timeouts and retries.

use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::header::HeaderMap;
use reqwest::{Client, Method};
use thiserror::Error;
use tracing::warn;
use url::Url;

use crate::config::ClientConfig;
use crate::error::{MaponClientError, Result};

/// Transport-level failure: no usable response was received
#[derive(Error, Debug)]
pub enum TransportError {
    #[error("request timed out")]
    Timeout,

    #[error("connection failed: {0}")]
    Connect(String),

    #[error("request failed: {0}")]
    Request(#[source] reqwest::Error),
}

impl TransportError {
    /// Whether another attempt might succeed
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Timeout | Self::Connect(_))
    }
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else if err.is_connect() {
            Self::Connect(err.to_string())
        } else {
            Self::Request(err)
        }
    }
}

/// A request ready to go on the wire
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub method: Method,
    /// Full URL including the query string
    pub url: Url,
    pub headers: HeaderMap,
}

impl HttpRequest {
    pub fn get(url: Url) -> Self {
        Self {
            method: Method::GET,
            url,
            headers: HeaderMap::new(),
        }
    }
}

/// A response as received, body not yet decoded
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: HeaderMap,
    pub body: Bytes,
}

/// Sends a request and returns the raw response
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: HttpRequest) -> std::result::Result<HttpResponse, TransportError>;
}

/// Statuses worth another attempt
fn is_retryable_status(status: u16) -> bool {
    matches!(status, 429 | 500 | 502 | 503 | 504)
}

/// [`Transport`] backed by a pooled `reqwest` client
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
    retry_count: u32,
    retry_backoff: Duration,
}

impl ReqwestTransport {
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| MaponClientError::InvalidConfig(format!("build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            retry_count: config.retry_count,
            retry_backoff: config.retry_backoff,
        })
    }

    async fn send_once(
        &self,
        request: &HttpRequest,
    ) -> std::result::Result<HttpResponse, TransportError> {
        let response = self
            .client
            .request(request.method.clone(), request.url.clone())
            .headers(request.headers.clone())
            .send()
            .await?;

        let status = response.status().as_u16();
        let headers = response.headers().clone();
        let body = response.bytes().await?;

        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn send(&self, request: HttpRequest) -> std::result::Result<HttpResponse, TransportError> {
        let mut backoff = self.retry_backoff;
        let mut attempt = 0;

        loop {
            match self.send_once(&request).await {
                Ok(response)
                    if attempt < self.retry_count && is_retryable_status(response.status) =>
                {
                    warn!(
                        status = response.status,
                        attempt = attempt + 1,
                        "Retrying request in {:?}",
                        backoff
                    );
                }
                Ok(response) => return Ok(response),
                Err(e) if attempt < self.retry_count && e.is_retryable() => {
                    warn!(error = %e, attempt = attempt + 1, "Retrying request in {:?}", backoff);
                }
                Err(e) => return Err(e),
            }

            tokio::time::sleep(backoff).await;
            backoff = backoff.saturating_mul(2);
            attempt += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retryable_statuses() {
        assert!(is_retryable_status(503));
        assert!(is_retryable_status(429));
        assert!(!is_retryable_status(200));
        assert!(!is_retryable_status(404));
        assert!(!is_retryable_status(401));
    }

    #[test]
    fn test_retryable_errors() {
        assert!(TransportError::Timeout.is_retryable());
        assert!(TransportError::Connect("refused".to_string()).is_retryable());
    }

    #[test]
    fn test_transport_builds_from_default_config() {
        assert!(ReqwestTransport::new(&ClientConfig::default()).is_ok());
    }
}
