//! Test utilities for mapon-client
//!
//! [`TestServer`] runs a real HTTP server with canned API responses, and
//! [`StaticTransport`] answers without any socket at all.

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use axum::http::header;
use axum::routing::get;
use bytes::Bytes;
use reqwest::header::HeaderMap;
use serde_json::{json, Value};
use tokio::net::TcpListener;

use crate::transport::{HttpRequest, HttpResponse, Transport, TransportError};
use crate::{ClientConfig, MaponClient, MaponClientError, Result};

/// API key configured on test clients
pub const TEST_API_KEY: &str = "test-key";

/// Wrap a payload in a successful `{data, error}` envelope
pub fn envelope(data: Value) -> Value {
    json!({ "data": data, "error": null })
}

/// An envelope whose `error` object is populated
pub fn error_envelope(code: i64, msg: &str) -> Value {
    json!({ "data": null, "error": { "code": code, "msg": msg } })
}

/// Router answering `GET /<path>.json` with a fixed JSON body per path
pub fn canned_router<'a>(routes: impl IntoIterator<Item = (&'a str, Value)>) -> axum::Router {
    let mut router = axum::Router::new();
    for (path, body) in routes {
        let body = body.to_string();
        router = router.route(
            &format!("/{}.json", path),
            get(move || {
                let body = body.clone();
                async move { ([(header::CONTENT_TYPE, "application/json")], body) }
            }),
        );
    }
    router
}

/// A test server that automatically shuts down when dropped
pub struct TestServer {
    pub addr: SocketAddr,
    pub client: MaponClient,
    shutdown_tx: Option<tokio::sync::oneshot::Sender<()>>,
    handle: Option<tokio::task::JoinHandle<()>>,
}

impl TestServer {
    /// Serve `router` on an ephemeral port
    ///
    /// # Example
    ///
    /// ```ignore
    /// use mapon_client::testing::{canned_router, envelope, TestServer};
    ///
    /// let router = canned_router([("object/list", envelope(json!({"objects": []})))]);
    /// let server = TestServer::start(router).await?;
    /// let objects = server.client.list_objects().await?;
    /// ```
    pub async fn start(router: axum::Router) -> Result<Self> {
        Self::start_with_config(
            router,
            ClientConfig::new()
                .with_api_key(TEST_API_KEY)
                .with_timeout(Duration::from_secs(5))
                .with_connect_timeout(Duration::from_secs(2))
                .with_retry_count(0),
        )
        .await
    }

    /// Serve `router`; the client uses `config` with its base URL replaced
    pub async fn start_with_config(router: axum::Router, config: ClientConfig) -> Result<Self> {
        // Bind to any available port
        let listener = TcpListener::bind("127.0.0.1:0").await.map_err(io_error)?;
        let addr = listener.local_addr().map_err(io_error)?;

        let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel();

        let handle = tokio::spawn(async move {
            axum::serve(listener, router)
                .with_graceful_shutdown(async {
                    let _ = shutdown_rx.await;
                })
                .await
                .ok();
        });

        let client = MaponClient::with_config(config.with_base_url(format!("http://{}", addr)))?;

        Ok(Self {
            addr,
            client,
            shutdown_tx: Some(shutdown_tx),
            handle: Some(handle),
        })
    }

    /// Get the base URL of the test server
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Get a reference to the client
    pub fn client(&self) -> &MaponClient {
        &self.client
    }

    /// Shutdown the server gracefully
    pub async fn shutdown(mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
        if let Some(handle) = self.handle.take() {
            let _ = handle.await;
        }
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }
}

fn io_error(err: std::io::Error) -> MaponClientError {
    TransportError::Connect(err.to_string()).into()
}

/// [`Transport`] that returns one fixed response and records every request
#[derive(Debug, Default)]
pub struct StaticTransport {
    status: u16,
    body: Bytes,
    fail_with_timeout: bool,
    requests: Mutex<Vec<HttpRequest>>,
}

impl StaticTransport {
    pub fn new(status: u16, body: impl Into<Bytes>) -> Self {
        Self {
            status,
            body: body.into(),
            ..Self::default()
        }
    }

    /// Answer every request with `200` and the given JSON
    pub fn json(body: &Value) -> Self {
        Self::new(200, body.to_string())
    }

    /// Fail every request with [`TransportError::Timeout`]
    pub fn timing_out() -> Self {
        Self {
            fail_with_timeout: true,
            ..Self::default()
        }
    }

    /// Requests seen so far
    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    /// Client using this transport with [`TEST_API_KEY`]
    pub fn into_client(self) -> Result<(MaponClient, Arc<Self>)> {
        let transport = Arc::new(self);
        let config = ClientConfig::new().with_api_key(TEST_API_KEY);
        let client = MaponClient::with_transport(config, transport.clone())?;
        Ok((client, transport))
    }
}

#[async_trait]
impl Transport for StaticTransport {
    async fn send(&self, request: HttpRequest) -> std::result::Result<HttpResponse, TransportError> {
        self.requests
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(request);

        if self.fail_with_timeout {
            return Err(TransportError::Timeout);
        }
        Ok(HttpResponse {
            status: self.status,
            headers: HeaderMap::new(),
            body: self.body.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_format() {
        let addr: SocketAddr = "127.0.0.1:8080".parse().unwrap();
        let url = format!("http://{}", addr);
        assert_eq!(url, "http://127.0.0.1:8080");
    }

    #[test]
    fn test_error_envelope_shape() {
        let body = error_envelope(1003, "Access denied");
        assert_eq!(body["error"]["code"], 1003);
        assert!(body["data"].is_null());
    }
}
