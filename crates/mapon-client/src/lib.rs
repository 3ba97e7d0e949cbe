//! mapon-client - Typed client for the Mapon fleet-telematics REST API
//!
//! One async method per API endpoint. Each call encodes a typed request into
//! query parameters, sends a `GET` through a pluggable [`Transport`], checks
//! the status, and decodes the `{data, error}` envelope into the domain
//! records of [`mapon_core`].
//!
//! # Example
//!
//! ```rust,no_run
//! use chrono::{Duration, Utc};
//! use mapon_client::{ListIgnitionsRequest, MaponClient, UnitSeriesRequest};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = MaponClient::new("your-api-key")?;
//!
//!     let till = Utc::now();
//!     let request = ListIgnitionsRequest(UnitSeriesRequest::new(
//!         vec![12345],
//!         till - Duration::hours(24),
//!         till,
//!     ));
//!
//!     for unit in client.list_ignitions(&request).await? {
//!         println!("unit {}: {} ignitions", unit.unit_id, unit.ignitions.len());
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! # Errors
//!
//! Every failure comes back as a [`MaponClientError`] tagged with the
//! operation name, e.g. `mapon: list units: api error 1003: Access denied`.
//!
//! # Testing
//!
//! The [`testing`] module provides a [`TestServer`](testing::TestServer) that
//! serves canned envelopes over real HTTP, and a
//! [`StaticTransport`](testing::StaticTransport) for socket-free tests.

mod client;
mod config;
mod error;
mod request;
pub mod testing;
mod transport;

pub use client::MaponClient;
pub use config::{
    ClientConfig, DEFAULT_BASE_URL, DEFAULT_CONNECT_TIMEOUT, DEFAULT_RETRY_BACKOFF,
    DEFAULT_RETRY_COUNT, DEFAULT_TIMEOUT,
};
pub use error::{MaponClientError, Result};
pub use request::*;
pub use transport::{HttpRequest, HttpResponse, ReqwestTransport, Transport, TransportError};

// Re-export the domain model so callers need only one dependency
pub use mapon_core;
