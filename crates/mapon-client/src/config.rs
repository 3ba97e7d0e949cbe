//! Client configuration

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{MaponClientError, Result};

/// Default base URL of the Mapon API
pub const DEFAULT_BASE_URL: &str = "https://mapon.com/api/v1";
/// Default request timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
/// Default connection timeout
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);
/// Default number of retries after the first attempt
pub const DEFAULT_RETRY_COUNT: u32 = 3;
/// Delay before the first retry; doubled for each further one
pub const DEFAULT_RETRY_BACKOFF: Duration = Duration::from_millis(200);

/// Configuration for a [`MaponClient`](crate::MaponClient)
#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    pub base_url: String,
    pub api_key: Option<String>,
    #[serde(with = "duration_secs")]
    pub timeout: Duration,
    #[serde(with = "duration_secs")]
    pub connect_timeout: Duration,
    pub retry_count: u32,
    #[serde(with = "duration_millis")]
    pub retry_backoff: Duration,
    /// Log full response bodies at debug level
    pub debug: bool,
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: None,
            timeout: DEFAULT_TIMEOUT,
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
            retry_count: DEFAULT_RETRY_COUNT,
            retry_backoff: DEFAULT_RETRY_BACKOFF,
            debug: false,
            user_agent: concat!("mapon-rs/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("timeout", &self.timeout)
            .field("connect_timeout", &self.connect_timeout)
            .field("retry_count", &self.retry_count)
            .field("retry_backoff", &self.retry_backoff)
            .field("debug", &self.debug)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}

impl ClientConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_connect_timeout(mut self, connect_timeout: Duration) -> Self {
        self.connect_timeout = connect_timeout;
        self
    }

    /// Number of retries after the first attempt; 0 disables retrying
    pub fn with_retry_count(mut self, retry_count: u32) -> Self {
        self.retry_count = retry_count;
        self
    }

    pub fn with_retry_backoff(mut self, retry_backoff: Duration) -> Self {
        self.retry_backoff = retry_backoff;
        self
    }

    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Check the settings and return the parsed base URL
    pub fn validate(&self) -> Result<Url> {
        let url = Url::parse(self.base_url.trim_end_matches('/'))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(MaponClientError::InvalidConfig(format!(
                "base URL must use http or https, got '{}'",
                url.scheme()
            )));
        }
        if self.timeout.is_zero() {
            return Err(MaponClientError::InvalidConfig(
                "timeout must be greater than zero".to_string(),
            ));
        }
        if matches!(&self.api_key, Some(key) if key.trim().is_empty()) {
            return Err(MaponClientError::InvalidConfig(
                "API key must not be empty".to_string(),
            ));
        }
        Ok(url)
    }
}

/// Build `<base>/<path>.json`
pub(crate) fn endpoint_url(base: &Url, path: &str) -> Result<Url> {
    let url = format!("{}/{}.json", base.as_str().trim_end_matches('/'), path);
    Ok(Url::parse(&url)?)
}

mod duration_secs {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(value.as_secs())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        u64::deserialize(deserializer).map(Duration::from_secs)
    }
}

mod duration_millis {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(value.as_millis() as u64)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        u64::deserialize(deserializer).map(Duration::from_millis)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ClientConfig::default();
        assert_eq!(config.base_url, "https://mapon.com/api/v1");
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert_eq!(config.connect_timeout, Duration::from_secs(10));
        assert_eq!(config.retry_count, 3);
        assert_eq!(config.retry_backoff, Duration::from_millis(200));
        assert!(config.user_agent.starts_with("mapon-rs/"));
        assert!(config.api_key.is_none());
    }

    #[test]
    fn test_debug_redacts_key() {
        let config = ClientConfig::new().with_api_key("secret-key");
        let printed = format!("{:?}", config);
        assert!(!printed.contains("secret-key"));
        assert!(printed.contains("<redacted>"));
    }

    #[test]
    fn test_validate_rejects_bad_scheme() {
        let config = ClientConfig::new().with_base_url("ftp://mapon.com/api/v1");
        assert!(matches!(
            config.validate(),
            Err(MaponClientError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_validate_rejects_garbage_url() {
        let config = ClientConfig::new().with_base_url("not a url");
        assert!(matches!(
            config.validate(),
            Err(MaponClientError::InvalidUrl(_))
        ));
    }

    #[test]
    fn test_validate_rejects_blank_key() {
        let config = ClientConfig::new().with_api_key("  ");
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_endpoint_url_handles_trailing_slash() {
        let base = Url::parse("https://mapon.com/api/v1/").unwrap();
        let url = endpoint_url(&base, "unit_data/can_point").unwrap();
        assert_eq!(url.as_str(), "https://mapon.com/api/v1/unit_data/can_point.json");
    }

    #[test]
    fn test_deserialize_partial() {
        let config: ClientConfig =
            serde_json::from_str(r#"{"base_url":"http://localhost:9000","timeout":5}"#).unwrap();
        assert_eq!(config.base_url, "http://localhost:9000");
        assert_eq!(config.timeout, Duration::from_secs(5));
        assert_eq!(config.retry_count, DEFAULT_RETRY_COUNT);
    }
}
