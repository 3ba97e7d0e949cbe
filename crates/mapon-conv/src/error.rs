//! Error types for response decoding

use thiserror::Error;

/// Errors that can occur while decoding an API response
#[derive(Debug, Error)]
pub enum ConvError {
    /// The body was not valid JSON or did not match the endpoint schema
    #[error("decode {endpoint} response: {source}")]
    Decode {
        endpoint: &'static str,
        #[source]
        source: serde_json::Error,
    },

    /// The API answered with a populated `error` object
    #[error("api error {code}: {message}")]
    Api { code: i64, message: String },
}

impl ConvError {
    pub(crate) fn decode(endpoint: &'static str, source: serde_json::Error) -> Self {
        Self::Decode { endpoint, source }
    }

    /// Vendor error code, if this is an API error
    pub fn api_code(&self) -> Option<i64> {
        match self {
            Self::Api { code, .. } => Some(*code),
            Self::Decode { .. } => None,
        }
    }
}

/// Result type for decoding operations
pub type ConvResult<T> = Result<T, ConvError>;
