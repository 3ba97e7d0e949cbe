//! Error types for the Mapon client

use mapon_conv::ConvError;
use thiserror::Error;

use crate::transport::TransportError;

/// Result type for client operations
pub type Result<T> = std::result::Result<T, MaponClientError>;

/// Errors that can occur when talking to the Mapon API
#[derive(Error, Debug)]
pub enum MaponClientError {
    /// The request never produced a response
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// The server answered with something other than 200
    #[error("unexpected HTTP status {status}: {body}")]
    HttpStatus { status: u16, body: String },

    /// The response envelope carried a populated `error` object
    #[error("api error {code}: {message}")]
    Api { code: i64, message: String },

    /// The body did not match the endpoint schema
    #[error("decode {endpoint} response: {message}")]
    Decode {
        endpoint: &'static str,
        message: String,
    },

    #[error("invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Any of the above, tagged with the endpoint operation that failed
    #[error("mapon: {operation}: {source}")]
    Operation {
        operation: &'static str,
        #[source]
        source: Box<MaponClientError>,
    },
}

impl MaponClientError {
    /// Tag this error with the name of the failing operation
    pub(crate) fn in_operation(self, operation: &'static str) -> Self {
        Self::Operation {
            operation,
            source: Box::new(self),
        }
    }

    /// The error underneath any operation tags
    pub fn root(&self) -> &Self {
        match self {
            Self::Operation { source, .. } => source.root(),
            other => other,
        }
    }

    /// Vendor error code, if the API rejected the request
    pub fn api_code(&self) -> Option<i64> {
        match self.root() {
            Self::Api { code, .. } => Some(*code),
            _ => None,
        }
    }

    /// HTTP status, if the server answered with a non-200 response
    pub fn http_status(&self) -> Option<u16> {
        match self.root() {
            Self::HttpStatus { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Operation name attached to this error, if any
    pub fn operation(&self) -> Option<&'static str> {
        match self {
            Self::Operation { operation, .. } => Some(operation),
            _ => None,
        }
    }
}

impl From<ConvError> for MaponClientError {
    fn from(err: ConvError) -> Self {
        match err {
            ConvError::Api { code, message } => Self::Api { code, message },
            ConvError::Decode { endpoint, source } => Self::Decode {
                endpoint,
                message: source.to_string(),
            },
        }
    }
}
