//! Building blocks shared by several models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A WGS84 position, optionally with a resolved street address
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}

impl Location {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
            address: None,
        }
    }

    pub fn with_address(mut self, address: Option<String>) -> Self {
        self.address = address;
        self
    }
}

/// A signal value together with the time it was measured.
///
/// Signals on a unit update independently of each other, so each one keeps
/// its own timestamp. A reading only exists when both halves are known.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reading<T> {
    pub value: T,
    pub time: DateTime<Utc>,
}

impl<T> Reading<T> {
    pub fn new(value: T, time: DateTime<Utc>) -> Self {
        Self { value, time }
    }

    /// Transform the value, keeping the measurement time
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Reading<U> {
        Reading {
            value: f(self.value),
            time: self.time,
        }
    }
}
