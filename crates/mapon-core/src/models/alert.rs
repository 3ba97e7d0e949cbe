//! Alert models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Location;

/// An alert raised by one of the account's alert rules
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Alert {
    pub alert_id: i64,
    pub unit_id: i64,
    pub driver_id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alert_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// The triggering value exactly as the API reported it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value_raw: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<Location>,
}
