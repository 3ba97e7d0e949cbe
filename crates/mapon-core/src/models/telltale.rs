//! Dashboard tell-tale (warning indicator) values

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// State of one FMS tell-tale at a point in time
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TellTaleValue {
    pub telltale_id: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub value: i32,
    /// Human readable meaning of `value` (e.g. "Red", "Off")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value_title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<DateTime<Utc>>,
}

/// Tell-tale history of one unit
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UnitTellTales {
    pub unit_id: i64,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub values: Vec<TellTaleValue>,
}
