//! Device diagnostics, driving time, custom fields and history lookups

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{CanMetricValue, Location};

/// Tracking device health as reported by the debug endpoint
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UnitDebugInfo {
    pub unit_id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_location: Option<Location>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_location_time: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fw_version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_tacho_test: Option<DateTime<Utc>>,
    /// Last time a tachograph card was identified
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_tacho_id: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub can_total_distance_km: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gps_status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gps_status_time: Option<DateTime<Utc>>,
}

/// Driving and remaining driving time within one regulation window
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrivingPeriod {
    pub driving_s: i64,
    pub driving_remaining_s: i64,
}

/// Tachograph driving time summary for one driver of a unit
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DrivingTime {
    pub driver_id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_state: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub driver_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub driver_surname: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub now: Option<DrivingPeriod>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub today: Option<DrivingPeriod>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub week: Option<DrivingPeriod>,
}

/// A custom field value configured on a unit
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitField {
    pub key: String,
    pub value: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitFields {
    pub unit_id: i64,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<UnitField>,
}

/// Unit position and counters at a past instant
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UnitHistoryPoint {
    pub unit_id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub can_total_distance: Option<CanMetricValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mileage: Option<CanMetricValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<Location>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position_time: Option<DateTime<Utc>>,
}
