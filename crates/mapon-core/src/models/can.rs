//! CAN bus telemetry models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One sample of a CAN metric
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CanMetricValue {
    pub value: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<DateTime<Utc>>,
}

/// One sample of an axle/wheel weight sensor
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AxisWeightMetricValue {
    pub value_kg: f64,
    pub axis_id: i32,
    pub wheel_id: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<DateTime<Utc>>,
}

/// CAN values of a unit at a requested instant
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CanDataPoint {
    pub unit_id: i64,
    /// The instant the values were requested for
    pub time: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rpm_average: Option<CanMetricValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rpm_max: Option<CanMetricValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fuel_level_percent: Option<CanMetricValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_distance_km: Option<CanMetricValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_fuel_l: Option<CanMetricValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_engine_hours: Option<CanMetricValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ambient_temperature_c: Option<CanMetricValue>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub axis_weights: Vec<AxisWeightMetricValue>,
}

/// CAN series of a unit over a time period
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UnitCanPeriod {
    pub unit_id: i64,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub rpm_average: Vec<CanMetricValue>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub rpm_max: Vec<CanMetricValue>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fuel_level_percent: Vec<CanMetricValue>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub service_distance_km: Vec<CanMetricValue>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub total_distance_km: Vec<CanMetricValue>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub total_fuel_l: Vec<CanMetricValue>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub total_engine_hours: Vec<CanMetricValue>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub ambient_temperature_c: Vec<CanMetricValue>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub weight_on_chassis_total_kg: Vec<CanMetricValue>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub weight_on_axis: Vec<AxisWeightMetricValue>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub ev_battery_rel_percent: Vec<CanMetricValue>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub ev_battery_abs_kwh: Vec<CanMetricValue>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub ev_charging: Vec<CanMetricValue>,
}
