//! Event and sensor time series reported per unit

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Location;

// =============================================================================
// Ignition
// =============================================================================

/// Ignition on/off interval; `off_time` is absent while the ignition is on
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IgnitionEvent {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub on_time: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub off_time: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UnitIgnitions {
    pub unit_id: i64,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub ignitions: Vec<IgnitionEvent>,
}

// =============================================================================
// Digital inputs
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DigitalInputEvent {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub on_time: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub off_time: Option<DateTime<Utc>>,
}

/// Activations of one numbered digital input
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DigitalInput {
    pub input_number: i32,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub events: Vec<DigitalInputEvent>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UnitDigitalInputs {
    pub unit_id: i64,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub inputs: Vec<DigitalInput>,
}

/// Digital input activation with the places it started and ended
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DigitalInputExtendedEvent {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub on_time: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub off_time: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub on_location: Option<Location>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub off_location: Option<Location>,
    /// Distance driven while the input was active
    pub distance_m: i64,
    pub driver_id: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DigitalInputExtended {
    pub input_id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub events: Vec<DigitalInputExtendedEvent>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UnitDigitalInputsExtended {
    pub unit_id: i64,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub inputs: Vec<DigitalInputExtended>,
}

// =============================================================================
// Temperature / humidity
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TemperatureRecord {
    pub value_c: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TemperatureSensor {
    pub sensor_number: i32,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub records: Vec<TemperatureRecord>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UnitTemperatures {
    pub unit_id: i64,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sensors: Vec<TemperatureSensor>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HumidityRecord {
    pub value_percent: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HumiditySensor {
    pub sensor_number: i32,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub records: Vec<HumidityRecord>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UnitHumidity {
    pub unit_id: i64,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sensors: Vec<HumiditySensor>,
}

// =============================================================================
// iButton
// =============================================================================

/// An identification key presented to the reader
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IbuttonEvent {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UnitIbuttons {
    pub unit_id: i64,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub ibuttons: Vec<IbuttonEvent>,
}
