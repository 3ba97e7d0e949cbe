//! Vehicle state snapshot

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Location, MovementStatus, Reading};

/// Telemetry of a unit at one instant.
///
/// Used both for the live state of a unit and for the start and end points
/// of a route. Every field is optional because the API only reports what
/// the installed hardware can measure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UnitState {
    /// Time of the last position update
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<Location>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub speed_kmh: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub direction_deg: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub odometer_m: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ignition_total_duration_s: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub movement_status: Option<MovementStatus>,
    /// When the current movement status started
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_time: Option<DateTime<Utc>>,
    /// How long the current movement status has lasted
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_s: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub debug_message: Option<String>,
    /// Fuel level in litres taken from the first litre-based fuel entry
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fuel_level_l: Option<f64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fuel_entries: Vec<FuelEntry>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub supply_voltage_v: Option<Reading<f64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub battery_voltage_v: Option<Reading<f64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ignition: Option<Reading<bool>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ambient_temperature_c: Option<Reading<f64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub altitude_m: Option<Reading<f64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub adblue_level_fraction: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub can: Option<CanState>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weights: Option<WeightState>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ev: Option<EvState>,
}

/// One entry of the fuel list; metrics include "L", "KG" and percentages
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FuelEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fuel_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metrics: Option<String>,
    pub value: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_update: Option<DateTime<Utc>>,
}

/// Metrics read from the vehicle CAN bus
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CanState {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub odometer_km: Option<Reading<f64>>,
    /// Fuel used over the lifetime of the vehicle
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_fuel_used_l: Option<Reading<f64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub engine_rpm: Option<Reading<f64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fuel_level_l: Option<Reading<f64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub engine_hours_h: Option<Reading<f64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service_brake_switch: Option<Reading<bool>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parking_brake_switch: Option<Reading<bool>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub engine_load_percent: Option<Reading<f64>>,
}

/// Weight sensors, with axle readings keyed by axle index
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WeightState {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gross_combination_weight_kg: Option<Reading<f64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub powered_weight_kg: Option<Reading<f64>>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub axis_weights_kg: BTreeMap<i32, Reading<f64>>,
}

/// Electric vehicle battery and charging state
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EvState {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub battery_soc_percent: Option<Reading<f64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub battery_soc_kwh: Option<Reading<f64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub charging: Option<Reading<bool>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub charger_connected: Option<Reading<bool>>,
}
