//! Unit (vehicle/asset) models

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Driver, FuelType, Location, UnitState, UnitType};

/// A tracked vehicle or asset
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Unit {
    pub unit_id: i64,
    pub company_id: i64,
    pub box_id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// Registration plate number
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shortcut: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vehicle_title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub car_reg_certificate: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reg_country: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vin: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit_type: Option<UnitType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fuel_type: Option<FuelType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub device: Option<Device>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avg_fuel_consumption: Option<FuelConsumption>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fuel_tank: Option<FuelTank>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub technical_details: Option<TechnicalDetails>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub movement_state: Option<MovementState>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub connected: Option<ConnectedTrailer>,
    /// Geofence objects the unit is currently inside
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub in_objects: Vec<ObjectLocation>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub saved_values: Vec<SavedValue>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub drivers: Vec<Driver>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub relays: Vec<Relay>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reefer: Option<Reefer>,
    pub state: UnitState,
}

/// Tracking device installed in a unit
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Device {
    pub device_id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub serial_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub imei: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sim: Option<String>,
}

/// Average fuel consumption norm
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FuelConsumption {
    pub norm: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub measurement: Option<String>,
}

/// Fuel tank capacities
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FuelTank {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_vol_l: Option<f64>,
    /// Capacity per tank, keyed by tank index
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub tank_volumes_l: BTreeMap<i32, f64>,
}

/// Registration and engine details
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TechnicalDetails {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stage_classification: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emission_class: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gross_weight_kg: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub make_year: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub make_month: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub power_ps: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub power_kw: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cubic_capacity_l: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub co2_emissions: Option<Co2Emissions>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Co2Emissions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metrics: Option<String>,
}

/// Movement state as tracked separately from the ignition-based state
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MovementState {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start: Option<DateTime<Utc>>,
    pub duration_s: i64,
}

/// Trailer currently coupled to the unit
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConnectedTrailer {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trailer_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<Location>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ObjectLocation {
    pub object_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// A value the device stored under a key (e.g. last entered odometer)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SavedValue {
    pub key: String,
    pub value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<DateTime<Utc>>,
}

/// Remote-controlled relay output
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Relay {
    pub relay_id: i32,
    pub relay_state: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relay_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub inverted: bool,
    pub control_while_moving: bool,
    pub enabled: bool,
}

/// Refrigeration unit on a reefer trailer
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Reefer {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refrigerator_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub compartment_count: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub communication_type: Option<String>,
}
