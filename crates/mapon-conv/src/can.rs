//! `unit_data/can_point` and `unit_data/can_period` response schemas

use chrono::{DateTime, Utc};
use mapon_core::{AxisWeightMetricValue, CanDataPoint, CanMetricValue, UnitCanPeriod};
use serde::Deserialize;

use crate::de::{nullable, UnitsData};
use crate::envelope::decode_envelope;
use crate::error::ConvResult;
use crate::scalar::JsonScalar;
use crate::time::parse_local;

pub const POINT_ENDPOINT: &str = "unit_data/can_point";
pub const PERIOD_ENDPOINT: &str = "unit_data/can_period";

/// Decode a `unit_data/can_point` response body.
///
/// The response does not echo the requested instant, so every point is
/// stamped with `datetime`.
pub fn parse_can_point_response(
    body: &[u8],
    datetime: DateTime<Utc>,
) -> ConvResult<Vec<CanDataPoint>> {
    let data: UnitsData<WireCanPoint> = decode_envelope(POINT_ENDPOINT, body)?;
    Ok(data
        .units
        .into_iter()
        .map(|u| map_point(u, datetime))
        .collect())
}

pub fn parse_can_period_response(body: &[u8]) -> ConvResult<Vec<UnitCanPeriod>> {
    let data: UnitsData<WireCanPeriod> = decode_envelope(PERIOD_ENDPOINT, body)?;
    Ok(data.units.into_iter().map(map_period).collect())
}

// =============================================================================
// Wire schema
// =============================================================================

/// A CAN metric sample: `{"gmt": "...", "value": <number or string>}`
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct WireCanValue {
    gmt: Option<String>,
    value: Option<JsonScalar>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct WireAxisWeight {
    gmt: Option<String>,
    value: Option<JsonScalar>,
    #[serde(deserialize_with = "nullable")]
    axis: i32,
    #[serde(deserialize_with = "nullable")]
    wheel: i32,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct WireCanPoint {
    #[serde(deserialize_with = "nullable")]
    unit_id: i64,
    rpm_average: Option<WireCanValue>,
    rpm_max: Option<WireCanValue>,
    fuel_level: Option<WireCanValue>,
    total_distance: Option<WireCanValue>,
    total_fuel: Option<WireCanValue>,
    total_engine_hours: Option<WireCanValue>,
    ambient_temperature: Option<WireCanValue>,
    #[serde(deserialize_with = "nullable")]
    weight_on_axis: Vec<WireAxisWeight>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct WireCanPeriod {
    #[serde(deserialize_with = "nullable")]
    unit_id: i64,
    #[serde(deserialize_with = "nullable")]
    rpm_average: Vec<WireCanValue>,
    #[serde(deserialize_with = "nullable")]
    rpm_max: Vec<WireCanValue>,
    #[serde(deserialize_with = "nullable")]
    fuel_level: Vec<WireCanValue>,
    #[serde(deserialize_with = "nullable")]
    service_distance: Vec<WireCanValue>,
    #[serde(deserialize_with = "nullable")]
    total_distance: Vec<WireCanValue>,
    #[serde(deserialize_with = "nullable")]
    total_fuel: Vec<WireCanValue>,
    #[serde(deserialize_with = "nullable")]
    total_engine_hours: Vec<WireCanValue>,
    #[serde(deserialize_with = "nullable")]
    ambient_temperature: Vec<WireCanValue>,
    #[serde(deserialize_with = "nullable")]
    weight_on_chassis_total: Vec<WireCanValue>,
    #[serde(deserialize_with = "nullable")]
    weight_on_axis: Vec<WireAxisWeight>,
    ev_values: Option<WireEvSeries>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct WireEvSeries {
    #[serde(deserialize_with = "nullable")]
    can_ev_battery_rel: Vec<WireCanValue>,
    #[serde(deserialize_with = "nullable")]
    can_ev_battery_abs: Vec<WireCanValue>,
    #[serde(deserialize_with = "nullable")]
    ev_charging: Vec<WireCanValue>,
}

// =============================================================================
// Mapping
// =============================================================================

pub(crate) fn map_metric(v: WireCanValue) -> CanMetricValue {
    CanMetricValue {
        value: v.value.as_ref().map(JsonScalar::as_f64).unwrap_or_default(),
        time: v.gmt.as_deref().and_then(parse_local),
    }
}

fn map_metrics(values: Vec<WireCanValue>) -> Vec<CanMetricValue> {
    values.into_iter().map(map_metric).collect()
}

fn map_axis_weight(v: WireAxisWeight) -> AxisWeightMetricValue {
    AxisWeightMetricValue {
        value_kg: v.value.as_ref().map(JsonScalar::as_f64).unwrap_or_default(),
        axis_id: v.axis,
        wheel_id: v.wheel,
        time: v.gmt.as_deref().and_then(parse_local),
    }
}

fn map_point(u: WireCanPoint, datetime: DateTime<Utc>) -> CanDataPoint {
    CanDataPoint {
        unit_id: u.unit_id,
        time: datetime,
        rpm_average: u.rpm_average.map(map_metric),
        rpm_max: u.rpm_max.map(map_metric),
        fuel_level_percent: u.fuel_level.map(map_metric),
        total_distance_km: u.total_distance.map(map_metric),
        total_fuel_l: u.total_fuel.map(map_metric),
        total_engine_hours: u.total_engine_hours.map(map_metric),
        ambient_temperature_c: u.ambient_temperature.map(map_metric),
        axis_weights: u.weight_on_axis.into_iter().map(map_axis_weight).collect(),
    }
}

fn map_period(u: WireCanPeriod) -> UnitCanPeriod {
    let ev = u.ev_values.unwrap_or_default();

    UnitCanPeriod {
        unit_id: u.unit_id,
        rpm_average: map_metrics(u.rpm_average),
        rpm_max: map_metrics(u.rpm_max),
        fuel_level_percent: map_metrics(u.fuel_level),
        service_distance_km: map_metrics(u.service_distance),
        total_distance_km: map_metrics(u.total_distance),
        total_fuel_l: map_metrics(u.total_fuel),
        total_engine_hours: map_metrics(u.total_engine_hours),
        ambient_temperature_c: map_metrics(u.ambient_temperature),
        weight_on_chassis_total_kg: map_metrics(u.weight_on_chassis_total),
        weight_on_axis: u.weight_on_axis.into_iter().map(map_axis_weight).collect(),
        ev_battery_rel_percent: map_metrics(ev.can_ev_battery_rel),
        ev_battery_abs_kwh: map_metrics(ev.can_ev_battery_abs),
        ev_charging: map_metrics(ev.ev_charging),
    }
}
