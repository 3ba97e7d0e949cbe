//! `unit/list` response schema and mapping to [`Unit`]

use std::collections::BTreeMap;

use mapon_core::{
    CanState, Co2Emissions, ConnectedTrailer, Device, Driver, EvState, FuelConsumption,
    FuelEntry, FuelTank, Location, MovementState, ObjectLocation, Reading, Reefer, Relay,
    SavedValue, TechnicalDetails, Unit, UnitState, WeightState,
};
use serde::Deserialize;
use tracing::trace;

use crate::codes;
use crate::de::{lenient_map, non_empty, non_empty_str, nullable, UnitsData};
use crate::envelope::decode_envelope;
use crate::error::ConvResult;
use crate::scalar::JsonScalar;
use crate::time::{parse_local, parse_rfc3339};

pub const ENDPOINT: &str = "unit/list";

const FUEL_TANK_TOTAL_KEY: &str = "total_vol";
const FUEL_TANK_PREFIX: &str = "fuel_tank_vol_";

/// Decode a `unit/list` response body into units, in response order
pub fn parse_units_response(body: &[u8]) -> ConvResult<Vec<Unit>> {
    let data: UnitsData<WireUnit> = decode_envelope(ENDPOINT, body)?;
    Ok(data.units.into_iter().map(map_unit).collect())
}

// =============================================================================
// Wire schema
// =============================================================================

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct WireUnit {
    #[serde(deserialize_with = "nullable")]
    unit_id: i64,
    #[serde(deserialize_with = "nullable")]
    box_id: i64,
    #[serde(deserialize_with = "nullable")]
    company_id: i64,
    country_code: Option<String>,
    label: Option<String>,
    number: Option<String>,
    shortcut: Option<String>,
    vehicle_title: Option<String>,
    car_reg_certificate: Option<String>,
    reg_country: Option<String>,
    vin: Option<String>,
    #[serde(rename = "type")]
    unit_type: Option<String>,
    icon: Option<String>,
    /// Metres
    mileage: Option<JsonScalar>,
    speed: Option<i32>,
    direction: Option<i32>,
    fuel_type: Option<String>,
    created_at: Option<String>,
    last_update: Option<String>,
    state: Option<WireState>,
    movement_state: Option<WireMovementState>,
    lat: Option<f64>,
    lng: Option<f64>,
    ignition_total_time: Option<i64>,
    avg_fuel_consumption: Option<WireFuelConsumption>,
    #[serde(deserialize_with = "nullable")]
    fuel: Vec<WireFuel>,
    fuel_tank: Option<JsonScalar>,
    supply_voltage: Option<WireTimed>,
    battery_voltage: Option<WireTimed>,
    ignition: Option<WireTimed>,
    #[serde(rename = "ambienttemp")]
    ambient_temp: Option<WireTimed>,
    device: Option<WireDevice>,
    can: Option<WireCan>,
    weights: Option<WireWeights>,
    ev_values: Option<WireEvValues>,
    altitude: Option<WireTimed>,
    adblue_level_fraction: Option<JsonScalar>,
    technical_details: Option<WireTechnicalDetails>,
    connected: Option<WireConnected>,
    in_objects: Option<WireInObjects>,
    #[serde(deserialize_with = "nullable")]
    saved_values: Vec<WireSavedValue>,
    #[serde(deserialize_with = "nullable")]
    drivers: Vec<WireUnitDriver>,
    #[serde(deserialize_with = "nullable")]
    relays: Vec<WireRelay>,
    reefer: Option<WireReefer>,
}

/// A value reported together with its measurement time
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct WireTimed {
    gmt: Option<String>,
    value: Option<JsonScalar>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct WireState {
    name: Option<String>,
    start: Option<String>,
    duration: Option<i64>,
    debug_info: Option<WireDebugInfo>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct WireDebugInfo {
    msg: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct WireMovementState {
    name: Option<String>,
    start: Option<String>,
    #[serde(deserialize_with = "nullable")]
    duration: i64,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct WireFuelConsumption {
    norm: Option<JsonScalar>,
    measurement: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct WireFuel {
    #[serde(rename = "type")]
    fuel_type: Option<String>,
    metrics: Option<String>,
    value: Option<JsonScalar>,
    last_update: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct WireDevice {
    #[serde(deserialize_with = "nullable")]
    id: i64,
    serial_number: Option<JsonScalar>,
    imei: Option<JsonScalar>,
    sim: Option<JsonScalar>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct WireCan {
    odom: Option<WireTimed>,
    fuel_total: Option<WireTimed>,
    engine_rpm_avg: Option<WireTimed>,
    can_fuel: Option<WireTimed>,
    engine_hours: Option<WireTimed>,
    service_brake_switch: Option<WireTimed>,
    parking_brake_switch: Option<WireTimed>,
    engine_load: Option<WireTimed>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct WireWeights {
    #[serde(deserialize_with = "lenient_map")]
    axis: BTreeMap<String, WireTimed>,
    combination_weight: Option<WireTimed>,
    powered_weight: Option<WireTimed>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct WireEvValues {
    can_ev_battery_rel: Option<WireTimed>,
    can_ev_battery_abs: Option<WireTimed>,
    ev_charging: Option<WireTimed>,
    ev_charger_connected: Option<WireTimed>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct WireTechnicalDetails {
    stage_classification: Option<JsonScalar>,
    emission_class: Option<JsonScalar>,
    gross_weight: Option<JsonScalar>,
    make_year: Option<JsonScalar>,
    make_month: Option<JsonScalar>,
    power_ps: Option<JsonScalar>,
    power_kw: Option<JsonScalar>,
    cubic_capacity: Option<JsonScalar>,
    co2_emissions: Option<WireCo2>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct WireCo2 {
    value: Option<JsonScalar>,
    metrics: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct WireConnected {
    unit_id: Option<JsonScalar>,
    #[serde(rename = "type")]
    trailer_type: Option<String>,
    location: Option<WireTextLocation>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct WireTextLocation {
    lat: Option<JsonScalar>,
    lng: Option<JsonScalar>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct WireInObjects {
    #[serde(deserialize_with = "nullable")]
    objects: Vec<WireObjectRef>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct WireObjectRef {
    object_id: Option<JsonScalar>,
    name: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct WireSavedValue {
    key: Option<String>,
    value: Option<JsonScalar>,
    gmt: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct WireUnitDriver {
    #[serde(deserialize_with = "nullable")]
    driver_id: i64,
    name: Option<String>,
    surname: Option<String>,
    email: Option<String>,
    phone: Option<String>,
    ibutton_value: Option<String>,
    tachograph_id: Option<String>,
    blocked: Option<JsonScalar>,
    created_at: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct WireRelay {
    #[serde(deserialize_with = "nullable")]
    relay_id: i32,
    #[serde(deserialize_with = "nullable")]
    relay_state: i32,
    #[serde(rename = "type")]
    relay_type: Option<String>,
    title: Option<String>,
    inverted: Option<JsonScalar>,
    control_while_moving: Option<JsonScalar>,
    enabled: Option<JsonScalar>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct WireReefer {
    refrigerator_type: Option<String>,
    refrigerator_compartment_count: Option<i32>,
    refrigerator_communication_type: Option<String>,
}

// =============================================================================
// Mapping
// =============================================================================

fn map_unit(j: WireUnit) -> Unit {
    let state = map_state(&j);

    Unit {
        unit_id: j.unit_id,
        company_id: j.company_id,
        box_id: j.box_id,
        label: non_empty(j.label),
        number: non_empty(j.number),
        shortcut: non_empty(j.shortcut),
        country_code: non_empty(j.country_code),
        vehicle_title: non_empty(j.vehicle_title),
        car_reg_certificate: non_empty(j.car_reg_certificate),
        reg_country: non_empty(j.reg_country),
        vin: non_empty(j.vin),
        unit_type: j.unit_type.as_deref().and_then(codes::unit_type),
        icon: non_empty(j.icon),
        fuel_type: j.fuel_type.as_deref().and_then(codes::fuel_type),
        created_at: j.created_at.as_deref().and_then(parse_rfc3339),
        device: j.device.map(map_device),
        avg_fuel_consumption: j.avg_fuel_consumption.map(|fc| FuelConsumption {
            norm: scalar_f64(fc.norm.as_ref()),
            measurement: non_empty(fc.measurement),
        }),
        fuel_tank: j.fuel_tank.as_ref().and_then(map_fuel_tank),
        technical_details: j.technical_details.map(map_technical_details),
        movement_state: j.movement_state.map(|ms| MovementState {
            name: non_empty(ms.name),
            start: ms.start.as_deref().and_then(parse_rfc3339),
            duration_s: ms.duration,
        }),
        connected: j.connected.map(map_connected),
        in_objects: j
            .in_objects
            .map(|io| io.objects)
            .unwrap_or_default()
            .into_iter()
            .map(|o| ObjectLocation {
                object_id: o.object_id.and_then(|id| id.as_text()).unwrap_or_default(),
                name: non_empty(o.name),
            })
            .collect(),
        saved_values: j
            .saved_values
            .into_iter()
            .map(|sv| SavedValue {
                key: sv.key.unwrap_or_default(),
                value: sv.value.and_then(|v| v.as_text()).unwrap_or_default(),
                time: sv.gmt.as_deref().and_then(parse_local),
            })
            .collect(),
        drivers: j.drivers.into_iter().map(map_unit_driver).collect(),
        relays: j.relays.into_iter().map(map_relay).collect(),
        reefer: j.reefer.map(|r| Reefer {
            refrigerator_type: non_empty(r.refrigerator_type),
            compartment_count: r.refrigerator_compartment_count,
            communication_type: non_empty(r.refrigerator_communication_type),
        }),
        state,
    }
}

fn map_device(d: WireDevice) -> Device {
    Device {
        device_id: d.id,
        serial_number: scalar_text(d.serial_number),
        imei: scalar_text(d.imei),
        sim: scalar_text(d.sim),
    }
}

/// Tank capacities arrive as `total_vol` plus `fuel_tank_vol_<n>` keys.
/// Only numeric values are kept.
fn map_fuel_tank(raw: &JsonScalar) -> Option<FuelTank> {
    let JsonScalar::Composite(value) = raw else {
        return None;
    };
    // An empty tank description is sent as `[]`
    let Some(entries) = value.as_object() else {
        return Some(FuelTank::default());
    };

    let mut tank = FuelTank::default();
    for (key, value) in entries {
        if key == FUEL_TANK_TOTAL_KEY {
            tank.total_vol_l = value.as_f64();
            continue;
        }
        let index = key
            .strip_prefix(FUEL_TANK_PREFIX)
            .and_then(|n| n.parse::<i32>().ok());
        match (index, value.as_f64()) {
            (Some(index), Some(volume)) => {
                tank.tank_volumes_l.insert(index, volume);
            }
            _ => trace!(key = %key, "dropping fuel tank entry"),
        }
    }
    Some(tank)
}

fn map_technical_details(td: WireTechnicalDetails) -> TechnicalDetails {
    TechnicalDetails {
        stage_classification: scalar_text(td.stage_classification),
        emission_class: scalar_text(td.emission_class),
        gross_weight_kg: td.gross_weight.as_ref().map(JsonScalar::as_i64),
        make_year: scalar_text(td.make_year),
        make_month: scalar_text(td.make_month),
        power_ps: td.power_ps.as_ref().map(|v| v.as_i64() as i32),
        power_kw: td.power_kw.as_ref().map(|v| v.as_i64() as i32),
        cubic_capacity_l: td.cubic_capacity.as_ref().map(JsonScalar::as_f64),
        co2_emissions: td.co2_emissions.map(|co2| Co2Emissions {
            value: scalar_text(co2.value),
            metrics: non_empty(co2.metrics),
        }),
    }
}

fn map_connected(c: WireConnected) -> ConnectedTrailer {
    ConnectedTrailer {
        unit_id: scalar_text(c.unit_id),
        trailer_type: non_empty(c.trailer_type),
        location: c.location.map(|loc| {
            Location::new(scalar_f64(loc.lat.as_ref()), scalar_f64(loc.lng.as_ref()))
        }),
    }
}

fn map_unit_driver(d: WireUnitDriver) -> Driver {
    Driver {
        driver_id: d.driver_id,
        name: non_empty(d.name),
        surname: non_empty(d.surname),
        email: non_empty(d.email),
        phone: non_empty(d.phone),
        ibutton_value: non_empty(d.ibutton_value),
        tachograph_id: non_empty(d.tachograph_id),
        blocked: d.blocked.as_ref().is_some_and(JsonScalar::as_flag),
        created_at: d.created_at.as_deref().and_then(parse_rfc3339),
    }
}

fn map_relay(r: WireRelay) -> Relay {
    let flag = |v: Option<JsonScalar>| v.as_ref().is_some_and(JsonScalar::as_flag);
    Relay {
        relay_id: r.relay_id,
        relay_state: r.relay_state,
        relay_type: non_empty(r.relay_type),
        title: non_empty(r.title),
        inverted: flag(r.inverted),
        control_while_moving: flag(r.control_while_moving),
        enabled: flag(r.enabled),
    }
}

fn map_state(j: &WireUnit) -> UnitState {
    let wire_state = j.state.as_ref();

    let mut state = UnitState {
        time: j.last_update.as_deref().and_then(parse_rfc3339),
        location: (j.lat.is_some() || j.lng.is_some()).then(|| {
            Location::new(j.lat.unwrap_or_default(), j.lng.unwrap_or_default())
        }),
        speed_kmh: j.speed,
        direction_deg: j.direction,
        odometer_m: j.mileage.as_ref().map(|m| m.as_f64() as i64),
        ignition_total_duration_s: j.ignition_total_time,
        movement_status: wire_state
            .and_then(|s| s.name.as_deref())
            .and_then(codes::movement_status),
        start_time: wire_state
            .and_then(|s| s.start.as_deref())
            .and_then(parse_rfc3339),
        duration_s: wire_state.and_then(|s| s.duration),
        debug_message: wire_state
            .and_then(|s| s.debug_info.as_ref())
            .and_then(|d| d.msg.as_deref())
            .and_then(non_empty_str),
        supply_voltage_v: reading_f64(j.supply_voltage.as_ref()),
        battery_voltage_v: reading_f64(j.battery_voltage.as_ref()),
        ignition: reading(j.ignition.as_ref(), |v| {
            v.as_text().is_some_and(|s| s == "on")
        }),
        ambient_temperature_c: reading_f64(j.ambient_temp.as_ref()),
        altitude_m: reading_f64(j.altitude.as_ref()),
        adblue_level_fraction: j.adblue_level_fraction.as_ref().map(JsonScalar::as_f64),
        can: j.can.as_ref().map(map_can),
        weights: j.weights.as_ref().map(map_weights),
        ev: j.ev_values.as_ref().map(map_ev),
        ..Default::default()
    };

    for f in &j.fuel {
        let value = scalar_f64(f.value.as_ref());
        state.fuel_entries.push(FuelEntry {
            fuel_type: f.fuel_type.as_deref().and_then(non_empty_str),
            metrics: f.metrics.as_deref().and_then(non_empty_str),
            value,
            last_update: f.last_update.as_deref().and_then(parse_rfc3339),
        });
        // First non-zero litre reading doubles as the unit's fuel level
        if f.metrics.as_deref() == Some("L") && state.fuel_level_l.unwrap_or(0.0) == 0.0 {
            state.fuel_level_l = Some(value);
        }
    }

    state
}

fn map_can(can: &WireCan) -> CanState {
    CanState {
        odometer_km: reading_f64(can.odom.as_ref()),
        total_fuel_used_l: reading_f64(can.fuel_total.as_ref()),
        engine_rpm: reading_f64(can.engine_rpm_avg.as_ref()),
        fuel_level_l: reading_f64(can.can_fuel.as_ref()),
        engine_hours_h: reading_f64(can.engine_hours.as_ref()),
        service_brake_switch: reading(can.service_brake_switch.as_ref(), |v| v.above(0.5)),
        parking_brake_switch: reading(can.parking_brake_switch.as_ref(), |v| v.above(0.5)),
        engine_load_percent: reading_f64(can.engine_load.as_ref()),
    }
}

fn map_weights(weights: &WireWeights) -> WeightState {
    let mut axis_weights_kg = BTreeMap::new();
    for (key, raw) in &weights.axis {
        let Ok(axis) = key.parse::<i32>() else {
            trace!(key = %key, "dropping axis weight with non-numeric key");
            continue;
        };
        if let Some(r) = reading_f64(Some(raw)) {
            axis_weights_kg.insert(axis, r);
        }
    }

    WeightState {
        gross_combination_weight_kg: reading_f64(weights.combination_weight.as_ref()),
        powered_weight_kg: reading_f64(weights.powered_weight.as_ref()),
        axis_weights_kg,
    }
}

fn map_ev(ev: &WireEvValues) -> EvState {
    EvState {
        battery_soc_percent: reading_f64(ev.can_ev_battery_rel.as_ref()),
        battery_soc_kwh: reading_f64(ev.can_ev_battery_abs.as_ref()),
        charging: reading(ev.ev_charging.as_ref(), |v| v.above(0.0)),
        charger_connected: reading(ev.ev_charger_connected.as_ref(), |v| v.above(0.0)),
    }
}

// =============================================================================
// Helpers
// =============================================================================

/// Build a reading only when both the value and a valid RFC3339 time exist
fn reading<T>(
    raw: Option<&WireTimed>,
    convert: impl FnOnce(&JsonScalar) -> T,
) -> Option<Reading<T>> {
    let raw = raw?;
    let value = raw.value.as_ref().filter(|v| !v.is_null())?;
    let time = raw.gmt.as_deref().and_then(parse_rfc3339)?;
    Some(Reading::new(convert(value), time))
}

fn reading_f64(raw: Option<&WireTimed>) -> Option<Reading<f64>> {
    reading(raw, JsonScalar::as_f64)
}

fn scalar_f64(value: Option<&JsonScalar>) -> f64 {
    value.map(JsonScalar::as_f64).unwrap_or_default()
}

fn scalar_text(value: Option<JsonScalar>) -> Option<String> {
    non_empty(value.and_then(|v| v.as_text()))
}
