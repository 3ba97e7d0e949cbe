//! Event and sensor series from the `unit_data` endpoints
//!
//! Every timestamp in these responses uses the bare `YYYY-MM-DD HH:MM:SS`
//! form.

use chrono::{DateTime, Utc};
use mapon_core::{
    DigitalInput, DigitalInputEvent, DigitalInputExtended, DigitalInputExtendedEvent,
    HumidityRecord, HumiditySensor, IbuttonEvent, IgnitionEvent, Location, TemperatureRecord,
    TemperatureSensor, UnitDigitalInputs, UnitDigitalInputsExtended, UnitHumidity, UnitIbuttons,
    UnitIgnitions, UnitTemperatures,
};
use serde::Deserialize;

use crate::de::{non_empty, nullable, UnitsData};
use crate::envelope::decode_envelope;
use crate::error::ConvResult;
use crate::scalar::JsonScalar;
use crate::time::parse_local;

pub const IGNITIONS_ENDPOINT: &str = "unit_data/ignitions";
pub const DIGITAL_INPUTS_ENDPOINT: &str = "unit_data/digital_inputs";
pub const DIGITAL_INPUTS_EXTENDED_ENDPOINT: &str = "unit_data/digital_inputs_extended";
pub const TEMPERATURE_ENDPOINT: &str = "unit_data/temperature";
pub const HUMIDITY_ENDPOINT: &str = "unit_data/humidity";
pub const IBUTTONS_ENDPOINT: &str = "unit_data/ibuttons";

fn time(raw: &Option<String>) -> Option<DateTime<Utc>> {
    raw.as_deref().and_then(parse_local)
}

fn scalar_f64(value: &Option<JsonScalar>) -> f64 {
    value.as_ref().map(JsonScalar::as_f64).unwrap_or_default()
}

// =============================================================================
// Ignitions
// =============================================================================

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct WireUnitIgnitions {
    #[serde(deserialize_with = "nullable")]
    unit_id: i64,
    #[serde(deserialize_with = "nullable")]
    ignitions: Vec<WireOnOff>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct WireOnOff {
    on: Option<String>,
    /// Empty while the ignition is still on
    off: Option<String>,
}

pub fn parse_ignitions_response(body: &[u8]) -> ConvResult<Vec<UnitIgnitions>> {
    let data: UnitsData<WireUnitIgnitions> = decode_envelope(IGNITIONS_ENDPOINT, body)?;
    Ok(data
        .units
        .into_iter()
        .map(|u| UnitIgnitions {
            unit_id: u.unit_id,
            ignitions: u
                .ignitions
                .into_iter()
                .map(|e| IgnitionEvent {
                    on_time: time(&e.on),
                    off_time: time(&e.off),
                })
                .collect(),
        })
        .collect())
}

// =============================================================================
// Digital inputs
// =============================================================================

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct WireUnitDigitalInputs {
    #[serde(deserialize_with = "nullable")]
    unit_id: i64,
    #[serde(deserialize_with = "nullable")]
    digital_inputs: Vec<WireDigitalInput>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct WireDigitalInput {
    #[serde(deserialize_with = "nullable")]
    no: i32,
    #[serde(deserialize_with = "nullable")]
    states: Vec<WireOnOff>,
}

pub fn parse_digital_inputs_response(body: &[u8]) -> ConvResult<Vec<UnitDigitalInputs>> {
    let data: UnitsData<WireUnitDigitalInputs> =
        decode_envelope(DIGITAL_INPUTS_ENDPOINT, body)?;
    Ok(data
        .units
        .into_iter()
        .map(|u| UnitDigitalInputs {
            unit_id: u.unit_id,
            inputs: u
                .digital_inputs
                .into_iter()
                .map(|input| DigitalInput {
                    input_number: input.no,
                    events: input
                        .states
                        .into_iter()
                        .map(|s| DigitalInputEvent {
                            on_time: time(&s.on),
                            off_time: time(&s.off),
                        })
                        .collect(),
                })
                .collect(),
        })
        .collect())
}

// =============================================================================
// Extended digital inputs
// =============================================================================

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct WireUnitDigitalInputsExtended {
    #[serde(deserialize_with = "nullable")]
    unit_id: i64,
    #[serde(deserialize_with = "nullable")]
    digital_inputs: Vec<WireDigitalInputExtended>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct WireDigitalInputExtended {
    #[serde(deserialize_with = "nullable")]
    input_id: i64,
    label: Option<String>,
    #[serde(deserialize_with = "nullable")]
    states: Vec<WireExtendedState>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct WireExtendedState {
    gmt_on: Option<String>,
    lat_on: Option<f64>,
    lng_on: Option<f64>,
    place_on: Option<String>,
    gmt_off: Option<String>,
    lat_off: Option<f64>,
    lng_off: Option<f64>,
    place_off: Option<String>,
    distance_on: Option<JsonScalar>,
    driver_id: Option<JsonScalar>,
}

fn place(lat: Option<f64>, lng: Option<f64>, address: Option<String>) -> Option<Location> {
    if lat.is_none() && lng.is_none() {
        return None;
    }
    Some(
        Location::new(lat.unwrap_or_default(), lng.unwrap_or_default())
            .with_address(non_empty(address)),
    )
}

fn map_extended_state(s: WireExtendedState) -> DigitalInputExtendedEvent {
    DigitalInputExtendedEvent {
        on_time: time(&s.gmt_on),
        off_time: time(&s.gmt_off),
        on_location: place(s.lat_on, s.lng_on, s.place_on),
        off_location: place(s.lat_off, s.lng_off, s.place_off),
        distance_m: s.distance_on.as_ref().map(JsonScalar::as_i64).unwrap_or_default(),
        driver_id: s.driver_id.as_ref().map(JsonScalar::as_i64).unwrap_or_default(),
    }
}

pub fn parse_digital_inputs_extended_response(
    body: &[u8],
) -> ConvResult<Vec<UnitDigitalInputsExtended>> {
    let data: UnitsData<WireUnitDigitalInputsExtended> =
        decode_envelope(DIGITAL_INPUTS_EXTENDED_ENDPOINT, body)?;
    Ok(data
        .units
        .into_iter()
        .map(|u| UnitDigitalInputsExtended {
            unit_id: u.unit_id,
            inputs: u
                .digital_inputs
                .into_iter()
                .map(|input| DigitalInputExtended {
                    input_id: input.input_id,
                    label: non_empty(input.label),
                    events: input.states.into_iter().map(map_extended_state).collect(),
                })
                .collect(),
        })
        .collect())
}

// =============================================================================
// Temperature and humidity sensors
// =============================================================================

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct WireUnitTemperatures {
    #[serde(deserialize_with = "nullable")]
    unit_id: i64,
    #[serde(deserialize_with = "nullable")]
    sensors: Vec<WireTemperatureSensor>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct WireTemperatureSensor {
    #[serde(deserialize_with = "nullable")]
    no: i32,
    #[serde(deserialize_with = "nullable")]
    temperatures: Vec<WireSample>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct WireUnitHumidity {
    #[serde(deserialize_with = "nullable")]
    unit_id: i64,
    #[serde(deserialize_with = "nullable")]
    sensors: Vec<WireHumiditySensor>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct WireHumiditySensor {
    #[serde(deserialize_with = "nullable")]
    no: i32,
    #[serde(deserialize_with = "nullable")]
    humidities: Vec<WireSample>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct WireSample {
    gmt: Option<String>,
    value: Option<JsonScalar>,
}

pub fn parse_temperatures_response(body: &[u8]) -> ConvResult<Vec<UnitTemperatures>> {
    let data: UnitsData<WireUnitTemperatures> = decode_envelope(TEMPERATURE_ENDPOINT, body)?;
    Ok(data
        .units
        .into_iter()
        .map(|u| UnitTemperatures {
            unit_id: u.unit_id,
            sensors: u
                .sensors
                .into_iter()
                .map(|s| TemperatureSensor {
                    sensor_number: s.no,
                    records: s
                        .temperatures
                        .into_iter()
                        .map(|r| TemperatureRecord {
                            value_c: scalar_f64(&r.value),
                            time: time(&r.gmt),
                        })
                        .collect(),
                })
                .collect(),
        })
        .collect())
}

pub fn parse_humidity_response(body: &[u8]) -> ConvResult<Vec<UnitHumidity>> {
    let data: UnitsData<WireUnitHumidity> = decode_envelope(HUMIDITY_ENDPOINT, body)?;
    Ok(data
        .units
        .into_iter()
        .map(|u| UnitHumidity {
            unit_id: u.unit_id,
            sensors: u
                .sensors
                .into_iter()
                .map(|s| HumiditySensor {
                    sensor_number: s.no,
                    records: s
                        .humidities
                        .into_iter()
                        .map(|r| HumidityRecord {
                            value_percent: scalar_f64(&r.value),
                            time: time(&r.gmt),
                        })
                        .collect(),
                })
                .collect(),
        })
        .collect())
}

// =============================================================================
// iButtons
// =============================================================================

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct WireUnitIbuttons {
    #[serde(deserialize_with = "nullable")]
    unit_id: i64,
    #[serde(deserialize_with = "nullable")]
    ibuttons: Vec<WireSample>,
}

pub fn parse_ibuttons_response(body: &[u8]) -> ConvResult<Vec<UnitIbuttons>> {
    let data: UnitsData<WireUnitIbuttons> = decode_envelope(IBUTTONS_ENDPOINT, body)?;
    Ok(data
        .units
        .into_iter()
        .map(|u| UnitIbuttons {
            unit_id: u.unit_id,
            ibuttons: u
                .ibuttons
                .into_iter()
                .map(|e| IbuttonEvent {
                    value: non_empty(e.value.and_then(|v| v.as_text())),
                    time: time(&e.gmt),
                })
                .collect(),
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_ignition_on_off() {
        let body = br#"{"data":{"units":[{"unit_id":1,"ignitions":[
            {"on":"2021-01-01 10:00:00","off":"2021-01-01 10:05:00"},
            {"on":"2021-01-01 11:00:00","off":""}]}]},"error":null}"#;
        let units = parse_ignitions_response(body).unwrap();

        assert_eq!(units.len(), 1);
        assert_eq!(units[0].unit_id, 1);
        assert_eq!(
            units[0].ignitions[0],
            IgnitionEvent {
                on_time: Some(Utc.with_ymd_and_hms(2021, 1, 1, 10, 0, 0).unwrap()),
                off_time: Some(Utc.with_ymd_and_hms(2021, 1, 1, 10, 5, 0).unwrap()),
            }
        );
        assert_eq!(units[0].ignitions[1].off_time, None);
    }

    #[test]
    fn test_multi_unit_order_without_dedup() {
        let body = br#"{"data":{"units":[{"unit_id":2},{"unit_id":1},{"unit_id":2}]}}"#;
        let ids: Vec<i64> = parse_ignitions_response(body)
            .unwrap()
            .iter()
            .map(|u| u.unit_id)
            .collect();
        assert_eq!(ids, vec![2, 1, 2]);
    }

    #[test]
    fn test_digital_input_events() {
        let body = br#"{"data":{"units":[{"unit_id":4,"digital_inputs":[
            {"no":2,"states":[{"on":"2021-01-01 08:00:00","off":"2021-01-01 08:30:00"}]},
            {"no":1,"states":[]}]}]}}"#;
        let units = parse_digital_inputs_response(body).unwrap();
        let inputs = &units[0].inputs;

        assert_eq!(inputs[0].input_number, 2);
        assert_eq!(inputs[0].events.len(), 1);
        assert!(inputs[0].events[0].off_time.is_some());
        assert_eq!(inputs[1].input_number, 1);
        assert!(inputs[1].events.is_empty());
    }

    #[test]
    fn test_extended_digital_input_locations() {
        let body = br#"{"data":{"units":[{"unit_id":4,"digital_inputs":[
            {"input_id":9,"label":"PTO","states":[
                {"gmt_on":"2021-01-01 08:00:00","lat_on":56.9,"lng_on":24.1,"place_on":"Riga",
                 "gmt_off":null,"distance_on":"1250","driver_id":7}]}]}]}}"#;
        let units = parse_digital_inputs_extended_response(body).unwrap();
        let input = &units[0].inputs[0];
        let event = &input.events[0];

        assert_eq!(input.label.as_deref(), Some("PTO"));
        assert_eq!(
            event.on_location,
            Some(Location::new(56.9, 24.1).with_address(Some("Riga".to_string())))
        );
        assert_eq!(event.off_location, None);
        assert_eq!(event.off_time, None);
        assert_eq!(event.distance_m, 1250);
        assert_eq!(event.driver_id, 7);
    }

    #[test]
    fn test_sensor_values_coerced() {
        let body = br#"{"data":{"units":[{"unit_id":3,"sensors":[
            {"no":1,"temperatures":[{"gmt":"2021-01-01 10:00:00","value":"-18.5"},{"gmt":"2021-01-01 10:01:00","value":-18.0}]}]}]}}"#;
        let units = parse_temperatures_response(body).unwrap();
        let values: Vec<f64> = units[0].sensors[0].records.iter().map(|r| r.value_c).collect();
        assert_eq!(values, vec![-18.5, -18.0]);

        let body = br#"{"data":{"units":[{"unit_id":3,"sensors":[
            {"no":2,"humidities":[{"gmt":"2021-01-01 10:00:00","value":"65"}]}]}]}}"#;
        let units = parse_humidity_response(body).unwrap();
        assert_eq!(units[0].sensors[0].sensor_number, 2);
        assert_eq!(units[0].sensors[0].records[0].value_percent, 65.0);
    }

    #[test]
    fn test_ibutton_values() {
        let body = br#"{"data":{"units":[{"unit_id":5,"ibuttons":[
            {"gmt":"2021-01-01 06:00:00","value":"01A2B3C4"},
            {"gmt":"2021-01-01 07:00:00","value":""},
            {"gmt":"2021-01-01 08:00:00","value":123456}]}]}}"#;
        let units = parse_ibuttons_response(body).unwrap();
        let values: Vec<Option<&str>> = units[0]
            .ibuttons
            .iter()
            .map(|e| e.value.as_deref())
            .collect();
        assert_eq!(values, vec![Some("01A2B3C4"), None, Some("123456")]);
    }
}
