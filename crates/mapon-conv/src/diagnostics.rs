//! Diagnostic snapshots from the `unit_data` endpoints: debug info, driving
//! time, custom fields and history points

use std::collections::BTreeMap;

use mapon_core::{
    DrivingPeriod, DrivingTime, Location, UnitDebugInfo, UnitField, UnitFields, UnitHistoryPoint,
};
use serde::Deserialize;

use crate::can::{map_metric, WireCanValue};
use crate::de::{lenient_map, non_empty, nullable, UnitsData};
use crate::envelope::decode_envelope;
use crate::error::ConvResult;
use crate::scalar::JsonScalar;
use crate::time::parse_local;

pub const DEBUG_INFO_ENDPOINT: &str = "unit_data/debug_info";
pub const DRIVING_TIME_ENDPOINT: &str = "unit_data/driving_time_extended";
pub const FIELDS_ENDPOINT: &str = "unit_data/fields";
pub const HISTORY_POINT_ENDPOINT: &str = "unit_data/history_point";

// =============================================================================
// Debug info
// =============================================================================

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct WireDebugInfo {
    #[serde(deserialize_with = "nullable")]
    unit_id: i64,
    last_location: Option<WireLastLocation>,
    fw_version: Option<String>,
    tachograph: Option<WireTachograph>,
    can: Option<WireDebugCan>,
    #[serde(rename = "gpsstatus")]
    gps_status: Option<WireGpsStatus>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct WireLastLocation {
    #[serde(deserialize_with = "nullable")]
    lat: f64,
    #[serde(deserialize_with = "nullable")]
    lng: f64,
    gmt: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct WireTachograph {
    last_test: Option<String>,
    last_id: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct WireDebugCan {
    total_distance: Option<WireValue>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct WireValue {
    value: Option<JsonScalar>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct WireGpsStatus {
    value: Option<JsonScalar>,
    gmt: Option<String>,
}

pub fn parse_debug_info_response(body: &[u8]) -> ConvResult<Vec<UnitDebugInfo>> {
    let data: UnitsData<WireDebugInfo> = decode_envelope(DEBUG_INFO_ENDPOINT, body)?;
    Ok(data.units.into_iter().map(map_debug_info).collect())
}

fn map_debug_info(u: WireDebugInfo) -> UnitDebugInfo {
    let local = |raw: Option<&str>| raw.and_then(parse_local);
    let tacho = u.tachograph.unwrap_or_default();

    UnitDebugInfo {
        unit_id: u.unit_id,
        last_location: u
            .last_location
            .as_ref()
            .map(|l| Location::new(l.lat, l.lng)),
        last_location_time: local(u.last_location.as_ref().and_then(|l| l.gmt.as_deref())),
        fw_version: non_empty(u.fw_version),
        last_tacho_test: local(tacho.last_test.as_deref()),
        last_tacho_id: local(tacho.last_id.as_deref()),
        can_total_distance_km: u
            .can
            .and_then(|c| c.total_distance)
            .and_then(|d| d.value)
            .map(|v| v.as_f64()),
        gps_status: non_empty(
            u.gps_status
                .as_ref()
                .and_then(|g| g.value.as_ref())
                .and_then(JsonScalar::as_text),
        ),
        gps_status_time: local(u.gps_status.as_ref().and_then(|g| g.gmt.as_deref())),
    }
}

// =============================================================================
// Driving time
// =============================================================================

#[derive(Debug, Default, Deserialize)]
struct DrivingTimeData(
    #[serde(deserialize_with = "lenient_map")] BTreeMap<String, WireDriverTime>,
);

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct WireDriverTime {
    current_state: Option<String>,
    #[serde(deserialize_with = "nullable")]
    driver_id: i64,
    driver_name: Option<String>,
    driver_surname: Option<String>,
    now: Option<WirePeriod>,
    today: Option<WirePeriod>,
    week: Option<WirePeriod>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct WirePeriod {
    #[serde(deserialize_with = "nullable")]
    driving: i64,
    #[serde(deserialize_with = "nullable")]
    driving_remaining: i64,
}

/// Decode a `unit_data/driving_time_extended` response body.
///
/// The payload is keyed by driver id; drivers are returned in key order.
pub fn parse_driving_time_response(body: &[u8]) -> ConvResult<Vec<DrivingTime>> {
    let DrivingTimeData(drivers) = decode_envelope(DRIVING_TIME_ENDPOINT, body)?;
    Ok(drivers.into_values().map(map_driving_time).collect())
}

fn map_driving_time(d: WireDriverTime) -> DrivingTime {
    let period = |p: Option<WirePeriod>| {
        p.map(|p| DrivingPeriod {
            driving_s: p.driving,
            driving_remaining_s: p.driving_remaining,
        })
    };

    DrivingTime {
        driver_id: d.driver_id,
        current_state: non_empty(d.current_state),
        driver_name: non_empty(d.driver_name),
        driver_surname: non_empty(d.driver_surname),
        now: period(d.now),
        today: period(d.today),
        week: period(d.week),
    }
}

// =============================================================================
// Custom fields
// =============================================================================

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct WireUnitFields {
    #[serde(deserialize_with = "nullable")]
    unit_id: i64,
    #[serde(deserialize_with = "lenient_map")]
    fields: BTreeMap<String, JsonScalar>,
}

/// Decode a `unit_data/fields` response body. Fields are ordered by key and
/// every value is rendered as text; `null` becomes an empty string.
pub fn parse_unit_fields_response(body: &[u8]) -> ConvResult<Vec<UnitFields>> {
    let data: UnitsData<WireUnitFields> = decode_envelope(FIELDS_ENDPOINT, body)?;
    Ok(data
        .units
        .into_iter()
        .map(|u| UnitFields {
            unit_id: u.unit_id,
            fields: u
                .fields
                .into_iter()
                .map(|(key, value)| UnitField {
                    key,
                    value: value.as_text().unwrap_or_default(),
                })
                .collect(),
        })
        .collect())
}

// =============================================================================
// History point
// =============================================================================

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct WireHistoryPoint {
    #[serde(deserialize_with = "nullable")]
    unit_id: i64,
    can_total_distance: Option<WireCanValue>,
    mileage: Option<WireCanValue>,
    position: Option<WirePosition>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct WirePosition {
    gmt: Option<String>,
    value: Option<WireLatLng>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct WireLatLng {
    #[serde(deserialize_with = "nullable")]
    lat: f64,
    #[serde(deserialize_with = "nullable")]
    lng: f64,
}

pub fn parse_history_point_response(body: &[u8]) -> ConvResult<Vec<UnitHistoryPoint>> {
    let data: UnitsData<WireHistoryPoint> = decode_envelope(HISTORY_POINT_ENDPOINT, body)?;
    Ok(data.units.into_iter().map(map_history_point).collect())
}

fn map_history_point(u: WireHistoryPoint) -> UnitHistoryPoint {
    let position = u.position.unwrap_or_default();

    UnitHistoryPoint {
        unit_id: u.unit_id,
        can_total_distance: u.can_total_distance.map(map_metric),
        mileage: u.mileage.map(map_metric),
        position: position.value.map(|p| Location::new(p.lat, p.lng)),
        position_time: position.gmt.as_deref().and_then(parse_local),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    #[test]
    fn test_debug_info() {
        let body = br#"{"data":{"units":[{"unit_id":8,
            "last_location":{"lat":56.95,"lng":24.1,"gmt":"2021-01-01 10:00:00"},
            "fw_version":"03.28.07",
            "tachograph":{"last_test":"2021-01-01 09:00:00","last_id":""},
            "can":{"total_distance":{"value":"183204.5"}},
            "gpsstatus":{"value":"OK","gmt":"2021-01-01 10:00:00"}}]}}"#;
        let info = parse_debug_info_response(body).unwrap().remove(0);
        let ten = Utc.with_ymd_and_hms(2021, 1, 1, 10, 0, 0).unwrap();

        assert_eq!(info.unit_id, 8);
        assert_eq!(info.last_location, Some(Location::new(56.95, 24.1)));
        assert_eq!(info.last_location_time, Some(ten));
        assert_eq!(info.fw_version.as_deref(), Some("03.28.07"));
        assert!(info.last_tacho_test.is_some());
        assert_eq!(info.last_tacho_id, None);
        assert_eq!(info.can_total_distance_km, Some(183204.5));
        assert_eq!(info.gps_status.as_deref(), Some("OK"));
        assert_eq!(info.gps_status_time, Some(ten));
    }

    #[test]
    fn test_debug_info_sparse_unit() {
        let info = parse_debug_info_response(br#"{"data":{"units":[{"unit_id":9}]}}"#)
            .unwrap()
            .remove(0);
        assert_eq!(
            info,
            UnitDebugInfo {
                unit_id: 9,
                ..Default::default()
            }
        );
    }

    #[test]
    fn test_driving_time_keyed_by_driver() {
        let body = br#"{"data":{
            "22":{"current_state":"driving","driver_id":22,"driver_name":"Janis","driver_surname":"",
                  "now":{"driving":3600,"driving_remaining":12600}},
            "11":{"current_state":"rest","driver_id":11,"week":{"driving":90000,"driving_remaining":0}}}}"#;
        let drivers = parse_driving_time_response(body).unwrap();
        let ids: Vec<i64> = drivers.iter().map(|d| d.driver_id).collect();
        assert_eq!(ids, vec![11, 22]);

        assert_eq!(drivers[0].now, None);
        assert_eq!(
            drivers[0].week,
            Some(DrivingPeriod {
                driving_s: 90000,
                driving_remaining_s: 0
            })
        );
        assert_eq!(drivers[1].driver_surname, None);
        assert_eq!(drivers[1].now.unwrap().driving_remaining_s, 12600);
    }

    #[test]
    fn test_driving_time_empty_list() {
        assert!(parse_driving_time_response(br#"{"data":[]}"#)
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_unit_fields_sorted_and_rendered() {
        let body = br#"{"data":{"units":[{"unit_id":1,"fields":{
            "zone":"north","capacity":12.5,"active":true,"note":null,"axles":3}}]}}"#;
        let units = parse_unit_fields_response(body).unwrap();
        let fields: Vec<(&str, &str)> = units[0]
            .fields
            .iter()
            .map(|f| (f.key.as_str(), f.value.as_str()))
            .collect();
        assert_eq!(
            fields,
            vec![
                ("active", "true"),
                ("axles", "3"),
                ("capacity", "12.5"),
                ("note", ""),
                ("zone", "north"),
            ]
        );
    }

    #[test]
    fn test_unit_fields_empty_list() {
        let body = br#"{"data":{"units":[{"unit_id":1,"fields":[]}]}}"#;
        let units = parse_unit_fields_response(body).unwrap();
        assert!(units[0].fields.is_empty());
    }

    #[test]
    fn test_history_point() {
        let body = br#"{"data":{"units":[{"unit_id":3,
            "can_total_distance":{"gmt":"2021-01-01 10:00:00","value":"120345.6"},
            "mileage":{"gmt":"2021-01-01 10:00:00","value":120000},
            "position":{"gmt":"2021-01-01 10:00:00","value":{"lat":56.95,"lng":24.1}}}]}}"#;
        let points = parse_history_point_response(body).unwrap();
        let point = &points[0];

        assert_eq!(point.can_total_distance.as_ref().unwrap().value, 120345.6);
        assert_eq!(point.mileage.as_ref().unwrap().value, 120000.0);
        assert_eq!(point.position, Some(Location::new(56.95, 24.1)));
        assert!(point.position_time.is_some());
    }
}
