//! `alert/list` response schema and mapping to [`Alert`]

use mapon_core::{Alert, Location};
use serde::Deserialize;

use crate::de::{non_empty, nullable};
use crate::envelope::decode_envelope;
use crate::error::ConvResult;
use crate::scalar::JsonScalar;
use crate::time::parse_rfc3339;

pub const ENDPOINT: &str = "alert/list";

/// Decode an `alert/list` response body. The payload is a bare array.
pub fn parse_alerts_response(body: &[u8]) -> ConvResult<Vec<Alert>> {
    let alerts: Vec<WireAlert> = decode_envelope(ENDPOINT, body)?;
    Ok(alerts.into_iter().map(map_alert).collect())
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct WireAlert {
    #[serde(deserialize_with = "nullable")]
    id: i64,
    #[serde(deserialize_with = "nullable")]
    unit_id: i64,
    driver: Option<JsonScalar>,
    alert_type: Option<String>,
    alert_val: Option<JsonScalar>,
    msg: Option<String>,
    time: Option<String>,
    /// `"lat,lng"`
    location: Option<String>,
    address: Option<String>,
}

fn map_alert(j: WireAlert) -> Alert {
    Alert {
        alert_id: j.id,
        unit_id: j.unit_id,
        driver_id: j.driver.as_ref().map(JsonScalar::as_i64).unwrap_or_default(),
        alert_type: non_empty(j.alert_type),
        message: non_empty(j.msg),
        value_raw: non_empty(j.alert_val.and_then(|v| v.as_text())),
        time: j.time.as_deref().and_then(parse_rfc3339),
        location: j
            .location
            .as_deref()
            .and_then(parse_lat_lng)
            .map(|loc| loc.with_address(non_empty(j.address))),
    }
}

/// A location is only produced for exactly two comma-separated parts.
/// Unparseable coordinates become `0.0`.
fn parse_lat_lng(raw: &str) -> Option<Location> {
    let parts: Vec<&str> = raw.split(',').collect();
    let [lat, lng] = parts.as_slice() else {
        return None;
    };
    let coord = |s: &str| s.trim().parse::<f64>().unwrap_or(0.0);
    Some(Location::new(coord(*lat), coord(*lng)))
}
