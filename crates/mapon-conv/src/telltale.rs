//! `tell_tale/values` response schema and mapping to [`UnitTellTales`]

use std::collections::BTreeMap;

use mapon_core::{TellTaleValue, UnitTellTales};
use serde::Deserialize;

use crate::de::{lenient_map, non_empty, nullable};
use crate::envelope::decode_envelope;
use crate::error::ConvResult;
use crate::time::parse_rfc3339;

pub const ENDPOINT: &str = "tell_tale/values";

/// Decode a `tell_tale/values` response body for `unit_id`.
///
/// The payload is keyed by unit id; entries for any other unit are ignored.
pub fn parse_tell_tales_response(body: &[u8], unit_id: i64) -> ConvResult<UnitTellTales> {
    let TellTaleData(mut by_unit) = decode_envelope(ENDPOINT, body)?;
    let values = by_unit
        .remove(&unit_id.to_string())
        .unwrap_or_default()
        .into_iter()
        .map(map_value)
        .collect();

    Ok(UnitTellTales { unit_id, values })
}

#[derive(Debug, Default, Deserialize)]
struct TellTaleData(
    #[serde(deserialize_with = "lenient_map")] BTreeMap<String, Vec<WireTellTale>>,
);

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct WireTellTale {
    name: Option<String>,
    #[serde(deserialize_with = "nullable")]
    telltale_id: i32,
    #[serde(deserialize_with = "nullable")]
    value: i32,
    value_title: Option<String>,
    datetime: Option<String>,
}

fn map_value(j: WireTellTale) -> TellTaleValue {
    TellTaleValue {
        telltale_id: j.telltale_id,
        name: non_empty(j.name),
        value: j.value,
        value_title: non_empty(j.value_title),
        time: j.datetime.as_deref().and_then(parse_rfc3339),
    }
}
