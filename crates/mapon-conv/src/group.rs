//! `unit_groups/list` and `unit_groups/list_units` response schemas

use mapon_core::UnitGroup;
use serde::Deserialize;

use crate::de::{non_empty, nullable};
use crate::envelope::decode_envelope;
use crate::error::ConvResult;
use crate::scalar::JsonScalar;

pub const GROUPS_ENDPOINT: &str = "unit_groups/list";
pub const GROUP_UNITS_ENDPOINT: &str = "unit_groups/list_units";

/// Decode a `unit_groups/list` response body. The payload is a bare array.
pub fn parse_unit_groups_response(body: &[u8]) -> ConvResult<Vec<UnitGroup>> {
    let groups: Vec<WireGroup> = decode_envelope(GROUPS_ENDPOINT, body)?;
    Ok(groups.into_iter().map(map_group).collect())
}

/// Decode a `unit_groups/list_units` response body into unit ids
pub fn parse_units_in_group_response(body: &[u8]) -> ConvResult<Vec<i64>> {
    let data: GroupUnitsData = decode_envelope(GROUP_UNITS_ENDPOINT, body)?;
    Ok(data.units.into_iter().map(|u| u.id).collect())
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct WireGroup {
    #[serde(deserialize_with = "nullable")]
    id: i64,
    name: Option<String>,
    /// Number, numeric string, empty string or null
    parent_id: Option<JsonScalar>,
}

#[derive(Debug, Default, Deserialize)]
struct GroupUnitsData {
    #[serde(default, deserialize_with = "nullable")]
    units: Vec<WireGroupUnit>,
}

#[derive(Debug, Default, Deserialize)]
struct WireGroupUnit {
    #[serde(default, deserialize_with = "nullable")]
    id: i64,
}

fn map_group(j: WireGroup) -> UnitGroup {
    let parent_id = j
        .parent_id
        .filter(|p| p.as_text().is_some_and(|s| !s.is_empty()))
        .map(|p| p.as_i64());

    UnitGroup {
        group_id: j.id,
        name: non_empty(j.name),
        parent_id,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_parent_encodings() {
        let body = br#"{"data":[
            {"id":1,"name":"All","parent_id":null},
            {"id":2,"name":"Trucks","parent_id":"1"},
            {"id":3,"name":"Vans","parent_id":1},
            {"id":4,"name":"","parent_id":""}
        ]}"#;
        let groups = parse_unit_groups_response(body).unwrap();
        let parents: Vec<Option<i64>> = groups.iter().map(|g| g.parent_id).collect();
        assert_eq!(parents, vec![None, Some(1), Some(1), None]);
        assert_eq!(groups[3].name, None);
    }

    #[test]
    fn test_units_in_group() {
        let body = br#"{"data":{"units":[{"id":30},{"id":10},{"id":20}]},"error":null}"#;
        assert_eq!(parse_units_in_group_response(body).unwrap(), vec![30, 10, 20]);
    }

    #[test]
    fn test_units_in_empty_group() {
        assert!(parse_units_in_group_response(br#"{"data":[]}"#)
            .unwrap()
            .is_empty());
    }
}
