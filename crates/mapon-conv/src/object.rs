//! `object/list` response schema and mapping to [`Object`]

use mapon_core::Object;
use serde::Deserialize;

use crate::de::{non_empty, nullable};
use crate::envelope::decode_envelope;
use crate::error::ConvResult;
use crate::scalar::JsonScalar;

pub const ENDPOINT: &str = "object/list";

pub fn parse_objects_response(body: &[u8]) -> ConvResult<Vec<Object>> {
    let data: ObjectsData = decode_envelope(ENDPOINT, body)?;
    Ok(data.objects.into_iter().map(map_object).collect())
}

#[derive(Debug, Default, Deserialize)]
struct ObjectsData {
    #[serde(default, deserialize_with = "nullable")]
    objects: Vec<WireObject>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct WireObject {
    #[serde(deserialize_with = "nullable")]
    id: i64,
    name: Option<String>,
    wkt: Option<String>,
    user_id: Option<JsonScalar>,
    group_id: Option<JsonScalar>,
    /// `"Y"` or `"N"`
    private: Option<String>,
    color: Option<String>,
}

fn map_object(j: WireObject) -> Object {
    let id = |v: &Option<JsonScalar>| v.as_ref().map(JsonScalar::as_i64).unwrap_or_default();

    Object {
        object_id: j.id,
        name: non_empty(j.name),
        wkt: non_empty(j.wkt),
        user_id: id(&j.user_id),
        group_id: id(&j.group_id),
        is_private: j.private.as_deref() == Some("Y"),
        color_hex: non_empty(j.color),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_object_mapping() {
        let body = br#"{"data":{"objects":[
            {"id":100,"name":"Depot","wkt":"POINT(24.1 56.95)","user_id":"1","group_id":"0",
             "private":"Y","color":"FF0000"},
            {"id":101,"name":"","user_id":2,"private":"N","color":""}
        ]}}"#;
        let objects = parse_objects_response(body).unwrap();

        assert_eq!(objects[0].object_id, 100);
        assert_eq!(objects[0].user_id, 1);
        assert_eq!(objects[0].group_id, 0);
        assert!(objects[0].is_private);
        assert_eq!(objects[0].color_hex.as_deref(), Some("FF0000"));

        assert_eq!(objects[1].name, None);
        assert_eq!(objects[1].user_id, 2);
        assert!(!objects[1].is_private);
        assert_eq!(objects[1].color_hex, None);
    }

    #[test]
    fn test_lowercase_private_flag_is_not_private() {
        let body = br#"{"data":{"objects":[{"id":1,"private":"y"}]}}"#;
        assert!(!parse_objects_response(body).unwrap()[0].is_private);
    }
}
