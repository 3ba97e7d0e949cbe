//! `driver/list` response schema and mapping to [`Driver`]

use mapon_core::Driver;
use serde::Deserialize;

use crate::de::{non_empty, nullable};
use crate::envelope::decode_envelope;
use crate::error::ConvResult;
use crate::scalar::JsonScalar;
use crate::time::parse_local;

pub const ENDPOINT: &str = "driver/list";

pub fn parse_drivers_response(body: &[u8]) -> ConvResult<Vec<Driver>> {
    let data: DriversData = decode_envelope(ENDPOINT, body)?;
    Ok(data.drivers.into_iter().map(map_driver).collect())
}

#[derive(Debug, Default, Deserialize)]
struct DriversData {
    #[serde(default, deserialize_with = "nullable")]
    drivers: Vec<WireDriver>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct WireDriver {
    #[serde(deserialize_with = "nullable")]
    id: i64,
    name: Option<String>,
    surname: Option<String>,
    email: Option<String>,
    phone: Option<String>,
    ibutton: Option<String>,
    tacho: Option<String>,
    /// Sent as `0`/`1`, a bool or a numeric string depending on account
    blocked: Option<JsonScalar>,
    /// `YYYY-MM-DD HH:MM:SS`
    created: Option<String>,
}

fn map_driver(j: WireDriver) -> Driver {
    Driver {
        driver_id: j.id,
        name: non_empty(j.name),
        surname: non_empty(j.surname),
        email: non_empty(j.email),
        phone: non_empty(j.phone),
        ibutton_value: non_empty(j.ibutton),
        tachograph_id: non_empty(j.tacho),
        blocked: j.blocked.as_ref().is_some_and(JsonScalar::as_flag),
        created_at: j.created.as_deref().and_then(parse_local),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    #[test]
    fn test_driver_mapping() {
        let body = br#"{"data":{"drivers":[
            {"id":5,"name":"Anna","surname":"Berzina","email":"","phone":"+371 2000000",
             "ibutton":"01A2B3","tacho":"","blocked":0,"created":"2016-08-10 12:50:56"}
        ]}}"#;
        let drivers = parse_drivers_response(body).unwrap();
        let driver = &drivers[0];

        assert_eq!(driver.driver_id, 5);
        assert_eq!(driver.full_name(), "Anna Berzina");
        assert_eq!(driver.email, None);
        assert_eq!(driver.tachograph_id, None);
        assert_eq!(driver.ibutton_value.as_deref(), Some("01A2B3"));
        assert!(!driver.blocked);
        assert_eq!(
            driver.created_at,
            Some(Utc.with_ymd_and_hms(2016, 8, 10, 12, 50, 56).unwrap())
        );
    }

    #[test]
    fn test_blocked_encodings() {
        let body = br#"{"data":{"drivers":[
            {"id":1,"blocked":1},{"id":2,"blocked":true},{"id":3,"blocked":"1"},
            {"id":4,"blocked":false},{"id":5,"blocked":"0"},{"id":6}
        ]}}"#;
        let blocked: Vec<bool> = parse_drivers_response(body)
            .unwrap()
            .iter()
            .map(|d| d.blocked)
            .collect();
        assert_eq!(blocked, vec![true, true, true, false, false, false]);
    }

    #[test]
    fn test_created_in_rfc3339_is_dropped() {
        let body = br#"{"data":{"drivers":[{"id":1,"created":"2016-08-10T12:50:56Z"}]}}"#;
        let drivers = parse_drivers_response(body).unwrap();
        assert_eq!(drivers[0].created_at, None);
    }
}
