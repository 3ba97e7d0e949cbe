//! `route/list` response schema and mapping to [`Route`]

use mapon_core::{Location, Route, UnitState};
use serde::Deserialize;

use crate::codes;
use crate::de::{non_empty, nullable, UnitsData};
use crate::envelope::decode_envelope;
use crate::error::ConvResult;
use crate::scalar::JsonScalar;
use crate::time::parse_rfc3339;

pub const ENDPOINT: &str = "route/list";

/// Decode a `route/list` response body.
///
/// Routes are grouped per unit on the wire; the result is flattened in
/// response order, units first, then routes within each unit.
pub fn parse_routes_response(body: &[u8]) -> ConvResult<Vec<Route>> {
    let data: UnitsData<WireUnitRoutes> = decode_envelope(ENDPOINT, body)?;
    Ok(data
        .units
        .into_iter()
        .flat_map(|unit| {
            let unit_id = unit.unit_id;
            unit.routes.into_iter().map(move |r| map_route(unit_id, r))
        })
        .collect())
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct WireUnitRoutes {
    #[serde(deserialize_with = "nullable")]
    unit_id: i64,
    #[serde(deserialize_with = "nullable")]
    routes: Vec<WireRoute>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct WireRoute {
    #[serde(deserialize_with = "nullable")]
    route_id: i64,
    #[serde(rename = "type")]
    route_type: Option<String>,
    distance: Option<JsonScalar>,
    avg_speed: Option<JsonScalar>,
    max_speed: Option<JsonScalar>,
    polyline: Option<String>,
    #[serde(deserialize_with = "nullable")]
    driver_id: i64,
    start: Option<WireRoutePoint>,
    end: Option<WireRoutePoint>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct WireRoutePoint {
    time: Option<String>,
    address: Option<String>,
    lat: Option<f64>,
    lng: Option<f64>,
    can: Option<WireRouteCan>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct WireRouteCan {
    fuel_level_liters: Option<JsonScalar>,
    /// Kilometres
    total_distance: Option<JsonScalar>,
}

fn scalar_f64(value: &Option<JsonScalar>) -> f64 {
    value.as_ref().map(JsonScalar::as_f64).unwrap_or_default()
}

fn map_route(unit_id: i64, j: WireRoute) -> Route {
    Route {
        route_id: j.route_id,
        unit_id,
        driver_id: j.driver_id,
        route_type: j.route_type.as_deref().and_then(codes::route_type),
        distance_m: j.distance.as_ref().map(JsonScalar::as_i64).unwrap_or_default(),
        avg_speed_kmh: scalar_f64(&j.avg_speed),
        max_speed_kmh: scalar_f64(&j.max_speed),
        polyline: non_empty(j.polyline),
        start: j.start.map(map_point).unwrap_or_default(),
        end: j.end.map(map_point).unwrap_or_default(),
    }
}

/// Map a route endpoint to a state snapshot. Start and end are independent.
fn map_point(p: WireRoutePoint) -> UnitState {
    let location = (p.lat.is_some() || p.lng.is_some()).then(|| {
        Location::new(p.lat.unwrap_or_default(), p.lng.unwrap_or_default())
            .with_address(non_empty(p.address))
    });

    let mut state = UnitState {
        time: p.time.as_deref().and_then(parse_rfc3339),
        location,
        ..Default::default()
    };

    if let Some(can) = p.can {
        state.fuel_level_l = Some(scalar_f64(&can.fuel_level_liters));
        state.odometer_m = Some((scalar_f64(&can.total_distance) * 1000.0).round() as i64);
    }

    state
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use mapon_core::RouteType;

    const BODY: &[u8] = br#"{"data":{"units":[
        {"unit_id":10,"routes":[
            {"route_id":1,"type":"route","distance":12000,"avg_speed":40.5,"max_speed":"88","driver_id":3,
             "start":{"time":"2021-01-01T08:00:00Z","address":"Riga","lat":56.95,"lng":24.1,
                      "can":{"fuel_level_liters":120.5,"total_distance":"1520.25"}},
             "end":{"time":"garbage","lat":57.0,"lng":24.3}},
            {"route_id":2,"type":"stop"}]},
        {"unit_id":20,"routes":[{"route_id":3,"type":"Ferry"}]}]}}"#;

    #[test]
    fn test_routes_flattened_in_order() {
        let routes = parse_routes_response(BODY).unwrap();
        let ids: Vec<(i64, i64)> = routes.iter().map(|r| (r.unit_id, r.route_id)).collect();
        assert_eq!(ids, vec![(10, 1), (10, 2), (20, 3)]);
    }

    #[test]
    fn test_route_fields() {
        let routes = parse_routes_response(BODY).unwrap();
        let route = &routes[0];
        assert_eq!(route.route_type, Some(RouteType::Route));
        assert_eq!(route.distance_m, 12000);
        assert_eq!(route.avg_speed_kmh, 40.5);
        assert_eq!(route.max_speed_kmh, 88.0);
        assert_eq!(route.driver_id, 3);
        assert!(routes[1].is_stop());
        assert_eq!(
            routes[2].route_type,
            Some(RouteType::Unrecognized("Ferry".to_string()))
        );
    }

    #[test]
    fn test_route_points_mapped_independently() {
        let routes = parse_routes_response(BODY).unwrap();
        let route = &routes[0];

        assert_eq!(
            route.start.time,
            Some(Utc.with_ymd_and_hms(2021, 1, 1, 8, 0, 0).unwrap())
        );
        let start = route.start.location.as_ref().unwrap();
        assert_eq!(start.address.as_deref(), Some("Riga"));
        assert_eq!(route.start.fuel_level_l, Some(120.5));
        assert_eq!(route.start.odometer_m, Some(1_520_250));

        assert_eq!(route.end.time, None);
        assert_eq!(route.end.location, Some(Location::new(57.0, 24.3)));
        assert_eq!(route.end.odometer_m, None);

        assert_eq!(routes[1].start, UnitState::default());
    }

    #[test]
    fn test_unit_without_routes() {
        let body = br#"{"data":{"units":[{"unit_id":5,"routes":null},{"unit_id":6}]}}"#;
        assert!(parse_routes_response(body).unwrap().is_empty());
    }
}
