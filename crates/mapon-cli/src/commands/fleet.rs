//! Fleet commands - units, drivers, routes, objects, alerts

use anyhow::Result;
use mapon_client::mapon_core::{Alert, Driver, Location, Object, Route, Unit};
use mapon_client::{
    ListAlertsRequest, ListDriversRequest, ListRoutesRequest, ListUnitsRequest, MaponClient,
};

use crate::output::{
    bool_cell, opt_cell, text_cell, time_cell, AlertRow, DriverRow, ObjectRow, OutputContext,
    RouteRow, UnitRow,
};

pub(crate) fn location_cell(location: Option<&Location>) -> String {
    match location {
        Some(l) => match &l.address {
            Some(address) => format!("{:.5},{:.5} ({})", l.latitude, l.longitude, address),
            None => format!("{:.5},{:.5}", l.latitude, l.longitude),
        },
        None => "-".to_string(),
    }
}

fn unit_rows(unit: &Unit) -> Vec<UnitRow> {
    vec![UnitRow {
        id: unit.unit_id,
        label: text_cell(unit.label.as_deref()),
        number: text_cell(unit.number.as_deref()),
        unit_type: opt_cell(unit.unit_type.as_ref()),
        fuel_type: opt_cell(unit.fuel_type.as_ref()),
        status: opt_cell(unit.state.movement_status.as_ref()),
        speed: opt_cell(unit.state.speed_kmh),
        location: location_cell(unit.state.location.as_ref()),
        updated: time_cell(unit.state.time.as_ref()),
    }]
}

/// List units
pub async fn units(client: &MaponClient, request: &ListUnitsRequest, ctx: &OutputContext) -> Result<()> {
    let units = client.list_units(request).await?;
    ctx.print(&units, unit_rows)
}

fn driver_rows(driver: &Driver) -> Vec<DriverRow> {
    vec![DriverRow {
        id: driver.driver_id,
        name: driver.full_name(),
        phone: text_cell(driver.phone.as_deref()),
        email: text_cell(driver.email.as_deref()),
        tachograph: text_cell(driver.tachograph_id.as_deref()),
        blocked: bool_cell(driver.blocked),
    }]
}

/// List drivers
pub async fn drivers(
    client: &MaponClient,
    request: &ListDriversRequest,
    ctx: &OutputContext,
) -> Result<()> {
    let drivers = client.list_drivers(request).await?;
    ctx.print(&drivers, driver_rows)
}

fn route_rows(route: &Route) -> Vec<RouteRow> {
    vec![RouteRow {
        id: route.route_id,
        unit_id: route.unit_id,
        route_type: opt_cell(route.route_type.as_ref()),
        start: time_cell(route.start.time.as_ref()),
        end: time_cell(route.end.time.as_ref()),
        distance_m: route.distance_m,
        avg_speed: route.avg_speed_kmh,
        max_speed: route.max_speed_kmh,
    }]
}

/// List routes
pub async fn routes(
    client: &MaponClient,
    request: &ListRoutesRequest,
    ctx: &OutputContext,
) -> Result<()> {
    let routes = client.list_routes(request).await?;
    ctx.print(&routes, route_rows)
}

fn object_rows(object: &Object) -> Vec<ObjectRow> {
    vec![ObjectRow {
        id: object.object_id,
        name: text_cell(object.name.as_deref()),
        group_id: object.group_id,
        private: bool_cell(object.is_private),
        color: text_cell(object.color_hex.as_deref()),
    }]
}

/// List objects
pub async fn objects(client: &MaponClient, ctx: &OutputContext) -> Result<()> {
    let objects = client.list_objects().await?;
    ctx.print(&objects, object_rows)
}

fn alert_rows(alert: &Alert) -> Vec<AlertRow> {
    vec![AlertRow {
        id: alert.alert_id,
        unit_id: alert.unit_id,
        driver_id: alert.driver_id,
        alert_type: text_cell(alert.alert_type.as_deref()),
        message: text_cell(alert.message.as_deref()),
        time: time_cell(alert.time.as_ref()),
        location: location_cell(alert.location.as_ref()),
    }]
}

/// List alerts
pub async fn alerts(
    client: &MaponClient,
    request: &ListAlertsRequest,
    ctx: &OutputContext,
) -> Result<()> {
    let alerts = client.list_alerts(request).await?;
    ctx.print(&alerts, alert_rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use mapon_client::mapon_core::{MovementStatus, UnitState, UnitType};

    #[test]
    fn test_location_cell() {
        assert_eq!(location_cell(None), "-");
        let location = Location::new(56.95, 24.1).with_address(Some("Riga".to_string()));
        assert_eq!(location_cell(Some(&location)), "56.95000,24.10000 (Riga)");
    }

    #[test]
    fn test_unit_row() {
        let unit = Unit {
            unit_id: 199,
            label: Some("Truck 12".to_string()),
            unit_type: Some(UnitType::Unrecognized("Hovercraft".to_string())),
            state: UnitState {
                movement_status: Some(MovementStatus::Driving),
                speed_kmh: Some(64),
                ..Default::default()
            },
            ..Default::default()
        };

        let row = unit_rows(&unit).remove(0);
        assert_eq!(row.id, 199);
        assert_eq!(row.label, "Truck 12");
        assert_eq!(row.number, "-");
        assert_eq!(row.unit_type, "Hovercraft");
        assert_eq!(row.status, "driving");
        assert_eq!(row.speed, "64");
    }

    #[test]
    fn test_driver_row() {
        let driver = Driver {
            driver_id: 5,
            name: Some("Anna".to_string()),
            surname: Some("Berzina".to_string()),
            blocked: true,
            ..Default::default()
        };
        let row = driver_rows(&driver).remove(0);
        assert_eq!(row.name, "Anna Berzina");
        assert_eq!(row.blocked, "Yes");
    }
}
