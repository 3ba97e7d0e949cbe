//! Unit data commands - CAN telemetry, sensors, inputs, tachograph

use anyhow::Result;
use mapon_client::mapon_core::{
    AxisWeightMetricValue, CanDataPoint, CanMetricValue, DrivingPeriod, DrivingTime,
    UnitCanPeriod, UnitDebugInfo, UnitDigitalInputs, UnitDigitalInputsExtended, UnitFields,
    UnitHistoryPoint, UnitHumidity, UnitIbuttons, UnitIgnitions, UnitTemperatures,
};
use mapon_client::*;

use super::fleet::location_cell;
use crate::output::{
    opt_cell, text_cell, time_cell, DebugInfoRow, DrivingTimeRow, FieldRow, IbuttonRow,
    InputExtendedRow, IntervalRow, MetricRow, OutputContext, SensorRow,
};

// =============================================================================
// CAN
// =============================================================================

fn metric_row(unit_id: i64, metric: &str, m: &CanMetricValue) -> MetricRow {
    MetricRow {
        unit_id,
        metric: metric.to_string(),
        value: m.value.to_string(),
        time: time_cell(m.time.as_ref()),
    }
}

fn axis_row(unit_id: i64, w: &AxisWeightMetricValue) -> MetricRow {
    MetricRow {
        unit_id,
        metric: format!("weight_on_axis[{}/{}]", w.axis_id, w.wheel_id),
        value: w.value_kg.to_string(),
        time: time_cell(w.time.as_ref()),
    }
}

fn can_point_rows(point: &CanDataPoint) -> Vec<MetricRow> {
    let metrics = [
        ("rpm_average", &point.rpm_average),
        ("rpm_max", &point.rpm_max),
        ("fuel_level_percent", &point.fuel_level_percent),
        ("total_distance_km", &point.total_distance_km),
        ("total_fuel_l", &point.total_fuel_l),
        ("total_engine_hours", &point.total_engine_hours),
        ("ambient_temperature_c", &point.ambient_temperature_c),
    ];

    metrics
        .into_iter()
        .filter_map(|(name, m)| m.as_ref().map(|m| metric_row(point.unit_id, name, m)))
        .chain(point.axis_weights.iter().map(|w| axis_row(point.unit_id, w)))
        .collect()
}

fn can_period_rows(period: &UnitCanPeriod) -> Vec<MetricRow> {
    let series = [
        ("rpm_average", &period.rpm_average),
        ("rpm_max", &period.rpm_max),
        ("fuel_level_percent", &period.fuel_level_percent),
        ("service_distance_km", &period.service_distance_km),
        ("total_distance_km", &period.total_distance_km),
        ("total_fuel_l", &period.total_fuel_l),
        ("total_engine_hours", &period.total_engine_hours),
        ("ambient_temperature_c", &period.ambient_temperature_c),
        ("weight_on_chassis_total_kg", &period.weight_on_chassis_total_kg),
        ("ev_battery_rel_percent", &period.ev_battery_rel_percent),
        ("ev_battery_abs_kwh", &period.ev_battery_abs_kwh),
        ("ev_charging", &period.ev_charging),
    ];

    series
        .into_iter()
        .flat_map(|(name, values)| {
            values
                .iter()
                .map(move |m| metric_row(period.unit_id, name, m))
        })
        .chain(period.weight_on_axis.iter().map(|w| axis_row(period.unit_id, w)))
        .collect()
}

pub async fn can_point(
    client: &MaponClient,
    request: &GetCanPointDataRequest,
    ctx: &OutputContext,
) -> Result<()> {
    let points = client.get_can_point_data(request).await?;
    ctx.print(&points, can_point_rows)
}

pub async fn can_period(
    client: &MaponClient,
    request: &ListCanPeriodDataRequest,
    ctx: &OutputContext,
) -> Result<()> {
    let periods = client.list_can_period_data(request).await?;
    ctx.print(&periods, can_period_rows)
}

// =============================================================================
// Diagnostics
// =============================================================================

fn debug_info_rows(info: &UnitDebugInfo) -> Vec<DebugInfoRow> {
    vec![DebugInfoRow {
        unit_id: info.unit_id,
        fw_version: text_cell(info.fw_version.as_deref()),
        gps_status: text_cell(info.gps_status.as_deref()),
        last_location: location_cell(info.last_location.as_ref()),
        last_location_time: time_cell(info.last_location_time.as_ref()),
        can_total_distance: opt_cell(info.can_total_distance_km),
    }]
}

pub async fn debug_info(
    client: &MaponClient,
    request: &GetUnitDebugInfoRequest,
    ctx: &OutputContext,
) -> Result<()> {
    let infos = client.get_unit_debug_info(request).await?;
    ctx.print(&infos, debug_info_rows)
}

fn driving_time_rows(d: &DrivingTime) -> Vec<DrivingTimeRow> {
    let name = [d.driver_name.as_deref(), d.driver_surname.as_deref()]
        .into_iter()
        .flatten()
        .collect::<Vec<_>>()
        .join(" ");
    let driving = |p: Option<DrivingPeriod>| opt_cell(p.map(|p| p.driving_s));

    vec![DrivingTimeRow {
        driver_id: d.driver_id,
        name: if name.is_empty() { "-".to_string() } else { name },
        state: text_cell(d.current_state.as_deref()),
        today: driving(d.today),
        today_remaining: opt_cell(d.today.map(|p| p.driving_remaining_s)),
        week: driving(d.week),
    }]
}

pub async fn driving_time(
    client: &MaponClient,
    request: &GetDrivingTimeExtendedRequest,
    ctx: &OutputContext,
) -> Result<()> {
    let drivers = client.get_driving_time_extended(request).await?;
    ctx.print(&drivers, driving_time_rows)
}

fn field_rows(unit: &UnitFields) -> Vec<FieldRow> {
    unit.fields
        .iter()
        .map(|f| FieldRow {
            unit_id: unit.unit_id,
            key: f.key.clone(),
            value: f.value.clone(),
        })
        .collect()
}

pub async fn fields(
    client: &MaponClient,
    request: &GetUnitFieldsRequest,
    ctx: &OutputContext,
) -> Result<()> {
    let units = client.get_unit_fields(request).await?;
    ctx.print(&units, field_rows)
}

fn history_point_rows(point: &UnitHistoryPoint) -> Vec<MetricRow> {
    let mut rows: Vec<MetricRow> = [
        ("can_total_distance", &point.can_total_distance),
        ("mileage", &point.mileage),
    ]
    .into_iter()
    .filter_map(|(name, m)| m.as_ref().map(|m| metric_row(point.unit_id, name, m)))
    .collect();

    if point.position.is_some() {
        rows.push(MetricRow {
            unit_id: point.unit_id,
            metric: "position".to_string(),
            value: location_cell(point.position.as_ref()),
            time: time_cell(point.position_time.as_ref()),
        });
    }
    rows
}

pub async fn history_point(
    client: &MaponClient,
    request: &GetHistoryPointDataRequest,
    ctx: &OutputContext,
) -> Result<()> {
    let points = client.get_history_point_data(request).await?;
    ctx.print(&points, history_point_rows)
}

// =============================================================================
// Series
// =============================================================================

fn ignition_rows(unit: &UnitIgnitions) -> Vec<IntervalRow> {
    unit.ignitions
        .iter()
        .map(|e| IntervalRow {
            unit_id: unit.unit_id,
            input: "ignition".to_string(),
            on: time_cell(e.on_time.as_ref()),
            off: time_cell(e.off_time.as_ref()),
        })
        .collect()
}

pub async fn ignitions(
    client: &MaponClient,
    request: &ListIgnitionsRequest,
    ctx: &OutputContext,
) -> Result<()> {
    let units = client.list_ignitions(request).await?;
    ctx.print(&units, ignition_rows)
}

fn digital_input_rows(unit: &UnitDigitalInputs) -> Vec<IntervalRow> {
    unit.inputs
        .iter()
        .flat_map(|input| {
            input.events.iter().map(move |e| IntervalRow {
                unit_id: unit.unit_id,
                input: input.input_number.to_string(),
                on: time_cell(e.on_time.as_ref()),
                off: time_cell(e.off_time.as_ref()),
            })
        })
        .collect()
}

pub async fn digital_inputs(
    client: &MaponClient,
    request: &ListDigitalInputsRequest,
    ctx: &OutputContext,
) -> Result<()> {
    let units = client.list_digital_inputs(request).await?;
    ctx.print(&units, digital_input_rows)
}

fn digital_input_extended_rows(unit: &UnitDigitalInputsExtended) -> Vec<InputExtendedRow> {
    unit.inputs
        .iter()
        .flat_map(|input| {
            input.events.iter().map(move |e| InputExtendedRow {
                unit_id: unit.unit_id,
                input_id: input.input_id,
                label: text_cell(input.label.as_deref()),
                on: time_cell(e.on_time.as_ref()),
                off: time_cell(e.off_time.as_ref()),
                distance_m: e.distance_m,
                driver_id: e.driver_id,
            })
        })
        .collect()
}

pub async fn digital_inputs_extended(
    client: &MaponClient,
    request: &ListDigitalInputsExtendedRequest,
    ctx: &OutputContext,
) -> Result<()> {
    let units = client.list_digital_inputs_extended(request).await?;
    ctx.print(&units, digital_input_extended_rows)
}

fn temperature_rows(unit: &UnitTemperatures) -> Vec<SensorRow> {
    unit.sensors
        .iter()
        .flat_map(|sensor| {
            sensor.records.iter().map(move |r| SensorRow {
                unit_id: unit.unit_id,
                sensor: sensor.sensor_number,
                value: r.value_c,
                time: time_cell(r.time.as_ref()),
            })
        })
        .collect()
}

pub async fn temperatures(
    client: &MaponClient,
    request: &ListTemperaturesRequest,
    ctx: &OutputContext,
) -> Result<()> {
    let units = client.list_temperatures(request).await?;
    ctx.print(&units, temperature_rows)
}

fn humidity_rows(unit: &UnitHumidity) -> Vec<SensorRow> {
    unit.sensors
        .iter()
        .flat_map(|sensor| {
            sensor.records.iter().map(move |r| SensorRow {
                unit_id: unit.unit_id,
                sensor: sensor.sensor_number,
                value: r.value_percent,
                time: time_cell(r.time.as_ref()),
            })
        })
        .collect()
}

pub async fn humidity(
    client: &MaponClient,
    request: &ListHumidityRequest,
    ctx: &OutputContext,
) -> Result<()> {
    let units = client.list_humidity(request).await?;
    ctx.print(&units, humidity_rows)
}

fn ibutton_rows(unit: &UnitIbuttons) -> Vec<IbuttonRow> {
    unit.ibuttons
        .iter()
        .map(|e| IbuttonRow {
            unit_id: unit.unit_id,
            value: text_cell(e.value.as_deref()),
            time: time_cell(e.time.as_ref()),
        })
        .collect()
}

pub async fn ibuttons(
    client: &MaponClient,
    request: &ListIbuttonsRequest,
    ctx: &OutputContext,
) -> Result<()> {
    let units = client.list_ibuttons(request).await?;
    ctx.print(&units, ibutton_rows)
}
