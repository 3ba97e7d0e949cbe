//! Typed requests and their query encoding
//!
//! Every API operation is described by one request struct implementing
//! [`Endpoint`]: the operation name used in error messages, the path under
//! the base URL, how the struct turns into query parameters, and which
//! decoder in [`mapon_conv`] reads the response.

use chrono::{DateTime, Utc};
use mapon_conv::{ConvResult, format_rfc3339};
use mapon_core::{
    Alert, CanDataPoint, Driver, DrivingTime, Object, Route, Unit, UnitCanPeriod, UnitDebugInfo,
    UnitDigitalInputs, UnitDigitalInputsExtended, UnitFields, UnitGroup, UnitHistoryPoint,
    UnitHumidity, UnitIbuttons, UnitIgnitions, UnitTellTales, UnitTemperatures,
};

// =============================================================================
// Query encoding
// =============================================================================

/// Query parameters of one request.
///
/// Encoded sorted by key, stable for repeated keys, so the same request
/// always yields the same URL.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct QueryParams {
    pairs: Vec<(String, String)>,
}

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a scalar `key=value`
    pub fn push(&mut self, key: &str, value: impl ToString) -> &mut Self {
        self.pairs.push((key.to_string(), value.to_string()));
        self
    }

    /// Add a timestamp as RFC3339 UTC with second precision
    pub fn push_time(&mut self, key: &str, time: &DateTime<Utc>) -> &mut Self {
        self.push(key, format_rfc3339(time))
    }

    /// Add one `key[]=value` per element
    pub fn push_list<T: ToString>(&mut self, key: &str, values: &[T]) -> &mut Self {
        let key = format!("{}[]", key);
        for value in values {
            self.pairs.push((key.clone(), value.to_string()));
        }
        self
    }

    pub fn pairs(&self) -> &[(String, String)] {
        &self.pairs
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Form-urlencode, sorted by key
    pub fn encode(&self) -> String {
        let mut sorted: Vec<&(String, String)> = self.pairs.iter().collect();
        sorted.sort_by(|a, b| a.0.cmp(&b.0));

        let mut serializer = url::form_urlencoded::Serializer::new(String::new());
        for (key, value) in sorted {
            serializer.append_pair(key, value);
        }
        serializer.finish()
    }
}

/// One API operation
pub trait Endpoint {
    type Output;

    /// Name used to prefix errors, e.g. `list units`
    const OPERATION: &'static str;
    /// Path under the base URL, without the `.json` suffix
    const PATH: &'static str;

    fn query(&self) -> QueryParams;

    fn decode(&self, body: &[u8]) -> ConvResult<Self::Output>;
}

// =============================================================================
// Fleet
// =============================================================================

#[derive(Debug, Default, Clone, PartialEq)]
pub struct ListUnitsRequest {
    pub unit_ids: Vec<i64>,
    /// Extra blocks to include, e.g. `fuel`, `drivers`, `location`
    pub include: Vec<String>,
}

impl Endpoint for ListUnitsRequest {
    type Output = Vec<Unit>;
    const OPERATION: &'static str = "list units";
    const PATH: &'static str = mapon_conv::unit::ENDPOINT;

    fn query(&self) -> QueryParams {
        let mut params = QueryParams::new();
        params
            .push_list("unit_id", &self.unit_ids)
            .push_list("include", &self.include);
        params
    }

    fn decode(&self, body: &[u8]) -> ConvResult<Self::Output> {
        mapon_conv::parse_units_response(body)
    }
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct ListDriversRequest {
    /// Restrict to one driver
    pub driver_id: Option<i64>,
}

impl Endpoint for ListDriversRequest {
    type Output = Vec<Driver>;
    const OPERATION: &'static str = "list drivers";
    const PATH: &'static str = mapon_conv::driver::ENDPOINT;

    fn query(&self) -> QueryParams {
        let mut params = QueryParams::new();
        if let Some(id) = self.driver_id.filter(|id| *id != 0) {
            params.push("id", id);
        }
        params
    }

    fn decode(&self, body: &[u8]) -> ConvResult<Self::Output> {
        mapon_conv::parse_drivers_response(body)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ListRoutesRequest {
    pub from: DateTime<Utc>,
    pub till: DateTime<Utc>,
    pub unit_ids: Vec<i64>,
    /// Extra blocks to include, e.g. `polyline`
    pub include: Vec<String>,
}

impl Endpoint for ListRoutesRequest {
    type Output = Vec<Route>;
    const OPERATION: &'static str = "list routes";
    const PATH: &'static str = mapon_conv::route::ENDPOINT;

    fn query(&self) -> QueryParams {
        let mut params = QueryParams::new();
        params
            .push_time("from", &self.from)
            .push_time("till", &self.till)
            .push_list("unit_id", &self.unit_ids)
            .push_list("include", &self.include);
        params
    }

    fn decode(&self, body: &[u8]) -> ConvResult<Self::Output> {
        mapon_conv::parse_routes_response(body)
    }
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct ListObjectsRequest;

impl Endpoint for ListObjectsRequest {
    type Output = Vec<Object>;
    const OPERATION: &'static str = "list objects";
    const PATH: &'static str = mapon_conv::object::ENDPOINT;

    fn query(&self) -> QueryParams {
        QueryParams::new()
    }

    fn decode(&self, body: &[u8]) -> ConvResult<Self::Output> {
        mapon_conv::parse_objects_response(body)
    }
}

/// Detail blocks always requested for alerts
const ALERT_INCLUDES: [&str; 3] = ["location", "address", "driver"];

#[derive(Debug, Clone, PartialEq)]
pub struct ListAlertsRequest {
    pub from: DateTime<Utc>,
    pub till: DateTime<Utc>,
    pub unit_ids: Vec<i64>,
    pub driver_id: Option<i64>,
}

impl Endpoint for ListAlertsRequest {
    type Output = Vec<Alert>;
    const OPERATION: &'static str = "list alerts";
    const PATH: &'static str = mapon_conv::alert::ENDPOINT;

    fn query(&self) -> QueryParams {
        let mut params = QueryParams::new();
        params
            .push_time("from", &self.from)
            .push_time("till", &self.till)
            .push_list("unit_id", &self.unit_ids);
        if let Some(id) = self.driver_id.filter(|id| *id != 0) {
            params.push("driver", id);
        }
        params.push_list("include", &ALERT_INCLUDES);
        params
    }

    fn decode(&self, body: &[u8]) -> ConvResult<Self::Output> {
        mapon_conv::parse_alerts_response(body)
    }
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct ListUnitGroupsRequest {
    /// Only groups containing this unit
    pub unit_id: Option<i64>,
}

impl Endpoint for ListUnitGroupsRequest {
    type Output = Vec<UnitGroup>;
    const OPERATION: &'static str = "list unit groups";
    const PATH: &'static str = mapon_conv::group::GROUPS_ENDPOINT;

    fn query(&self) -> QueryParams {
        let mut params = QueryParams::new();
        if let Some(id) = self.unit_id.filter(|id| *id != 0) {
            params.push("unit_id", id);
        }
        params
    }

    fn decode(&self, body: &[u8]) -> ConvResult<Self::Output> {
        mapon_conv::parse_unit_groups_response(body)
    }
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct ListUnitsInGroupRequest {
    pub group_id: i64,
}

impl Endpoint for ListUnitsInGroupRequest {
    type Output = Vec<i64>;
    const OPERATION: &'static str = "list units in group";
    const PATH: &'static str = mapon_conv::group::GROUP_UNITS_ENDPOINT;

    fn query(&self) -> QueryParams {
        let mut params = QueryParams::new();
        params.push("id", self.group_id);
        params
    }

    fn decode(&self, body: &[u8]) -> ConvResult<Self::Output> {
        mapon_conv::parse_units_in_group_response(body)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ListTellTaleValuesRequest {
    pub unit_id: i64,
    pub from: DateTime<Utc>,
    pub till: DateTime<Utc>,
}

impl Endpoint for ListTellTaleValuesRequest {
    type Output = UnitTellTales;
    const OPERATION: &'static str = "list tell tale values";
    const PATH: &'static str = mapon_conv::telltale::ENDPOINT;

    fn query(&self) -> QueryParams {
        let mut params = QueryParams::new();
        params
            .push("unit_id", self.unit_id)
            .push_time("from", &self.from)
            .push_time("till", &self.till);
        params
    }

    fn decode(&self, body: &[u8]) -> ConvResult<Self::Output> {
        mapon_conv::parse_tell_tales_response(body, self.unit_id)
    }
}

// =============================================================================
// Unit data: point lookups
// =============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct GetCanPointDataRequest {
    pub unit_id: i64,
    pub datetime: DateTime<Utc>,
}

impl Endpoint for GetCanPointDataRequest {
    type Output = Vec<CanDataPoint>;
    const OPERATION: &'static str = "get can point data";
    const PATH: &'static str = mapon_conv::can::POINT_ENDPOINT;

    fn query(&self) -> QueryParams {
        let mut params = QueryParams::new();
        params
            .push("unit_id", self.unit_id)
            .push_time("datetime", &self.datetime);
        params
    }

    fn decode(&self, body: &[u8]) -> ConvResult<Self::Output> {
        mapon_conv::parse_can_point_response(body, self.datetime)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ListCanPeriodDataRequest {
    pub unit_id: i64,
    pub from: DateTime<Utc>,
    pub till: DateTime<Utc>,
    pub include: Vec<String>,
}

impl Endpoint for ListCanPeriodDataRequest {
    type Output = Vec<UnitCanPeriod>;
    const OPERATION: &'static str = "list can period data";
    const PATH: &'static str = mapon_conv::can::PERIOD_ENDPOINT;

    fn query(&self) -> QueryParams {
        let mut params = QueryParams::new();
        params
            .push("unit_id", self.unit_id)
            .push_time("from", &self.from)
            .push_time("till", &self.till)
            .push_list("include", &self.include);
        params
    }

    fn decode(&self, body: &[u8]) -> ConvResult<Self::Output> {
        mapon_conv::parse_can_period_response(body)
    }
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct GetUnitDebugInfoRequest {
    pub unit_ids: Vec<i64>,
}

impl Endpoint for GetUnitDebugInfoRequest {
    type Output = Vec<UnitDebugInfo>;
    const OPERATION: &'static str = "get unit debug info";
    const PATH: &'static str = mapon_conv::diagnostics::DEBUG_INFO_ENDPOINT;

    fn query(&self) -> QueryParams {
        let mut params = QueryParams::new();
        params.push_list("unit_id", &self.unit_ids);
        params
    }

    fn decode(&self, body: &[u8]) -> ConvResult<Self::Output> {
        mapon_conv::parse_debug_info_response(body)
    }
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct GetDrivingTimeExtendedRequest {
    pub unit_id: i64,
}

impl Endpoint for GetDrivingTimeExtendedRequest {
    type Output = Vec<DrivingTime>;
    const OPERATION: &'static str = "get driving time extended";
    const PATH: &'static str = mapon_conv::diagnostics::DRIVING_TIME_ENDPOINT;

    fn query(&self) -> QueryParams {
        let mut params = QueryParams::new();
        params.push("unit_id", self.unit_id);
        params
    }

    fn decode(&self, body: &[u8]) -> ConvResult<Self::Output> {
        mapon_conv::parse_driving_time_response(body)
    }
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct GetUnitFieldsRequest {
    pub unit_id: i64,
}

impl Endpoint for GetUnitFieldsRequest {
    type Output = Vec<UnitFields>;
    const OPERATION: &'static str = "get unit fields";
    const PATH: &'static str = mapon_conv::diagnostics::FIELDS_ENDPOINT;

    fn query(&self) -> QueryParams {
        let mut params = QueryParams::new();
        params.push("unit_id", self.unit_id);
        params
    }

    fn decode(&self, body: &[u8]) -> ConvResult<Self::Output> {
        mapon_conv::parse_unit_fields_response(body)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GetHistoryPointDataRequest {
    pub unit_id: i64,
    pub datetime: DateTime<Utc>,
    /// e.g. `can_total_distance`, `mileage`, `position`
    pub include: Vec<String>,
}

impl Endpoint for GetHistoryPointDataRequest {
    type Output = Vec<UnitHistoryPoint>;
    const OPERATION: &'static str = "get history point data";
    const PATH: &'static str = mapon_conv::diagnostics::HISTORY_POINT_ENDPOINT;

    fn query(&self) -> QueryParams {
        let mut params = QueryParams::new();
        params
            .push("unit_id", self.unit_id)
            .push_time("datetime", &self.datetime)
            .push_list("include", &self.include);
        params
    }

    fn decode(&self, body: &[u8]) -> ConvResult<Self::Output> {
        mapon_conv::parse_history_point_response(body)
    }
}

// =============================================================================
// Unit data: time series
// =============================================================================

/// Units and time range shared by the series feeds
#[derive(Debug, Clone, PartialEq)]
pub struct UnitSeriesRequest {
    pub unit_ids: Vec<i64>,
    pub from: DateTime<Utc>,
    pub till: DateTime<Utc>,
}

impl UnitSeriesRequest {
    pub fn new(unit_ids: Vec<i64>, from: DateTime<Utc>, till: DateTime<Utc>) -> Self {
        Self {
            unit_ids,
            from,
            till,
        }
    }

    fn query(&self) -> QueryParams {
        let mut params = QueryParams::new();
        params
            .push_list("unit_id", &self.unit_ids)
            .push_time("from", &self.from)
            .push_time("till", &self.till);
        params
    }
}

macro_rules! series_endpoint {
    ($(#[$meta:meta])* $name:ident, $output:ty, $operation:literal, $path:path, $decode:path) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq)]
        pub struct $name(pub UnitSeriesRequest);

        impl From<UnitSeriesRequest> for $name {
            fn from(series: UnitSeriesRequest) -> Self {
                Self(series)
            }
        }

        impl Endpoint for $name {
            type Output = Vec<$output>;
            const OPERATION: &'static str = $operation;
            const PATH: &'static str = $path;

            fn query(&self) -> QueryParams {
                self.0.query()
            }

            fn decode(&self, body: &[u8]) -> ConvResult<Self::Output> {
                $decode(body)
            }
        }
    };
}

series_endpoint!(
    ListDigitalInputsRequest,
    UnitDigitalInputs,
    "list digital inputs",
    mapon_conv::series::DIGITAL_INPUTS_ENDPOINT,
    mapon_conv::parse_digital_inputs_response
);

series_endpoint!(
    ListHumidityRequest,
    UnitHumidity,
    "list humidity",
    mapon_conv::series::HUMIDITY_ENDPOINT,
    mapon_conv::parse_humidity_response
);

series_endpoint!(
    /// iButton (driver key) attach events
    ListIbuttonsRequest,
    UnitIbuttons,
    "list ibuttons",
    mapon_conv::series::IBUTTONS_ENDPOINT,
    mapon_conv::parse_ibuttons_response
);

series_endpoint!(
    ListIgnitionsRequest,
    UnitIgnitions,
    "list ignitions",
    mapon_conv::series::IGNITIONS_ENDPOINT,
    mapon_conv::parse_ignitions_response
);

series_endpoint!(
    ListTemperaturesRequest,
    UnitTemperatures,
    "list temperatures",
    mapon_conv::series::TEMPERATURE_ENDPOINT,
    mapon_conv::parse_temperatures_response
);

#[derive(Debug, Clone, PartialEq)]
pub struct ListDigitalInputsExtendedRequest {
    pub unit_ids: Vec<i64>,
    pub input_ids: Vec<i64>,
    pub from: DateTime<Utc>,
    pub till: DateTime<Utc>,
}

impl Endpoint for ListDigitalInputsExtendedRequest {
    type Output = Vec<UnitDigitalInputsExtended>;
    const OPERATION: &'static str = "list digital inputs extended";
    const PATH: &'static str = mapon_conv::series::DIGITAL_INPUTS_EXTENDED_ENDPOINT;

    fn query(&self) -> QueryParams {
        let mut params = QueryParams::new();
        params
            .push_list("unit_id", &self.unit_ids)
            .push_list("input_id", &self.input_ids)
            .push_time("from", &self.from)
            .push_time("till", &self.till)
            .push_list("include", &["label"]);
        params
    }

    fn decode(&self, body: &[u8]) -> ConvResult<Self::Output> {
        mapon_conv::parse_digital_inputs_extended_response(body)
    }
}
