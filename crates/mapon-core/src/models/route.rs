//! Route models

use serde::{Deserialize, Serialize};

use super::{RouteType, UnitState};

/// One trip segment or stop of a unit
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Route {
    pub route_id: i64,
    pub unit_id: i64,
    pub driver_id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub route_type: Option<RouteType>,
    pub distance_m: i64,
    pub avg_speed_kmh: f64,
    pub max_speed_kmh: f64,
    /// Encoded polyline of the driven path
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub polyline: Option<String>,
    pub start: UnitState,
    pub end: UnitState,
}

impl Route {
    pub fn is_stop(&self) -> bool {
        matches!(self.route_type, Some(RouteType::Stop))
    }
}
