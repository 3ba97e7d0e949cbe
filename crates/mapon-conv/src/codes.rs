//! Mapping of vendor code strings to enums
//!
//! Empty input yields `None`. Anything non-empty that is not a known code
//! becomes the `Unrecognized` variant carrying the input unchanged.

use mapon_core::{FuelType, MovementStatus, RouteType, UnitType};

pub fn unit_type(raw: &str) -> Option<UnitType> {
    if raw.is_empty() {
        return None;
    }
    Some(match raw.to_lowercase().as_str() {
        "car" => UnitType::Car,
        "truck" => UnitType::Truck,
        "trailer" => UnitType::Trailer,
        "van" => UnitType::Van,
        "bus" => UnitType::Bus,
        "tractor" => UnitType::Tractor,
        _ => UnitType::Unrecognized(raw.to_string()),
    })
}

/// Fuel codes are single letters or names, matched after upper-casing
pub fn fuel_type(raw: &str) -> Option<FuelType> {
    if raw.is_empty() {
        return None;
    }
    Some(match raw.to_uppercase().as_str() {
        "P" => FuelType::Petrol,
        "D" => FuelType::Diesel,
        "G" => FuelType::Lpg,
        "E" => FuelType::Electric,
        "PROPANE" => FuelType::Propane,
        "LNG" => FuelType::Lng,
        "CNG" => FuelType::Cng,
        "ETHANOL" => FuelType::Ethanol,
        "HYDROGEN" => FuelType::Hydrogen,
        "HYBRID" => FuelType::Hybrid,
        "L" => FuelType::AgricultureFuel,
        _ => FuelType::Unrecognized(raw.to_string()),
    })
}

pub fn movement_status(raw: &str) -> Option<MovementStatus> {
    if raw.is_empty() {
        return None;
    }
    Some(match raw.to_lowercase().as_str() {
        "driving" => MovementStatus::Driving,
        "standing" => MovementStatus::Standing,
        "nodata" => MovementStatus::NoData,
        "nogps" => MovementStatus::NoGps,
        "service" => MovementStatus::Service,
        _ => MovementStatus::Unrecognized(raw.to_string()),
    })
}

pub fn route_type(raw: &str) -> Option<RouteType> {
    if raw.is_empty() {
        return None;
    }
    Some(match raw.to_lowercase().as_str() {
        "route" => RouteType::Route,
        "stop" => RouteType::Stop,
        _ => RouteType::Unrecognized(raw.to_string()),
    })
}
