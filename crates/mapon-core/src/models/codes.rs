//! Vendor code enumerations
//!
//! Each enum keeps an `Unrecognized` variant holding the exact string the API
//! sent. A field that the API left empty is modelled as `None` on the owning
//! record, never as one of these variants.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Kind of vehicle or asset
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnitType {
    Car,
    Truck,
    Trailer,
    Van,
    Bus,
    Tractor,
    Unrecognized(String),
}

impl UnitType {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Car => "car",
            Self::Truck => "truck",
            Self::Trailer => "trailer",
            Self::Van => "van",
            Self::Bus => "bus",
            Self::Tractor => "tractor",
            Self::Unrecognized(raw) => raw,
        }
    }

    pub fn is_unrecognized(&self) -> bool {
        matches!(self, Self::Unrecognized(_))
    }
}

impl fmt::Display for UnitType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fuel a unit runs on
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FuelType {
    Petrol,
    Diesel,
    Lpg,
    Electric,
    Propane,
    Lng,
    Cng,
    Ethanol,
    Hydrogen,
    Hybrid,
    AgricultureFuel,
    Unrecognized(String),
}

impl FuelType {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Petrol => "petrol",
            Self::Diesel => "diesel",
            Self::Lpg => "lpg",
            Self::Electric => "electric",
            Self::Propane => "propane",
            Self::Lng => "lng",
            Self::Cng => "cng",
            Self::Ethanol => "ethanol",
            Self::Hydrogen => "hydrogen",
            Self::Hybrid => "hybrid",
            Self::AgricultureFuel => "agriculture_fuel",
            Self::Unrecognized(raw) => raw,
        }
    }

    pub fn is_unrecognized(&self) -> bool {
        matches!(self, Self::Unrecognized(_))
    }
}

impl fmt::Display for FuelType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Movement state reported for a unit
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MovementStatus {
    Driving,
    Standing,
    NoData,
    NoGps,
    Service,
    Unrecognized(String),
}

impl MovementStatus {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Driving => "driving",
            Self::Standing => "standing",
            Self::NoData => "no_data",
            Self::NoGps => "no_gps",
            Self::Service => "service",
            Self::Unrecognized(raw) => raw,
        }
    }

    pub fn is_unrecognized(&self) -> bool {
        matches!(self, Self::Unrecognized(_))
    }
}

impl fmt::Display for MovementStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether a route segment was a trip or a stop
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RouteType {
    Route,
    Stop,
    Unrecognized(String),
}

impl RouteType {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Route => "route",
            Self::Stop => "stop",
            Self::Unrecognized(raw) => raw,
        }
    }

    pub fn is_unrecognized(&self) -> bool {
        matches!(self, Self::Unrecognized(_))
    }
}

impl fmt::Display for RouteType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_variant_serializes_as_string() {
        let json = serde_json::to_string(&FuelType::AgricultureFuel).unwrap();
        assert_eq!(json, r#""agriculture_fuel""#);
    }

    #[test]
    fn test_unrecognized_keeps_raw_value() {
        let kind = UnitType::Unrecognized("Hovercraft".to_string());
        assert!(kind.is_unrecognized());
        assert_eq!(kind.to_string(), "Hovercraft");
        assert_eq!(
            serde_json::to_string(&kind).unwrap(),
            r#"{"unrecognized":"Hovercraft"}"#
        );
    }

    #[test]
    fn test_unrecognized_round_trips_through_serde() {
        let status = MovementStatus::Unrecognized("towing".to_string());
        let json = serde_json::to_string(&status).unwrap();
        let back: MovementStatus = serde_json::from_str(&json).unwrap();
        assert_eq!(back, status);
    }
}
