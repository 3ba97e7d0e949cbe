//! mapon-conv - Response decoding for the Mapon fleet telematics API
//!
//! Turns raw `application/json` bodies from the Mapon REST API into the typed
//! records of [`mapon_core`]. The API is loosely typed: numbers arrive as
//! strings, empty objects arrive as `[]`, and timestamps come in two formats.
//! Every quirk is absorbed here so callers only ever see clean domain values.
//!
//! # Features
//!
//! - **Envelope handling** - a populated `error` always wins over `data`
//! - **Tolerant coercion** - `"12.5"` and `12.5` decode to the same value
//! - **Unrecognized codes kept** - unknown enum strings are preserved verbatim
//! - **Soft failures** - a bad timestamp drops one field, never the record
//!
//! # Quick Start
//!
//! ```rust
//! use mapon_conv::parse_ignitions_response;
//!
//! let body = br#"{"data":{"units":[{"unit_id":1,"ignitions":[
//!     {"on":"2021-01-01 10:00:00","off":"2021-01-01 10:05:00"}]}]},"error":null}"#;
//!
//! let units = parse_ignitions_response(body).unwrap();
//! assert_eq!(units[0].unit_id, 1);
//! assert!(units[0].ignitions[0].off_time.is_some());
//! ```
//!
//! # Timestamp Formats
//!
//! | Source | Format |
//! |--------|--------|
//! | `unit/list`, `route/list`, `alert/list`, `tell_tale/values` | RFC3339 |
//! | `unit_data/*` series, `driver/list` `created`, saved values | `YYYY-MM-DD HH:MM:SS` (UTC) |

pub mod alert;
pub mod can;
pub mod codes;
mod de;
pub mod diagnostics;
pub mod driver;
pub mod envelope;
pub mod error;
pub mod group;
pub mod object;
pub mod route;
pub mod scalar;
pub mod series;
pub mod telltale;
pub mod time;
pub mod unit;

// Re-export main entry points
pub use alert::parse_alerts_response;
pub use can::{parse_can_period_response, parse_can_point_response};
pub use diagnostics::{
    parse_debug_info_response, parse_driving_time_response, parse_history_point_response,
    parse_unit_fields_response,
};
pub use driver::parse_drivers_response;
pub use envelope::decode_envelope;
pub use error::{ConvError, ConvResult};
pub use group::{parse_unit_groups_response, parse_units_in_group_response};
pub use object::parse_objects_response;
pub use route::parse_routes_response;
pub use scalar::JsonScalar;
pub use series::{
    parse_digital_inputs_extended_response, parse_digital_inputs_response,
    parse_humidity_response, parse_ibuttons_response, parse_ignitions_response,
    parse_temperatures_response,
};
pub use telltale::parse_tell_tales_response;
pub use time::{format_rfc3339, parse_local, parse_rfc3339};
pub use unit::parse_units_response;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::error::{ConvError, ConvResult};
    pub use crate::scalar::JsonScalar;
    pub use crate::time::format_rfc3339;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_is_uniform_across_endpoints() {
        let body = br#"{"data":{"units":[]},"error":{"code":1,"msg":"Wrong key"}}"#;

        assert_eq!(parse_units_response(body).unwrap_err().api_code(), Some(1));
        assert_eq!(parse_routes_response(body).unwrap_err().api_code(), Some(1));
        assert_eq!(parse_ignitions_response(body).unwrap_err().api_code(), Some(1));
        assert_eq!(parse_unit_fields_response(body).unwrap_err().api_code(), Some(1));
        assert_eq!(
            parse_tell_tales_response(body, 1).unwrap_err().api_code(),
            Some(1)
        );
    }

    #[test]
    fn test_missing_data_is_empty_everywhere() {
        let body = br#"{"error":null}"#;

        assert!(parse_units_response(body).unwrap().is_empty());
        assert!(parse_drivers_response(body).unwrap().is_empty());
        assert!(parse_alerts_response(body).unwrap().is_empty());
        assert!(parse_unit_groups_response(body).unwrap().is_empty());
        assert!(parse_driving_time_response(body).unwrap().is_empty());
        assert!(parse_temperatures_response(body).unwrap().is_empty());
    }

    #[test]
    fn test_decode_error_names_endpoint() {
        let err = parse_objects_response(b"<html>").unwrap_err();
        assert!(err.to_string().starts_with("decode object/list response"));
    }
}
