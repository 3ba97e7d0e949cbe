//! Golden-file tests for the response mappers
//!
//! Each fixture `testdata/<endpoint>/<case>.json` is decoded and serialized
//! back to JSON; the result must equal `<case>.golden.json` as a JSON value. Run with `MAPON_UPDATE_GOLDEN=1` to rewrite the
//! golden files after an intentional change.

use std::fs;
use std::path::PathBuf;

use chrono::{TimeZone, Utc};
use mapon_conv::*;
use pretty_assertions::assert_eq;
use serde::Serialize;

fn testdata(endpoint: &str, file: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/testdata")
        .join(endpoint)
        .join(file)
}

fn check_golden<T, F>(endpoint: &str, case: &str, decode: F)
where
    T: Serialize,
    F: FnOnce(&[u8]) -> ConvResult<T>,
{
    let input = fs::read(testdata(endpoint, &format!("{case}.json")))
        .unwrap_or_else(|e| panic!("read fixture {endpoint}/{case}: {e}"));
    let decoded = decode(&input).unwrap_or_else(|e| panic!("decode {endpoint}/{case}: {e}"));
    let actual = serde_json::to_value(&decoded).unwrap();

    let golden_path = testdata(endpoint, &format!("{case}.golden.json"));
    if std::env::var_os("MAPON_UPDATE_GOLDEN").is_some() {
        let pretty = serde_json::to_string_pretty(&actual).unwrap();
        fs::write(&golden_path, format!("{pretty}\n")).unwrap();
        return;
    }

    let expected = fs::read(&golden_path)
        .unwrap_or_else(|e| panic!("read golden {endpoint}/{case}: {e}"));
    let expected: serde_json::Value = serde_json::from_slice(&expected).unwrap();
    assert_eq!(actual, expected);
}

#[test]
fn test_golden_unit_list() {
    check_golden("unit/list", "basic", parse_units_response);
}

#[test]
fn test_golden_route_list() {
    check_golden("route/list", "mixed", parse_routes_response);
}

#[test]
fn test_golden_ignitions() {
    check_golden("unit_data/ignitions", "basic", parse_ignitions_response);
}

#[test]
fn test_golden_can_period() {
    check_golden("unit_data/can_period", "string_values", parse_can_period_response);
}

#[test]
fn test_golden_unit_fields() {
    check_golden("unit_data/fields", "mixed_values", parse_unit_fields_response);
}

#[test]
fn test_golden_can_point() {
    let datetime = Utc.with_ymd_and_hms(2021, 3, 1, 12, 0, 0).unwrap();
    check_golden("unit_data/can_point", "basic", |body| {
        parse_can_point_response(body, datetime)
    });
}

#[test]
fn test_error_fixture_short_circuits() {
    let body = fs::read(testdata("alert/list", "api_error.json")).unwrap();
    match parse_alerts_response(&body) {
        Err(ConvError::Api { code, message }) => {
            assert_eq!(code, 1003);
            assert_eq!(message, "Access denied");
        }
        other => panic!("expected api error, got {other:?}"),
    }
}
