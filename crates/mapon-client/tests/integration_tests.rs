//! Integration tests for mapon-client
//!
//! These tests run the client against an in-process HTTP server serving
//! canned API envelopes, and against a socket-free static transport.

use axum::extract::RawQuery;
use axum::http::StatusCode;
use axum::routing::get;
use axum::Router;
use chrono::{TimeZone, Utc};
use mapon_client::testing::{
    canned_router, envelope, error_envelope, StaticTransport, TestServer, TEST_API_KEY,
};
use mapon_client::*;
use pretty_assertions::assert_eq;
use serde_json::json;

fn jan_first(hour: u32, min: u32) -> chrono::DateTime<Utc> {
    Utc.with_ymd_and_hms(2021, 1, 1, hour, min, 0).unwrap()
}

// =============================================================================
// Over HTTP
// =============================================================================

#[tokio::test]
async fn test_list_objects() {
    let router = canned_router([(
        "object/list",
        envelope(json!({"objects": [
            {"id": 100, "name": "Depot", "user_id": "1", "group_id": 0, "private": "Y"},
            {"id": 101, "name": "", "private": "N"}
        ]})),
    )]);
    let server = TestServer::start(router).await.unwrap();

    let objects = server.client.list_objects().await.unwrap();

    assert_eq!(objects.len(), 2);
    assert_eq!(objects[0].object_id, 100);
    assert_eq!(objects[0].name.as_deref(), Some("Depot"));
    assert!(objects[0].is_private);
    assert_eq!(objects[1].name, None);
    assert!(!objects[1].is_private);
}

#[tokio::test]
async fn test_list_ignitions() {
    let router = canned_router([(
        "unit_data/ignitions",
        envelope(json!({"units": [
            {"unit_id": 1, "ignitions": [
                {"on": "2021-01-01 10:00:00", "off": "2021-01-01 10:05:00"}
            ]}
        ]})),
    )]);
    let server = TestServer::start(router).await.unwrap();

    let request = ListIgnitionsRequest(UnitSeriesRequest::new(
        vec![1],
        jan_first(0, 0),
        jan_first(23, 0),
    ));
    let units = server.client.list_ignitions(&request).await.unwrap();

    assert_eq!(units.len(), 1);
    assert_eq!(units[0].unit_id, 1);
    assert_eq!(units[0].ignitions.len(), 1);
    assert_eq!(units[0].ignitions[0].off_time, Some(jan_first(10, 5)));
}

#[tokio::test]
async fn test_list_unit_groups_and_members() {
    let router = canned_router([
        (
            "unit_groups/list",
            envelope(json!([
                {"id": 1, "name": "All", "parent_id": null},
                {"id": 2, "name": "Trucks", "parent_id": "1"}
            ])),
        ),
        (
            "unit_groups/list_units",
            envelope(json!({"units": [{"id": 199}, {"id": 200}]})),
        ),
    ]);
    let server = TestServer::start(router).await.unwrap();

    let groups = server
        .client
        .list_unit_groups(&ListUnitGroupsRequest::default())
        .await
        .unwrap();
    assert_eq!(groups.len(), 2);
    assert_eq!(groups[0].parent_id, None);
    assert_eq!(groups[1].parent_id, Some(1));

    let members = server
        .client
        .list_units_in_group(&ListUnitsInGroupRequest { group_id: 2 })
        .await
        .unwrap();
    assert_eq!(members, vec![199, 200]);
}

#[tokio::test]
async fn test_api_error_is_tagged_with_operation() {
    let router = canned_router([("unit/list", error_envelope(1003, "Access denied"))]);
    let server = TestServer::start(router).await.unwrap();

    let err = server
        .client
        .list_units(&ListUnitsRequest::default())
        .await
        .unwrap_err();

    assert_eq!(err.api_code(), Some(1003));
    assert_eq!(err.operation(), Some("list units"));
    assert_eq!(err.to_string(), "mapon: list units: api error 1003: Access denied");
}

#[tokio::test]
async fn test_non_200_is_not_decoded() {
    let router = Router::new().route(
        "/driver/list.json",
        get(|| async { (StatusCode::UNAUTHORIZED, "{\"data\":[],\"error\":null}") }),
    );
    let server = TestServer::start(router).await.unwrap();

    let err = server
        .client
        .list_drivers(&ListDriversRequest::default())
        .await
        .unwrap_err();

    assert_eq!(err.http_status(), Some(401));
    assert_eq!(err.api_code(), None);
    assert!(err.to_string().starts_with("mapon: list drivers: unexpected HTTP status 401"));
}

#[tokio::test]
async fn test_unknown_path_is_http_error() {
    let server = TestServer::start(Router::new()).await.unwrap();

    let err = server.client.list_objects().await.unwrap_err();
    assert_eq!(err.http_status(), Some(404));
}

#[tokio::test]
async fn test_key_reaches_server() {
    let router = Router::new().route(
        "/driver/list.json",
        get(|RawQuery(query): RawQuery| async move {
            let query = query.unwrap_or_default();
            let body = if query.contains(&format!("key={}", TEST_API_KEY)) {
                json!({"data": {"drivers": [{"id": 5, "name": "Anna"}]}, "error": null})
            } else {
                json!({"data": null, "error": {"code": 1, "msg": "Wrong key"}})
            };
            body.to_string()
        }),
    );
    let server = TestServer::start(router).await.unwrap();

    let drivers = server
        .client
        .list_drivers(&ListDriversRequest::default())
        .await
        .unwrap();
    assert_eq!(drivers.len(), 1);

    server.shutdown().await;
}

// =============================================================================
// Static transport
// =============================================================================

#[tokio::test]
async fn test_request_url_and_query() {
    let (client, transport) = StaticTransport::json(&envelope(json!([])))
        .into_client()
        .unwrap();

    let request = ListAlertsRequest {
        from: jan_first(0, 0),
        till: jan_first(1, 0),
        unit_ids: vec![2, 1],
        driver_id: Some(9),
    };
    let alerts = client.list_alerts(&request).await.unwrap();
    assert!(alerts.is_empty());

    let sent = transport.requests();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].method, reqwest::Method::GET);
    assert_eq!(sent[0].url.path(), "/api/v1/alert/list.json");

    let pairs: Vec<(String, String)> = sent[0].url.query_pairs().into_owned().collect();
    let pair = |k: &str, v: &str| (k.to_string(), v.to_string());
    assert_eq!(
        pairs,
        vec![
            pair("driver", "9"),
            pair("from", "2021-01-01T00:00:00Z"),
            pair("include[]", "location"),
            pair("include[]", "address"),
            pair("include[]", "driver"),
            pair("key", TEST_API_KEY),
            pair("till", "2021-01-01T01:00:00Z"),
            pair("unit_id[]", "2"),
            pair("unit_id[]", "1"),
        ]
    );
}

#[tokio::test]
async fn test_tell_tales_for_requested_unit() {
    let body = envelope(json!({
        "7": [{"telltale_id": 3, "name": "Engine", "value": 1, "value_title": "Red",
               "datetime": "2021-01-01T10:00:00Z"}],
        "8": [{"telltale_id": 4, "value": 0}]
    }));
    let (client, _) = StaticTransport::json(&body).into_client().unwrap();

    let request = ListTellTaleValuesRequest {
        unit_id: 7,
        from: jan_first(0, 0),
        till: jan_first(12, 0),
    };
    let tell_tales = client.list_tell_tale_values(&request).await.unwrap();

    assert_eq!(tell_tales.unit_id, 7);
    assert_eq!(tell_tales.values.len(), 1);
    assert_eq!(tell_tales.values[0].value_title.as_deref(), Some("Red"));
    assert_eq!(tell_tales.values[0].time, Some(jan_first(10, 0)));
}

#[tokio::test]
async fn test_can_point_stamped_with_request_datetime() {
    let body = envelope(json!({"units": [
        {"unit_id": 1, "total_distance": {"gmt": "2021-01-01 09:59:00", "value": "1500"}}
    ]}));
    let (client, transport) = StaticTransport::json(&body).into_client().unwrap();

    let request = GetCanPointDataRequest {
        unit_id: 1,
        datetime: jan_first(10, 0),
    };
    let points = client.get_can_point_data(&request).await.unwrap();

    assert_eq!(points[0].time, jan_first(10, 0));
    assert_eq!(points[0].total_distance_km.as_ref().map(|m| m.value), Some(1500.0));
    assert!(transport.requests()[0]
        .url
        .query()
        .unwrap_or_default()
        .contains("datetime=2021-01-01T10%3A00%3A00Z"));
}

#[tokio::test]
async fn test_decode_error_names_endpoint() {
    let (client, _) = StaticTransport::new(200, "<html>oops</html>")
        .into_client()
        .unwrap();

    let err = client
        .get_unit_fields(&GetUnitFieldsRequest { unit_id: 1 })
        .await
        .unwrap_err();

    assert!(matches!(
        err.root(),
        MaponClientError::Decode { endpoint: "unit_data/fields", .. }
    ));
    assert!(err.to_string().starts_with("mapon: get unit fields: decode unit_data/fields response"));
}

#[tokio::test]
async fn test_transport_error_surfaces_unmodified() {
    let (client, transport) = StaticTransport::timing_out().into_client().unwrap();

    let err = client
        .get_driving_time_extended(&GetDrivingTimeExtendedRequest { unit_id: 1 })
        .await
        .unwrap_err();

    assert!(matches!(
        err.root(),
        MaponClientError::Transport(TransportError::Timeout)
    ));
    assert_eq!(err.to_string(), "mapon: get driving time extended: request timed out");
    assert_eq!(transport.requests().len(), 1);
}

#[tokio::test]
async fn test_missing_key_is_not_sent() {
    let transport = std::sync::Arc::new(StaticTransport::json(&envelope(json!({"objects": []}))));
    let client = MaponClient::with_transport(ClientConfig::new(), transport.clone()).unwrap();

    client.list_objects().await.unwrap();

    assert_eq!(transport.requests()[0].url.query(), None);
}

#[test]
fn test_blocking_usage_with_tokio_test() {
    let (client, _) = StaticTransport::json(&envelope(json!({"units": []})))
        .into_client()
        .unwrap();

    let units = tokio_test::block_on(client.list_units(&ListUnitsRequest {
        unit_ids: vec![1],
        include: vec!["fuel".to_string()],
    }))
    .unwrap();

    assert!(units.is_empty());
}
