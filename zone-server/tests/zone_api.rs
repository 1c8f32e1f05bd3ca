//! HTTP-level tests driving the full router on an in-memory database

use axum::Router;
use axum::body::Body;
use http::{Method, Request, StatusCode};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;

use zone_server::api::build_router;
use zone_server::db::DbService;
use zone_server::{Config, ErrorCode, ErrorResponse, ServerState};

async fn app() -> Router {
    let db = DbService::in_memory().await.unwrap();
    let config = Config::with_overrides("./target/zone-api-test", 0);
    build_router(ServerState::from_db(config, db))
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, value)
}

async fn create_property(app: &Router, address: &str, lat: Option<f64>, lng: Option<f64>) -> i64 {
    let (status, body) = send(
        app,
        Method::POST,
        "/api/properties",
        Some(json!({ "address": address, "latitude": lat, "longitude": lng })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    body["id"].as_i64().unwrap()
}

fn centro() -> Value {
    json!({
        "name": "Centro",
        "coordinates": [
            { "lat": 39.40, "lng": -0.41 },
            { "lat": 39.40, "lng": -0.39 },
            { "lat": 39.42, "lng": -0.39 },
            { "lat": 39.42, "lng": -0.41 }
        ]
    })
}

/// Activity entries are written by a background worker
async fn wait_for_activity(app: &Router, expected: u64) -> Value {
    for _ in 0..50 {
        let (_, body) = send(app, Method::GET, "/api/activity-log?limit=100", None).await;
        if body["total"].as_u64().unwrap_or(0) >= expected {
            return body;
        }
        tokio::time::sleep(std::time::Duration::from_millis(20)).await;
    }
    panic!("activity log never reached {expected} entries");
}

#[tokio::test]
async fn health_reports_database() {
    let app = app().await;
    let (status, body) = send(&app, Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["checks"]["database"]["status"], "ok");
}

#[tokio::test]
async fn creating_a_zone_assigns_properties_inside_it() {
    let app = app().await;
    let a = create_property(&app, "Plaza del Ayuntamiento 1", Some(39.41), Some(-0.40)).await;
    let b = create_property(&app, "Avenida de Blasco Ibáñez 20", Some(39.50), Some(-0.40)).await;
    let c = create_property(&app, "Calle sin geocodificar", None, Some(-0.40)).await;

    let (status, zone) = send(&app, Method::POST, "/api/zones", Some(centro())).await;
    assert_eq!(status, StatusCode::OK, "{zone}");
    let zone_id = zone["id"].as_i64().unwrap();
    assert_eq!(zone["color"], "#3388ff");
    assert_eq!(zone["coordinates"].as_array().unwrap().len(), 4);
    assert_eq!(zone["coordinates"][0]["lat"], 39.40);

    let (_, pa) = send(&app, Method::GET, &format!("/api/properties/{a}"), None).await;
    let (_, pb) = send(&app, Method::GET, &format!("/api/properties/{b}"), None).await;
    let (_, pc) = send(&app, Method::GET, &format!("/api/properties/{c}"), None).await;
    assert_eq!(pa["zone_id"], zone_id);
    assert!(pb["zone_id"].is_null());
    assert!(pc["zone_id"].is_null());

    let (status, members) = send(&app, Method::GET, &format!("/api/zones/{zone_id}/properties"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(members.as_array().unwrap().len(), 1);
    assert_eq!(members[0]["id"], a);

    let (_, filtered) = send(&app, Method::GET, &format!("/api/properties?zone_id={zone_id}"), None).await;
    assert_eq!(filtered.as_array().unwrap().len(), 1);

    // 3 property_created + zone_created + zone_properties_assigned
    let log = wait_for_activity(&app, 5).await;
    let actions: Vec<&str> = log["items"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["action"].as_str().unwrap())
        .collect();
    assert!(actions.contains(&"zone_created"));
    assert!(actions.contains(&"zone_properties_assigned"));
}

#[tokio::test]
async fn degenerate_polygon_is_rejected() {
    let app = app().await;
    let (status, body) = send(
        &app,
        Method::POST,
        "/api/zones",
        Some(json!({
            "name": "Line",
            "coordinates": [{ "lat": 0.0, "lng": 0.0 }, { "lat": 1.0, "lng": 1.0 }]
        })),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    let error: ErrorResponse = serde_json::from_value(body).unwrap();
    assert_eq!(ErrorCode::try_from(error.code), Ok(ErrorCode::InvalidPolygon));
    assert!(error.message.contains("3 vertices"), "{}", error.message);

    let (_, zones) = send(&app, Method::GET, "/api/zones", None).await;
    assert!(zones.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn unknown_ids_return_not_found() {
    let app = app().await;

    let (status, body) = send(&app, Method::GET, "/api/zones/123", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], 1001);

    let (status, body) = send(&app, Method::GET, "/api/properties/123", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], 2001);

    let (status, _) = send(&app, Method::PUT, "/api/zones/123", Some(json!({ "name": "x" }))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = send(&app, Method::DELETE, "/api/zones/123", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!(false));
}

#[tokio::test]
async fn polygon_edit_resweeps_membership() {
    let app = app().await;
    let a = create_property(&app, "Plaza del Ayuntamiento 1", Some(39.41), Some(-0.40)).await;
    let b = create_property(&app, "Calle de Sueca 30", Some(39.46), Some(-0.37)).await;

    let (_, zone) = send(&app, Method::POST, "/api/zones", Some(centro())).await;
    let zone_id = zone["id"].as_i64().unwrap();

    let (status, updated) = send(
        &app,
        Method::PUT,
        &format!("/api/zones/{zone_id}"),
        Some(json!({
            "coordinates": [
                { "lat": 39.45, "lng": -0.38 },
                { "lat": 39.45, "lng": -0.36 },
                { "lat": 39.47, "lng": -0.36 },
                { "lat": 39.47, "lng": -0.38 }
            ]
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{updated}");
    assert_eq!(updated["name"], "Centro");

    let (_, pa) = send(&app, Method::GET, &format!("/api/properties/{a}"), None).await;
    let (_, pb) = send(&app, Method::GET, &format!("/api/properties/{b}"), None).await;
    assert!(pa["zone_id"].is_null());
    assert_eq!(pb["zone_id"], zone_id);

    let (status, report) = send(&app, Method::POST, &format!("/api/zones/{zone_id}/sweep"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(report["members"], 1);
    assert_eq!(report["assigned"], 0);
    assert_eq!(report["released"], 0);
}

#[tokio::test]
async fn deleting_a_zone_releases_its_properties() {
    let app = app().await;
    let a = create_property(&app, "Plaza del Ayuntamiento 1", Some(39.41), Some(-0.40)).await;
    let (_, zone) = send(&app, Method::POST, "/api/zones", Some(centro())).await;
    let zone_id = zone["id"].as_i64().unwrap();

    let (status, body) = send(&app, Method::DELETE, &format!("/api/zones/{zone_id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!(true));

    let (_, pa) = send(&app, Method::GET, &format!("/api/properties/{a}"), None).await;
    assert!(pa["zone_id"].is_null());
    let (status, _) = send(&app, Method::GET, &format!("/api/zones/{zone_id}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn manual_assignment_round_trip() {
    let app = app().await;
    let (_, zone) = send(&app, Method::POST, "/api/zones", Some(centro())).await;
    let zone_id = zone["id"].as_i64().unwrap();
    let p = create_property(&app, "Calle Colón 4", None, None).await;
    let uri = format!("/api/properties/{p}/zone");

    for _ in 0..2 {
        let (status, body) = send(&app, Method::PUT, &uri, Some(json!({ "zone_id": zone_id }))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["zone_id"], zone_id);
    }

    let (status, body) = send(&app, Method::PUT, &uri, Some(json!({ "zone_id": null }))).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["zone_id"].is_null());

    let (status, body) = send(&app, Method::PUT, &uri, Some(json!({ "zone_id": zone_id + 1 }))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], 1001);
}

#[tokio::test]
async fn storing_a_location_does_not_change_zone() {
    let app = app().await;
    let p = create_property(&app, "Calle Colón 4", None, None).await;

    let (status, body) = send(
        &app,
        Method::PUT,
        &format!("/api/properties/{p}/location"),
        Some(json!({ "latitude": 39.41, "longitude": -0.40 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["latitude"], 39.41);
    assert!(body["zone_id"].is_null());

    let (status, body) = send(
        &app,
        Method::PUT,
        &format!("/api/properties/{p}/location"),
        Some(json!({ "latitude": 123.0, "longitude": -0.40 })),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["code"], 2002);
}

#[tokio::test]
async fn locate_returns_containing_zones() {
    let app = app().await;
    let (_, zone) = send(&app, Method::POST, "/api/zones", Some(centro())).await;

    let (status, hits) = send(&app, Method::GET, "/api/zones/locate?lat=39.41&lng=-0.40", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(hits.as_array().unwrap().len(), 1);
    assert_eq!(hits[0]["id"], zone["id"]);

    let (_, misses) = send(&app, Method::GET, "/api/zones/locate?lat=40.0&lng=-3.7", None).await;
    assert!(misses.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn activity_log_filters_by_action() {
    let app = app().await;
    create_property(&app, "Calle Colón 4", None, None).await;
    send(&app, Method::POST, "/api/zones", Some(centro())).await;
    wait_for_activity(&app, 2).await;

    let (status, body) = send(&app, Method::GET, "/api/activity-log?action=zone_created", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 1);
    assert_eq!(body["items"][0]["related_type"], "zone");
}

#[tokio::test]
async fn server_state_initializes_on_disk() {
    let dir = tempfile::tempdir().unwrap();
    let config = Config::with_overrides(dir.path().to_string_lossy(), 0);

    let state = ServerState::initialize(&config).await.unwrap();
    assert!(config.database_path().exists());

    let zone = state
        .engine
        .create_zone(serde_json::from_value(centro()).unwrap())
        .await
        .unwrap();
    assert_eq!(zone.name, "Centro");
}
