//! HTTP API tests driving the full router over in-memory stores.
//!
//! Every test builds a fresh router with empty stores and a fixed clock
//! (`2025-01-01T00:00:00Z`), so assigned ids and timestamps are deterministic.

#![allow(clippy::unwrap_used, clippy::expect_used)] // Test code uses unwrap for brevity

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use ride_request_core::LinkBuilder;
use ride_request_testing::{in_memory_stores, test_clock};
use ride_request_web::{build_router, AppState, CORRELATION_ID_HEADER};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

fn app() -> Router {
    app_with_links(LinkBuilder::default())
}

fn app_with_links(links: LinkBuilder) -> Router {
    let state = AppState::new(in_memory_stores(), Arc::new(test_clock()), links);
    build_router(state)
}

/// Send a request and decode the JSON response body (`Value::Null` if empty).
async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();

    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("response body should be JSON")
    };

    (status, value)
}

/// Send a raw body with an explicit content type.
async fn send_raw(app: &Router, method: Method, uri: &str, body: &'static str) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body))
        .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();

    (status, serde_json::from_slice(&bytes).expect("error body should be JSON"))
}

async fn create_passenger(app: &Router, name: &str) -> Value {
    let (status, body) = send(app, Method::POST, "/passengers", Some(json!({ "name": name }))).await;
    assert_eq!(status, StatusCode::CREATED);
    body
}

// ============================================================================
// Travel requests
// ============================================================================

#[tokio::test]
async fn test_create_travel_request_end_to_end() {
    let app = app();

    let ana = create_passenger(&app, "Ana").await;
    assert_eq!(ana, json!({ "id": 1, "name": "Ana" }));

    let (status, body) = send(
        &app,
        Method::POST,
        "/travelRequests",
        Some(json!({ "passengerId": 1, "origin": "A", "destination": "B" })),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(
        body,
        json!({
            "id": 1,
            "origin": "A",
            "destination": "B",
            "status": "CREATED",
            "creationDate": "2025-01-01T00:00:00Z",
            "_links": {
                "passenger": { "href": "/passengers/1", "title": "Ana" }
            }
        })
    );

    let (status, fetched) = send(&app, Method::GET, "/travelRequests/1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, body);
}

#[tokio::test]
async fn test_passenger_link_follows_passenger_changes() {
    let app = app();
    create_passenger(&app, "Ana").await;
    let (status, _) = send(
        &app,
        Method::POST,
        "/travelRequests",
        Some(json!({ "passengerId": 1, "origin": "A", "destination": "B" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, _) = send(&app, Method::PUT, "/passengers/1", Some(json!({ "name": "Ana Maria" }))).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(&app, Method::GET, "/travelRequests/1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body["_links"]["passenger"],
        json!({ "href": "/passengers/1", "title": "Ana Maria" })
    );

    // A passenger with travel requests cannot be deleted
    let (status, body) = send(&app, Method::DELETE, "/passengers/1", None).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "CONFLICT");

    let (status, _) = send(&app, Method::GET, "/passengers/1", None).await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = send(&app, Method::GET, "/travelRequests/1", None).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_travel_request_without_passenger_id_is_422() {
    let app = app();

    let (status, body) = send(
        &app,
        Method::POST,
        "/travelRequests",
        Some(json!({ "origin": "A", "destination": "B" })),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_travel_request_ignores_client_status_and_creation_date() {
    let app = app();
    create_passenger(&app, "Ana").await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/travelRequests",
        Some(json!({
            "passengerId": 1,
            "origin": "A",
            "destination": "B",
            "status": "ACCEPTED",
            "creationDate": "1999-12-31T23:59:59Z"
        })),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["status"], "CREATED");
    assert_eq!(body["creationDate"], "2025-01-01T00:00:00Z");
}

#[tokio::test]
async fn test_travel_request_for_unknown_passenger_is_404_and_not_persisted() {
    let app = app();

    let (status, body) = send(
        &app,
        Method::POST,
        "/travelRequests",
        Some(json!({ "passengerId": 99, "origin": "A", "destination": "B" })),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "NOT_FOUND");
    assert_eq!(body["message"], "Passenger with id 99 not found");

    let (status, _) = send(&app, Method::GET, "/travelRequests/1", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_travel_request_with_empty_origin_is_422() {
    let app = app();
    create_passenger(&app, "Ana").await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/travelRequests",
        Some(json!({ "passengerId": 1, "origin": "", "destination": "B" })),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_passenger_link_uses_public_base_url() {
    let app = app_with_links(LinkBuilder::new("http://localhost:8080/"));
    create_passenger(&app, "Ana").await;

    let (_, body) = send(
        &app,
        Method::POST,
        "/travelRequests",
        Some(json!({ "passengerId": 1, "origin": "A", "destination": "B" })),
    )
    .await;

    assert_eq!(
        body["_links"]["passenger"]["href"],
        "http://localhost:8080/passengers/1"
    );
}

// ============================================================================
// Passengers
// ============================================================================

#[tokio::test]
async fn test_list_passengers_in_id_order() {
    let app = app();
    create_passenger(&app, "Ana").await;
    create_passenger(&app, "Bruno").await;

    let (status, body) = send(&app, Method::GET, "/passengers/list", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!([{ "id": 1, "name": "Ana" }, { "id": 2, "name": "Bruno" }])
    );
}

#[tokio::test]
async fn test_get_deleted_passenger_is_404() {
    let app = app();
    create_passenger(&app, "Ana").await;

    let (status, body) = send(&app, Method::DELETE, "/passengers/1", None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert_eq!(body, Value::Null);

    let (status, body) = send(&app, Method::GET, "/passengers/1", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "NOT_FOUND");

    let (status, _) = send(&app, Method::DELETE, "/passengers/1", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_put_passenger_replaces_name_and_keeps_id() {
    let app = app();
    create_passenger(&app, "Ana").await;

    let (status, body) = send(&app, Method::PUT, "/passengers/1", Some(json!({ "name": "Y" }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "id": 1, "name": "Y" }));

    let (_, fetched) = send(&app, Method::GET, "/passengers/1", None).await;
    assert_eq!(fetched, body);
}

#[tokio::test]
async fn test_put_missing_passenger_is_404() {
    let (status, _) = send(&app(), Method::PUT, "/passengers/5", Some(json!({ "name": "Y" }))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_patch_passenger_with_empty_body_changes_nothing() {
    let app = app();
    let original = create_passenger(&app, "Ana").await;

    let (status, body) = send(&app, Method::PATCH, "/passengers/1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, original);

    let (status, body) = send(&app, Method::PATCH, "/passengers/1", Some(json!({}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, original);

    let (status, body) = send(&app, Method::PATCH, "/passengers/1", Some(json!({ "name": null }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, original);
}

#[tokio::test]
async fn test_patch_passenger_with_name() {
    let app = app();
    create_passenger(&app, "Ana").await;

    let (status, body) = send(
        &app,
        Method::PATCH,
        "/passengers/1",
        Some(json!({ "name": "Ana Maria" })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "id": 1, "name": "Ana Maria" }));
}

#[tokio::test]
async fn test_patch_with_malformed_body_is_400() {
    let app = app();
    create_passenger(&app, "Ana").await;

    let request = Request::builder()
        .method(Method::PATCH)
        .uri("/passengers/1")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{\"name\":"))
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_put_with_malformed_body_is_400() {
    let app = app();
    create_passenger(&app, "Ana").await;

    let (status, body) = send_raw(&app, Method::PUT, "/passengers/1", "{not json").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn test_non_numeric_id_is_400() {
    let app = app();

    for uri in ["/passengers/abc", "/drivers/abc", "/travelRequests/abc"] {
        let (status, body) = send(&app, Method::GET, uri, None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
        assert_eq!(body["code"], "BAD_REQUEST", "{uri}");
    }
}

#[tokio::test]
async fn test_create_passenger_with_empty_name_is_422() {
    let (status, body) = send(&app(), Method::POST, "/passengers", Some(json!({ "name": "" }))).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["code"], "VALIDATION_ERROR");
}

// ============================================================================
// Drivers
// ============================================================================

#[tokio::test]
async fn test_driver_crud() {
    let app = app();

    let (status, created) = send(
        &app,
        Method::POST,
        "/drivers",
        Some(json!({ "name": "Rui", "birthDate": "1990-05-17" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created, json!({ "id": 1, "name": "Rui", "birthDate": "1990-05-17" }));

    let (status, list) = send(&app, Method::GET, "/drivers", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(list, json!([created]));

    let (status, replaced) = send(
        &app,
        Method::PUT,
        "/drivers/1",
        Some(json!({ "name": "Rui Costa", "birthDate": "1985-01-02" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(replaced, json!({ "id": 1, "name": "Rui Costa", "birthDate": "1985-01-02" }));

    let (status, _) = send(&app, Method::DELETE, "/drivers/1", None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = send(&app, Method::GET, "/drivers/1", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_patch_driver_name_keeps_birth_date() {
    let app = app();
    send(
        &app,
        Method::POST,
        "/drivers",
        Some(json!({ "name": "Rui", "birthDate": "1990-05-17" })),
    )
    .await;

    let (status, body) = send(
        &app,
        Method::PATCH,
        "/drivers/1",
        Some(json!({ "name": "X", "birthDate": null })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "id": 1, "name": "X", "birthDate": "1990-05-17" }));
}

#[tokio::test]
async fn test_driver_born_after_today_is_422() {
    let app = app();

    // The fixed clock's today is 2025-01-01
    let (status, body) = send(
        &app,
        Method::POST,
        "/drivers",
        Some(json!({ "name": "Rui", "birthDate": "2025-01-02" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["code"], "VALIDATION_ERROR");

    let (status, _) = send(
        &app,
        Method::POST,
        "/drivers",
        Some(json!({ "name": "Rui", "birthDate": "2025-01-01" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
}

#[tokio::test]
async fn test_get_missing_driver_is_404() {
    let (status, body) = send(&app(), Method::GET, "/drivers/42", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Driver with id 42 not found");
}

// ============================================================================
// Health and middleware
// ============================================================================

#[tokio::test]
async fn test_health_endpoint() {
    let (status, body) = send(&app(), Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_responses_carry_correlation_id() {
    let request = Request::builder()
        .uri("/passengers/list")
        .header(CORRELATION_ID_HEADER, "6f1c1c9e-2f0a-4b8e-9d0e-3c1d2b3a4f5e")
        .body(Body::empty())
        .unwrap();

    let response = app().oneshot(request).await.unwrap();

    assert_eq!(
        response.headers().get(CORRELATION_ID_HEADER).unwrap(),
        "6f1c1c9e-2f0a-4b8e-9d0e-3c1d2b3a4f5e"
    );
}
