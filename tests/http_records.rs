//! HTTP Record Endpoint Tests
//!
//! End-to-end request scenarios against the full router (CORS, logging
//! middleware, record and health routes) over the in-memory backend.

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use plantcare::http_server::{HttpServer, HttpServerConfig};
use plantcare::store::{InMemoryRecordStore, RecordGateway};
use serde_json::{json, Value};
use tower::ServiceExt;

// =============================================================================
// Helper Functions
// =============================================================================

fn plant() -> Value {
    json!({
        "image": "https://example.com/jade.jpg",
        "plantName": "Jade plant",
        "category": "succulent",
        "description": "Thick glossy leaves",
        "careLevel": "easy",
        "wateringFrequency": "every 3 weeks",
        "lastWateredDate": "2024-05-01",
        "nextWateringDate": "2024-05-22",
        "healthStatus": "healthy",
        "userEmail": "ana@example.com",
        "userName": "Ana"
    })
}

async fn connected_router() -> Router {
    let mut gateway = RecordGateway::new(InMemoryRecordStore::new());
    gateway.connect().await.unwrap();
    HttpServer::new(HttpServerConfig::default(), Arc::new(gateway)).router()
}

fn disconnected_router() -> Router {
    let gateway = RecordGateway::new(InMemoryRecordStore::new());
    HttpServer::new(HttpServerConfig::default(), Arc::new(gateway)).router()
}

async fn send(router: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}

// =============================================================================
// Lifecycle Scenario
// =============================================================================

#[tokio::test]
async fn test_full_record_lifecycle() {
    let router = connected_router().await;

    // Create
    let (status, body) = send(&router, Method::POST, "/records", Some(plant())).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["status"], true);
    assert_eq!(body["message"], "Plant added successfully");
    let id = body["data"]["_id"].as_str().unwrap().to_string();
    assert_eq!(id.len(), 24);
    assert_eq!(body["data"]["createdAt"], body["data"]["updatedAt"]);
    assert_eq!(body["data"]["lastWateredDate"], "2024-05-01T00:00:00Z");

    // Read back
    let (status, body) = send(&router, Method::GET, &format!("/records/{}", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Plant retrieved successfully");
    assert_eq!(body["data"]["plantName"], "Jade plant");
    assert_eq!(body["data"]["category"], "succulent");

    // Update health
    let mut update = plant();
    update["healthStatus"] = json!("dying");
    let (status, body) = send(&router, Method::PUT, &format!("/records/{}", id), Some(update)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Plant updated successfully");
    assert_eq!(body["data"]["healthStatus"], "dying");
    assert_eq!(body["data"]["_id"], id.as_str());

    // Listed
    let (status, body) = send(&router, Method::GET, "/records", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().unwrap().len(), 1);

    // Delete
    let (status, body) = send(&router, Method::DELETE, &format!("/records/{}", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Plant deleted successfully");
    assert_eq!(body["data"]["healthStatus"], "dying");

    // Gone
    let (status, body) = send(&router, Method::GET, &format!("/records/{}", id), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["status"], false);
    assert_eq!(body["message"], "Plant not found");
}

// =============================================================================
// Client Error Scenarios
// =============================================================================

#[tokio::test]
async fn test_missing_user_email() {
    let router = connected_router().await;
    let mut payload = plant();
    payload.as_object_mut().unwrap().remove("userEmail");

    let (status, body) = send(&router, Method::POST, "/records", Some(payload)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["status"], false);
    assert_eq!(body["message"], "All fields are required");
    assert_eq!(body["missingFields"], json!(["userEmail"]));
}

#[tokio::test]
async fn test_invalid_enum_value() {
    let router = connected_router().await;
    let mut payload = plant();
    payload["category"] = json!("cactus");

    let (status, body) = send(&router, Method::POST, "/records", Some(payload)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Invalid field values");
    assert_eq!(body["invalidFields"][0]["field"], "category");

    let (_, list) = send(&router, Method::GET, "/records", None).await;
    assert_eq!(list["data"], json!([]));
}

#[tokio::test]
async fn test_invalid_id_for_each_method() {
    let router = connected_router().await;

    for (method, body) in [
        (Method::GET, None),
        (Method::PUT, Some(plant())),
        (Method::DELETE, None),
    ] {
        let (status, body) = send(&router, method.clone(), "/records/123", body).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{}", method);
        assert_eq!(body["message"], "Invalid plant ID", "{}", method);
    }
}

#[tokio::test]
async fn test_update_absent_record_is_not_found() {
    let router = connected_router().await;
    let (status, body) = send(
        &router,
        Method::PUT,
        "/records/65f1c0a2b3d4e5f601234567",
        Some(plant()),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Plant not found");

    let (_, list) = send(&router, Method::GET, "/records", None).await;
    assert_eq!(list["data"], json!([]));
}

#[tokio::test]
async fn test_delete_absent_record_is_not_found() {
    let router = connected_router().await;
    let (status, body) = send(&router, Method::DELETE, "/records/65f1c0a2b3d4e5f601234567", None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["status"], false);
    assert_eq!(body["message"], "Plant not found");
}

#[tokio::test]
async fn test_non_object_body() {
    let router = connected_router().await;
    let (status, body) = send(&router, Method::POST, "/records", Some(json!(["not", "a", "plant"]))).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Invalid request body");
}

// =============================================================================
// Server Error Scenarios
// =============================================================================

#[tokio::test]
async fn test_disconnected_store_is_server_error() {
    let router = disconnected_router();

    let (status, body) = send(&router, Method::GET, "/records", None).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["status"], false);
    assert_eq!(body["message"], "Failed to retrieve plants");
    assert!(body["error"].as_str().unwrap().contains("not connected"));

    let (status, body) = send(&router, Method::POST, "/records", Some(plant())).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["message"], "Failed to add plant");
}

#[tokio::test]
async fn test_disconnected_store_names_each_operation() {
    let router = disconnected_router();
    let uri = "/records/65f1c0a2b3d4e5f601234567";

    for (method, body, message) in [
        (Method::GET, None, "Failed to retrieve plant"),
        (Method::PUT, Some(plant()), "Failed to update plant"),
        (Method::DELETE, None, "Failed to delete plant"),
    ] {
        let (status, body) = send(&router, method.clone(), uri, body).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR, "{}", method);
        assert_eq!(body["status"], false, "{}", method);
        assert_eq!(body["message"], message, "{}", method);
        assert!(body["error"].as_str().unwrap().contains("not connected"), "{}", method);
    }
}

// =============================================================================
// Health
// =============================================================================

#[tokio::test]
async fn test_health_reports_store_state() {
    let (status, body) = send(&connected_router().await, Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["store"], "connected");

    let (_, body) = send(&disconnected_router(), Method::GET, "/health", None).await;
    assert_eq!(body["store"], "disconnected");
}
