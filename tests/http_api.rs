//! HTTP API Tests
//!
//! Tests for the axum router against an in-memory remote service:
//! - Health and metrics endpoints
//! - List, sort and sort-filter endpoints with record mapping
//! - Status codes and error bodies

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use flatquery::config::ServiceConfig;
use flatquery::executor::QueryResolver;
use flatquery::filter::Filter;
use flatquery::http_server::HttpServer;
use flatquery::remote::{MemoryQueryClient, Record, RemoteError};
use flatquery::schema::PropertySchema;
use serde_json::{json, Value};
use tower::ServiceExt;

// =============================================================================
// Helper Functions
// =============================================================================

fn config() -> ServiceConfig {
    ServiceConfig {
        database_id: Some("db".into()),
        secret: Some("secret".into()),
        ..Default::default()
    }
}

fn router(client: &Arc<MemoryQueryClient>) -> Router {
    let resolver = QueryResolver::new(client.clone(), Arc::new(PropertySchema::default()));
    HttpServer::new(&config(), resolver).router()
}

fn sales_row(id: &str, name: &str) -> Record {
    Record::new(id).with_field(
        "properties",
        json!({
            "Name": {"type": "title", "title": [{"plain_text": name}]},
            "Company": {"type": "rich_text", "rich_text": [{"plain_text": "Acme"}]},
            "Status": {"type": "status", "status": {"name": "Active"}},
            "Priority": {"type": "select", "select": {"name": "High"}},
            "Estimated Value": {"type": "number", "number": 1000},
            "Account Owner": {"type": "people", "people": [{"object": "user"}]}
        }),
    )
}

fn status(value: &str) -> Filter {
    Filter::condition("Status", "status", "equals", json!(value))
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn send(router: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = router.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

// =============================================================================
// Health & Metrics
// =============================================================================

#[tokio::test]
async fn test_health() {
    let client = Arc::new(MemoryQueryClient::new());
    let (status, body) = send(router(&client), get("/health")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert!(body["timestamp"].is_string());
    assert!(body["uptime"].as_f64().is_some());
}

#[tokio::test]
async fn test_metrics_count_requests() {
    let client = Arc::new(MemoryQueryClient::new());
    let router = router(&client);

    send(router.clone(), get("/api")).await;
    let (status, body) = send(router, get("/metrics")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["requests"], 2);
    assert_eq!(body["remote_calls"], 1);
}

// =============================================================================
// Query Endpoints
// =============================================================================

#[tokio::test]
async fn test_list_maps_records() {
    let client = Arc::new(
        MemoryQueryClient::new().respond_unfiltered(vec![sales_row("p1", "Deal"), Record::new("p2")]),
    );

    let (status, body) = send(router(&client), get("/api")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body[0]["id"], "p1");
    assert_eq!(body[0]["status"], "Active");
    assert_eq!(body[0]["accountOwner"], "user");
    assert_eq!(body[1]["name"], "NOT_FOUND");
    assert_eq!(body[1]["id"], "");
}

#[tokio::test]
async fn test_sort_forwards_sort() {
    let client = Arc::new(MemoryQueryClient::new());

    let (status, _) = send(
        router(&client),
        get("/api/sort?property=Estimated%20Value&direction=descending"),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let sent = serde_json::to_value(&client.requests()[0]).unwrap();
    assert_eq!(
        sent,
        json!({"sorts": [{"property": "Estimated Value", "direction": "descending"}]})
    );
}

#[tokio::test]
async fn test_sort_invalid_property() {
    let client = Arc::new(MemoryQueryClient::new());

    let (status, body) = send(router(&client), get("/api/sort?property=Bogus")).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "FLATQUERY_SORT_INVALID_PROPERTY");
    assert!(body["error"]
        .as_str()
        .unwrap()
        .starts_with("Invalid sort property: Bogus"));
    assert_eq!(client.call_count(), 0);
}

#[tokio::test]
async fn test_sort_filter_decomposes() {
    let client = Arc::new(
        MemoryQueryClient::new()
            .respond_to(&status("Active"), vec![sales_row("1", "A"), sales_row("2", "B")])
            .respond_to(&status("Won"), vec![sales_row("2", "B"), sales_row("3", "C")]),
    );

    let body = json!({
        "filter": {"or": [
            {"property": "Status", "status": {"equals": "Active"}},
            {"property": "Status", "status": {"equals": "Won"}}
        ]},
        "maxNestingLevel": 0
    });
    let (status, body) = send(router(&client), post_json("/api/sort-filter", body)).await;

    assert_eq!(status, StatusCode::OK);
    let names: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, ["A", "B", "C"]);
    assert_eq!(client.call_count(), 2);
}

#[tokio::test]
async fn test_sort_filter_default_limit_forwards() {
    let client = Arc::new(MemoryQueryClient::new());

    let body = json!({
        "filter": {"or": [
            {"property": "Status", "status": {"equals": "Active"}},
            {"property": "Status", "status": {"equals": "Won"}}
        ]},
        "sort": {"property": "Name", "direction": "ascending"}
    });
    let (status, _) = send(router(&client), post_json("/api/sort-filter", body)).await;

    assert_eq!(status, StatusCode::OK);
    let requests = client.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].sorts.len(), 1);
}

/// A sort that is not an object is dropped rather than rejected
#[tokio::test]
async fn test_sort_filter_ignores_non_object_sort() {
    let client = Arc::new(MemoryQueryClient::new());

    let body = json!({
        "filter": {"property": "Status", "status": {"equals": "Active"}},
        "sort": "Name"
    });
    let (status, _) = send(router(&client), post_json("/api/sort-filter", body)).await;

    assert_eq!(status, StatusCode::OK);
    let requests = client.requests();
    assert_eq!(requests.len(), 1);
    assert!(requests[0].sorts.is_empty());
}

// =============================================================================
// Errors
// =============================================================================

#[tokio::test]
async fn test_sort_filter_validation_error() {
    let client = Arc::new(MemoryQueryClient::new());

    let body = json!({"filter": {"property": "Status", "status": {"bogus_op": "x"}}});
    let (status, body) = send(router(&client), post_json("/api/sort-filter", body)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "FLATQUERY_FILTER_UNSUPPORTED_OPERATOR");
    assert!(body["error"].as_str().unwrap().contains("bogus_op"));
    assert_eq!(client.call_count(), 0);
}

#[tokio::test]
async fn test_sort_filter_malformed_body() {
    let client = Arc::new(MemoryQueryClient::new());

    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/sort-filter")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let (status, body) = send(router(&client), request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "FLATQUERY_API_INVALID_BODY");
}

#[tokio::test]
async fn test_remote_failure_is_bad_gateway() {
    let client = Arc::new(MemoryQueryClient::new().fail_on(
        &status("Active"),
        RemoteError::Status {
            status: 401,
            body: "unauthorized".into(),
        },
    ));

    let body = json!({"filter": {"property": "Status", "status": {"equals": "Active"}}});
    let (status, body) = send(router(&client), post_json("/api/sort-filter", body)).await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["code"], "FLATQUERY_REMOTE_STATUS");
}

#[tokio::test]
async fn test_unknown_route() {
    let client = Arc::new(MemoryQueryClient::new());
    let (status, body) = send(router(&client), get("/data")).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({"error": "Resource not found", "code": "FLATQUERY_API_NOT_FOUND"}));
}

#[tokio::test]
async fn test_wrong_method() {
    let client = Arc::new(MemoryQueryClient::new());
    let (status, _) = send(router(&client), get("/api/sort-filter")).await;

    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn test_request_id_header() {
    let client = Arc::new(MemoryQueryClient::new());
    let response = router(&client).oneshot(get("/health")).await.unwrap();

    let id = response.headers().get("x-request-id").unwrap().to_str().unwrap();
    assert!(uuid::Uuid::parse_str(id).is_ok());
}
