//! Handler tests for the Products domain
//!
//! These tests verify that HTTP handlers work correctly:
//! - Request deserialization (JSON → Rust structs)
//! - Response serialization (Rust structs → JSON)
//! - HTTP status codes, headers, and error bodies
//!
//! They run against the in-memory repository, so no database is needed.

use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use domain_products::*;
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt; // For oneshot()

fn app() -> axum::Router {
    let repository = InMemoryProductRepository::new();
    let service = ProductService::new(repository);
    handlers::router(service)
}

// Helper to parse JSON response body
async fn json_body<T: serde::de::DeserializeOwned>(body: Body) -> T {
    let bytes = body.collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_string(&body).unwrap()))
        .unwrap()
}

fn valid_payload() -> Value {
    json!({
        "description": "A cleaning detergent",
        "fabricated_at": "2025-01-10T00:00:00Z",
        "expired_at": "2026-01-10T00:00:00Z",
        "supplier_code": "SUP-001",
        "supplier_description": "Acme Supplies",
        "supplier_cnpj": "59456277000176"
    })
}

#[tokio::test]
async fn test_create_product_returns_201_with_location() {
    let app = app();

    let response = app.oneshot(post_json("/", valid_payload())).await.unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);

    let location = response
        .headers()
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);

    let created: ProductIdResponse = json_body(response.into_body()).await;
    assert_eq!(location, Some(format!("/products/{}", created.id)));
}

#[tokio::test]
async fn test_create_product_defaults_to_active() {
    let app = app();

    let response = app
        .clone()
        .oneshot(post_json("/", valid_payload()))
        .await
        .unwrap();
    let created: ProductIdResponse = json_body(response.into_body()).await;

    let request = Request::builder()
        .method("GET")
        .uri(format!("/{}", created.id))
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let product: Product = json_body(response.into_body()).await;
    assert!(product.active);
    assert!(product.deleted_at.is_none());
}

#[tokio::test]
async fn test_create_product_with_inverted_dates_returns_422() {
    let app = app();

    let mut payload = valid_payload();
    payload["fabricated_at"] = json!("2026-01-10T00:00:00Z");
    payload["expired_at"] = json!("2025-01-10T00:00:00Z");

    let response = app.oneshot(post_json("/", payload)).await.unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let body: Value = json_body(response.into_body()).await;
    assert_eq!(
        body["details"]["errors"][0]["message"],
        "'expiredAt' should not be before the fabricatedAt"
    );
}

#[tokio::test]
async fn test_create_product_reports_all_violations_in_order() {
    let app = app();

    let payload = json!({
        "fabricated_at": "2026-01-10T00:00:00Z",
        "expired_at": "2025-01-10T00:00:00Z",
        "supplier_cnpj": "123"
    });

    let response = app.oneshot(post_json("/", payload)).await.unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let body: Value = json_body(response.into_body()).await;
    let errors = body["details"]["errors"].as_array().unwrap();
    assert_eq!(errors.len(), 3);
    assert_eq!(errors[0]["message"], "'description' should not be null");
    assert_eq!(
        errors[1]["message"],
        "'expiredAt' should not be before the fabricatedAt"
    );
    assert_eq!(errors[2]["message"], "'CNPJ' should be 14 characters");
}

#[tokio::test]
async fn test_get_missing_product_returns_404_with_message() {
    let app = app();
    let missing_id = uuid::Uuid::now_v7();

    let request = Request::builder()
        .method("GET")
        .uri(format!("/{}", missing_id))
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let body: Value = json_body(response.into_body()).await;
    assert_eq!(
        body["message"],
        format!("Product with ID {} was not found", missing_id)
    );
}

#[tokio::test]
async fn test_update_product_returns_200_with_id() {
    let app = app();

    let response = app
        .clone()
        .oneshot(post_json("/", valid_payload()))
        .await
        .unwrap();
    let created: ProductIdResponse = json_body(response.into_body()).await;

    let mut payload = valid_payload();
    payload["description"] = json!("An even better detergent");
    payload["active"] = json!(false);

    let request = Request::builder()
        .method("PUT")
        .uri(format!("/{}", created.id))
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_string(&payload).unwrap()))
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let updated: ProductIdResponse = json_body(response.into_body()).await;
    assert_eq!(updated.id, created.id);

    // Deactivation is visible in the full projection
    let request = Request::builder()
        .method("GET")
        .uri(format!("/{}", created.id))
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    let product: Product = json_body(response.into_body()).await;
    assert!(!product.active);
    assert!(product.deleted_at.is_some());
}

#[tokio::test]
async fn test_update_missing_product_returns_404() {
    let app = app();
    let missing_id = uuid::Uuid::now_v7();

    let request = Request::builder()
        .method("PUT")
        .uri(format!("/{}", missing_id))
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_string(&valid_payload()).unwrap()))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_list_products_filters_by_search_terms() {
    let app = app();

    for description in [
        "first product.",
        "second normal product description.",
        "third product.",
    ] {
        let mut payload = valid_payload();
        payload["description"] = json!(description);
        let response = app
            .clone()
            .oneshot(post_json("/", payload))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let request = Request::builder()
        .method("GET")
        .uri("/?search=sec&page=0&perPage=10")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body: Value = json_body(response.into_body()).await;
    assert_eq!(body["total"], 1);
    assert_eq!(body["current_page"], 0);
    assert_eq!(
        body["items"][0]["description"],
        "second normal product description."
    );
}

#[tokio::test]
async fn test_delete_product_is_idempotent() {
    let app = app();

    let response = app
        .clone()
        .oneshot(post_json("/", valid_payload()))
        .await
        .unwrap();
    let created: ProductIdResponse = json_body(response.into_body()).await;

    for _ in 0..2 {
        let request = Request::builder()
            .method("DELETE")
            .uri(format!("/{}", created.id))
            .body(Body::empty())
            .unwrap();
        let response = app.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::NO_CONTENT);
    }
}

#[tokio::test]
async fn test_invalid_uuid_returns_400() {
    let app = app();

    let request = Request::builder()
        .method("GET")
        .uri("/not-a-uuid")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
