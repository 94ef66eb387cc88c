//! Remote cataloging service against a stub backend.

#![allow(clippy::unwrap_used, clippy::indexing_slicing)]

use std::collections::HashMap;

use axum::extract::{Path, Query};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use boutique_client::CatalogingService;
use boutique_client::services::RemoteCatalogingService;
use boutique_core::{
    CreateProductRequest, ProductId, ProductListParams, UpdateProductRequest,
};
use boutique_integration_tests::{StubBackend, http_client};
use rust_decimal::Decimal;
use serde_json::{Value, json};

fn catalog() -> Vec<Value> {
    vec![
        json!({"id": "1", "name": "Laptop Pro 15", "description": "15-inch laptop", "price": 1299.99}),
        json!({"id": "2", "name": "Wireless Mouse", "description": "Ergonomic mouse", "price": 29.99}),
    ]
}

async fn list_products(Query(query): Query<HashMap<String, String>>) -> Json<Value> {
    let products: Vec<Value> = match query.get("name") {
        Some(name) => catalog()
            .into_iter()
            .filter(|p| {
                p["name"]
                    .as_str()
                    .unwrap()
                    .to_lowercase()
                    .contains(&name.to_lowercase())
            })
            .collect(),
        None => catalog(),
    };
    // Wrapped envelope
    Json(json!({ "products": products }))
}

async fn get_product(Path(id): Path<String>) -> Response {
    match catalog().into_iter().find(|p| p["id"] == id.as_str()) {
        // Bare body
        Some(product) => Json(product).into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

async fn create_product(Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
    let mut product = body;
    product["id"] = json!("9");
    (StatusCode::CREATED, Json(json!({ "product": product })))
}

async fn update_product(Path(id): Path<String>, Json(body): Json<Value>) -> Response {
    let Some(mut product) = catalog().into_iter().find(|p| p["id"] == id.as_str()) else {
        return StatusCode::NOT_FOUND.into_response();
    };
    if let (Some(target), Some(changes)) = (product.as_object_mut(), body.as_object()) {
        for (key, value) in changes {
            target.insert(key.clone(), value.clone());
        }
    }
    Json(json!({ "product": product })).into_response()
}

async fn service() -> (StubBackend, RemoteCatalogingService) {
    let router = Router::new()
        .route("/api/cataloging/products", get(list_products).post(create_product))
        .route(
            "/api/cataloging/products/{id}",
            get(get_product).put(update_product),
        );
    let stub = StubBackend::spawn(router).await.unwrap();
    let service = RemoteCatalogingService::new(
        http_client().unwrap(),
        stub.url("/api/cataloging").unwrap(),
    );
    (stub, service)
}

#[tokio::test]
async fn test_list_unwraps_envelope() {
    let (_stub, service) = service().await;

    let list = service
        .list_products(&ProductListParams::default())
        .await
        .unwrap();
    assert_eq!(list.total, 2);
    assert_eq!(list.products[0].price, Decimal::new(129_999, 2));
}

#[tokio::test]
async fn test_list_sends_name_filter() {
    let (_stub, service) = service().await;

    let list = service
        .list_products(&ProductListParams::by_name("mouse"))
        .await
        .unwrap();
    assert_eq!(list.total, 1);
    assert_eq!(list.products[0].id, ProductId::new("2"));
}

#[tokio::test]
async fn test_get_bare_product() {
    let (_stub, service) = service().await;

    let product = service.get_product(&ProductId::new("1")).await.unwrap();
    assert_eq!(product.name, "Laptop Pro 15");
}

#[tokio::test]
async fn test_missing_product_maps_to_not_found() {
    let (_stub, service) = service().await;

    let err = service
        .get_product(&ProductId::new("42"))
        .await
        .unwrap_err();
    assert!(err.is_not_found());
    assert_eq!(err.to_string(), "Product with ID 42 not found");
}

#[tokio::test]
async fn test_create_and_update() {
    let (_stub, service) = service().await;

    let created = service
        .create_product(&CreateProductRequest {
            name: "USB-C Hub".to_string(),
            description: "7-in-1 hub".to_string(),
            price: Decimal::new(4_999, 2),
            image_url: None,
        })
        .await
        .unwrap();
    assert_eq!(created.id, ProductId::new("9"));
    assert_eq!(created.price, Decimal::new(4_999, 2));

    let updated = service
        .update_product(
            &ProductId::new("2"),
            &UpdateProductRequest {
                price: Some(Decimal::new(1_999, 2)),
                ..UpdateProductRequest::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.name, "Wireless Mouse");
    assert_eq!(updated.price, Decimal::new(1_999, 2));
}
