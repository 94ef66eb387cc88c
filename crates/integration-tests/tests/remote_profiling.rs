//! Remote profiling service against a stub backend.

#![allow(clippy::unwrap_used)]

use std::sync::Arc;

use axum::extract::Path;
use axum::http::{HeaderMap, HeaderValue, StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use boutique_client::services::RemoteProfilingService;
use boutique_client::storage::TOKEN_KEY;
use boutique_client::{LocalStorage, MemoryStorage, ProfilingService, TokenStorage};
use boutique_core::{CreateUserRequest, LoginRequest, UserId};
use boutique_integration_tests::{StubBackend, http_client};
use boutique_storefront::AuthStore;
use serde_json::{Value, json};

fn john() -> Value {
    json!({
        "id": "user-uuid-001",
        "email": "john.doe@example.com",
        "firstName": "John",
        "lastName": "Doe"
    })
}

async fn login(Json(body): Json<Value>) -> Response {
    match (body["email"].as_str(), body["password"].as_str()) {
        // Token in the Authorization header
        (Some("john.doe@example.com"), Some("password123")) => {
            let mut headers = HeaderMap::new();
            headers.insert(
                header::AUTHORIZATION,
                HeaderValue::from_static("Bearer header-token-abc"),
            );
            (headers, Json(json!({ "user": john() }))).into_response()
        }
        // Token in the body only
        (Some("body.token@example.com"), Some("password123")) => Json(json!({
            "user": {
                "id": "user-uuid-007",
                "email": "body.token@example.com",
                "firstName": "Body",
                "lastName": "Token"
            },
            "token": "body-token-xyz"
        }))
        .into_response(),
        _ => StatusCode::UNAUTHORIZED.into_response(),
    }
}

async fn register(Json(body): Json<Value>) -> Response {
    match body["email"].as_str() {
        Some("john.doe@example.com") => StatusCode::CONFLICT.into_response(),
        Some("silent@example.com") => StatusCode::CREATED.into_response(),
        _ => {
            let mut user = body;
            if let Some(fields) = user.as_object_mut() {
                fields.remove("password");
                fields.insert("id".to_string(), json!("user-uuid-100"));
            }
            (StatusCode::CREATED, Json(user)).into_response()
        }
    }
}

async fn get_user(Path(id): Path<String>) -> Response {
    match id.as_str() {
        "user-uuid-001" => Json(json!({ "user": john() })).into_response(),
        "user-uuid-002" => StatusCode::FORBIDDEN.into_response(),
        _ => StatusCode::NOT_FOUND.into_response(),
    }
}

async fn service() -> (StubBackend, RemoteProfilingService) {
    let router = Router::new()
        .route("/login", post(login))
        .route("/users", post(register))
        .route("/users/{id}", get(get_user));
    let stub = StubBackend::spawn(router).await.unwrap();
    let service = RemoteProfilingService::new(http_client().unwrap(), stub.url("/").unwrap());
    (stub, service)
}

fn registration(email: &str) -> CreateUserRequest {
    CreateUserRequest {
        email: email.to_string(),
        password: "hunter22".to_string(),
        first_name: "New".to_string(),
        last_name: "Customer".to_string(),
    }
}

#[tokio::test]
async fn test_login_reads_bearer_header() {
    let (_stub, service) = service().await;

    let response = service
        .login(&LoginRequest::new("john.doe@example.com", "password123"))
        .await
        .unwrap();
    assert_eq!(response.user.id, UserId::new("user-uuid-001"));
    assert_eq!(response.token.as_deref(), Some("header-token-abc"));
}

#[tokio::test]
async fn test_login_falls_back_to_body_token() {
    let (_stub, service) = service().await;

    let response = service
        .login(&LoginRequest::new("body.token@example.com", "password123"))
        .await
        .unwrap();
    assert_eq!(response.token.as_deref(), Some("body-token-xyz"));
}

#[tokio::test]
async fn test_bad_credentials() {
    let (_stub, service) = service().await;

    let err = service
        .login(&LoginRequest::new("john.doe@example.com", "nope"))
        .await
        .unwrap_err();
    assert_eq!(err.status(), Some(401));
    assert_eq!(err.to_string(), "Invalid email or password");
}

#[tokio::test]
async fn test_register() {
    let (_stub, service) = service().await;

    let user = service
        .register(&registration("new.customer@example.com"))
        .await
        .unwrap();
    assert_eq!(user.id, UserId::new("user-uuid-100"));
    assert_eq!(user.display_name(), "New Customer");

    let err = service
        .register(&registration("john.doe@example.com"))
        .await
        .unwrap_err();
    assert_eq!(err.status(), Some(409));
    assert_eq!(err.to_string(), "Email already exists");

    let err = service
        .register(&registration("silent@example.com"))
        .await
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        "Registration successful but user data not returned"
    );
}

#[tokio::test]
async fn test_get_user_statuses() {
    let (_stub, service) = service().await;

    let user = service.get_user(&UserId::new("user-uuid-001")).await.unwrap();
    assert_eq!(user.first_name, "John");

    let err = service
        .get_user(&UserId::new("user-uuid-002"))
        .await
        .unwrap_err();
    assert_eq!(err.status(), Some(403));
    assert_eq!(err.to_string(), "Access denied");

    let err = service
        .get_user(&UserId::new("user-uuid-404"))
        .await
        .unwrap_err();
    assert!(err.is_not_found());
    assert_eq!(err.to_string(), "User with ID user-uuid-404 not found");
}

#[tokio::test]
async fn test_auth_store_persists_remote_token() {
    let (_stub, service) = service().await;
    let storage = MemoryStorage::new();
    let store = AuthStore::new(
        Arc::new(service),
        TokenStorage::new(Arc::new(storage.clone())),
    );

    store
        .login(&LoginRequest::new("john.doe@example.com", "password123"))
        .await
        .unwrap();

    assert_eq!(
        storage.get_item(TOKEN_KEY).unwrap().as_deref(),
        Some("header-token-abc")
    );
}
