//! Storefront checkout and back-office follow-up over in-memory services.

#![allow(clippy::unwrap_used, clippy::indexing_slicing)]

use std::sync::Arc;

use axum::routing::get;
use axum::{Json, Router};
use boutique_client::{ClientConfig, Latency, MemoryStorage, Services};
use boutique_core::{
    Address, CreateShipmentRequest, ListOrdersParams, ListPaymentsParams, ListShipmentsParams,
    LoginRequest, OrderStatus, PaymentStatus, ProductId, ProductListParams, ShippingStatus,
};
use boutique_integration_tests::StubBackend;
use rust_decimal::Decimal;
use secrecy::SecretString;
use serde_json::json;

fn storefront(services: Services, storage: &MemoryStorage) -> boutique_storefront::AppState {
    boutique_storefront::AppState::with_services(
        ClientConfig::fake("/tmp/boutique-checkout-test"),
        services,
        Arc::new(storage.clone()),
    )
}

#[tokio::test]
async fn test_checkout_then_ship_from_back_office() {
    let services = Services::in_memory(Latency::None);
    let shop = storefront(services.clone(), &MemoryStorage::new());
    let office = boutique_admin::AppState::with_services(
        ClientConfig::fake("/tmp/boutique-checkout-test"),
        services.clone(),
        Arc::new(MemoryStorage::new()),
    );

    let user = shop
        .auth()
        .login(&LoginRequest::new("jane.smith@example.com", "password456"))
        .await
        .unwrap();

    for (id, quantity) in [("1", 1), ("2", 2)] {
        let product = services
            .cataloging
            .get_product(&ProductId::new(id))
            .await
            .unwrap();
        shop.cart().add_item(product, quantity);
    }
    assert_eq!(shop.cart().total_price(), Decimal::new(135_997, 2));

    let receipt = shop.checkout("CREDIT_CARD").await.unwrap();
    let (order, payment) = (receipt.order, receipt.payment);
    assert_eq!(order.id.as_str(), "order-uuid-005");
    assert_eq!(order.status, OrderStatus::Paid);
    assert_eq!(order.total_amount, Decimal::new(135_997, 2));
    assert_eq!(payment.status, PaymentStatus::Accepted);
    assert!(shop.cart().is_empty());

    // Back office sees the paid order and ships it
    office
        .auth()
        .login("admin@example.com", &SecretString::from("admin123".to_string()))
        .unwrap();
    let orders = office
        .ordering()
        .list_orders(&ListOrdersParams::for_user(user.id))
        .await
        .unwrap();
    let placed = orders.iter().find(|o| o.id == order.id).unwrap();
    assert_eq!(placed.status, OrderStatus::Paid);

    let shipment = office
        .shipping()
        .create_shipment(&CreateShipmentRequest {
            order_id: order.id.clone(),
            address: Address {
                street: "456 Oak Ave".to_string(),
                city: "Lyon".to_string(),
                zip: "69001".to_string(),
            },
        })
        .await
        .unwrap();
    assert_eq!(shipment.status, ShippingStatus::Preparing);

    let shipments = office
        .shipping()
        .list_shipments(&ListShipmentsParams::for_order(order.id.clone()))
        .await
        .unwrap();
    assert_eq!(shipments, vec![shipment]);

    let payments = services
        .paying
        .list_payments(&ListPaymentsParams::for_order(order.id))
        .await
        .unwrap();
    assert_eq!(payments, vec![payment]);
}

#[tokio::test]
async fn test_mixed_remote_and_fake_domains() {
    let router = Router::new().route(
        "/api/cataloging/products",
        get(|| async {
            Json(json!([
                {"id": "77", "name": "Remote Only", "description": "", "price": 1.5}
            ]))
        }),
    );
    let stub = StubBackend::spawn(router).await.unwrap();

    let mut config = ClientConfig::fake("/tmp/boutique-checkout-test");
    config.cataloging.use_fake_data = false;
    config.cataloging.base_url = stub.url("/api/cataloging").unwrap();

    let services = Services::from_config(&config).unwrap();
    let list = services
        .cataloging
        .list_products(&ProductListParams::default())
        .await
        .unwrap();
    assert_eq!(list.total, 1);
    assert_eq!(list.products[0].price, Decimal::new(15, 1));

    // Ordering stays on fixtures
    let orders = services
        .ordering
        .list_orders(&ListOrdersParams::default())
        .await
        .unwrap();
    assert_eq!(orders.len(), 4);
}

#[tokio::test]
async fn test_session_and_cart_survive_restart() {
    let storage = MemoryStorage::new();
    let shop = storefront(Services::in_memory(Latency::None), &storage);
    shop.auth()
        .login(&LoginRequest::new("bob.wilson@example.com", "test1234"))
        .await
        .unwrap();
    let keyboard = shop
        .services()
        .cataloging
        .get_product(&ProductId::new("3"))
        .await
        .unwrap();
    shop.cart().add_item(keyboard.clone(), 1);
    shop.cart().add_item(keyboard, 1);

    let restarted = storefront(Services::in_memory(Latency::None), &storage);
    restarted.initialize();
    assert_eq!(
        restarted.auth().current_user().unwrap().email.as_str(),
        "bob.wilson@example.com"
    );
    assert_eq!(restarted.cart().item_quantity(&ProductId::new("3")), 2);

    restarted.auth().logout();
    let again = storefront(Services::in_memory(Latency::None), &storage);
    again.initialize();
    assert!(!again.auth().is_authenticated());
    assert_eq!(again.cart().total_items(), 2);
}
