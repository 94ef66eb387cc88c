//! Seed data for the in-memory services.
//!
//! The records cross-reference each other: orders point at products and
//! users, shipments and payments point at orders.

use boutique_core::{
    Address, DEFAULT_CURRENCY, Email, Order, OrderId, OrderItem, OrderStatus, Payment, PaymentId,
    PaymentStatus, Product, ProductId, Shipment, ShipmentId, ShippingStatus, User, UserId,
};
use chrono::{DateTime, TimeZone, Utc};
use rust_decimal::Decimal;

use super::collection::prefixed_id;

fn at(month: u32, day: u32, hour: u32, minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, month, day, hour, minute, 0)
        .single()
        .unwrap_or_default()
}

fn cents(amount: i64) -> Decimal {
    Decimal::new(amount, 2)
}

fn product(id: u32, name: &str, description: &str, price: i64) -> Product {
    let created = at(1, id, 10, 0);
    Product {
        id: ProductId::new(id.to_string()),
        name: name.to_string(),
        description: description.to_string(),
        price: cents(price),
        image_url: None,
        created_at: Some(created),
        updated_at: Some(created),
    }
}

/// The eight catalog products, ids `"1"` to `"8"`.
#[must_use]
pub fn products() -> Vec<Product> {
    vec![
        product(
            1,
            "Laptop Pro 15\"",
            "High-performance laptop with 16GB RAM, 512GB SSD, and latest processor",
            129_999,
        ),
        product(
            2,
            "Wireless Mouse",
            "Ergonomic wireless mouse with precision tracking and long battery life",
            2_999,
        ),
        product(
            3,
            "Mechanical Keyboard RGB",
            "Premium mechanical keyboard with RGB backlighting and tactile switches",
            14_999,
        ),
        product(
            4,
            "USB-C Hub",
            "7-in-1 USB-C hub with HDMI, USB 3.0, SD card reader, and power delivery",
            4_999,
        ),
        product(
            5,
            "Noise Cancelling Headphones",
            "Premium over-ear headphones with active noise cancellation and 30-hour battery",
            29_999,
        ),
        product(
            6,
            "Webcam 4K",
            "4K webcam with auto-focus, built-in microphone, and wide-angle lens",
            8_999,
        ),
        product(
            7,
            "Monitor 27\" 4K",
            "27-inch 4K IPS monitor with HDR support and adjustable stand",
            44_999,
        ),
        product(
            8,
            "External SSD 1TB",
            "Portable 1TB SSD with USB-C and USB 3.0, read speeds up to 1050MB/s",
            12_999,
        ),
    ]
}

fn item(product_id: &str, quantity: u32, price: i64) -> OrderItem {
    OrderItem {
        product_id: ProductId::new(product_id),
        quantity,
        price: cents(price),
    }
}

fn order(
    number: usize,
    user: usize,
    items: Vec<OrderItem>,
    status: OrderStatus,
    created_at: DateTime<Utc>,
) -> Order {
    Order {
        id: OrderId::new(prefixed_id("order", number)),
        user_id: UserId::new(prefixed_id("user", user)),
        total_amount: items.iter().map(OrderItem::line_total).sum(),
        items,
        status,
        created_at,
    }
}

/// Four orders: three for user 001, one for user 002.
#[must_use]
pub fn orders() -> Vec<Order> {
    vec![
        order(
            1,
            1,
            vec![item("1", 1, 129_999), item("2", 2, 2_999)],
            OrderStatus::Delivered,
            at(1, 1, 10, 0),
        ),
        order(
            2,
            1,
            vec![item("3", 1, 14_999), item("5", 1, 29_999)],
            OrderStatus::Shipped,
            at(1, 5, 14, 30),
        ),
        order(
            3,
            2,
            vec![item("7", 1, 44_999)],
            OrderStatus::Paid,
            at(1, 10, 9, 15),
        ),
        order(
            4,
            1,
            vec![item("4", 1, 4_999), item("6", 1, 8_999)],
            OrderStatus::Ordered,
            at(1, 12, 16, 45),
        ),
    ]
}

fn shipment(
    number: usize,
    (street, city, zip): (&str, &str, &str),
    status: ShippingStatus,
    created_at: DateTime<Utc>,
) -> Shipment {
    Shipment {
        id: ShipmentId::new(prefixed_id("shipment", number)),
        order_id: OrderId::new(prefixed_id("order", number)),
        address: Address {
            street: street.to_string(),
            city: city.to_string(),
            zip: zip.to_string(),
        },
        status,
        created_at: Some(created_at),
    }
}

/// Shipments for the first three orders.
#[must_use]
pub fn shipments() -> Vec<Shipment> {
    vec![
        shipment(
            1,
            ("123 Rue de la Paix", "Paris", "75001"),
            ShippingStatus::Delivered,
            at(1, 1, 12, 0),
        ),
        shipment(
            2,
            ("456 Avenue des Champs", "Lyon", "69001"),
            ShippingStatus::Shipped,
            at(1, 5, 15, 0),
        ),
        shipment(
            3,
            ("789 Boulevard de la Mer", "Marseille", "13001"),
            ShippingStatus::Preparing,
            at(1, 10, 10, 0),
        ),
    ]
}

fn payment(number: usize, amount: i64, method: &str, created_at: DateTime<Utc>) -> Payment {
    Payment {
        id: PaymentId::new(prefixed_id("payment", number)),
        order_id: OrderId::new(prefixed_id("order", number)),
        amount: cents(amount),
        currency: DEFAULT_CURRENCY.to_string(),
        payment_method: method.to_string(),
        status: PaymentStatus::Accepted,
        created_at,
    }
}

/// Accepted payments for the first three orders.
#[must_use]
pub fn payments() -> Vec<Payment> {
    vec![
        payment(1, 135_997, "CREDIT_CARD", at(1, 1, 10, 5)),
        payment(2, 44_998, "CREDIT_CARD", at(1, 5, 14, 35)),
        payment(3, 44_999, "PAYPAL", at(1, 10, 9, 20)),
    ]
}

/// Four users with their plaintext development passwords.
#[must_use]
pub fn users() -> Vec<(User, &'static str)> {
    [
        ("john.doe@example.com", "John", "Doe", "password123"),
        ("jane.smith@example.com", "Jane", "Smith", "password456"),
        ("bob.wilson@example.com", "Bob", "Wilson", "test1234"),
        ("alice.brown@example.com", "Alice", "Brown", "secure789"),
    ]
    .into_iter()
    .enumerate()
    .map(|(index, (email, first_name, last_name, password))| {
        let user = User {
            id: UserId::new(prefixed_id("user", index + 1)),
            email: Email::new_unchecked(email),
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
        };
        (user, password)
    })
    .collect()
}
