//! Cart types.
//!
//! The cart is a client-only aggregate: it never reaches a server until it
//! is turned into an order at checkout.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::cataloging::Product;

/// A product snapshot with a quantity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    pub product: Product,
    pub quantity: u32,
    pub added_at: DateTime<Utc>,
}

impl CartItem {
    /// Product price × quantity.
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.product.price * Decimal::from(self.quantity)
    }
}

/// Cart totals for display.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartSummary {
    /// Total quantity across all lines.
    pub total_items: u32,
    /// Sum of price × quantity over all lines.
    #[serde(with = "rust_decimal::serde::float")]
    pub total_price: Decimal,
    /// Number of distinct products.
    pub item_count: usize,
}
