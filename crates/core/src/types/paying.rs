//! Paying domain: payments against orders.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::id::{OrderId, PaymentId};
use super::status::PaymentStatus;

/// Currency used when a request does not specify one.
pub const DEFAULT_CURRENCY: &str = "EUR";

fn default_currency() -> String {
    DEFAULT_CURRENCY.to_string()
}

/// Request body for `POST /payments`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessPaymentRequest {
    pub order_id: OrderId,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    #[serde(default = "default_currency")]
    pub currency: String,
    pub payment_method: String,
}

impl ProcessPaymentRequest {
    /// Payment in the default currency.
    #[must_use]
    pub fn new(order_id: OrderId, amount: Decimal, payment_method: impl Into<String>) -> Self {
        Self {
            order_id,
            amount,
            currency: default_currency(),
            payment_method: payment_method.into(),
        }
    }
}

/// A processed payment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    pub id: PaymentId,
    pub order_id: OrderId,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    pub currency: String,
    pub payment_method: String,
    pub status: PaymentStatus,
    pub created_at: DateTime<Utc>,
}

/// Query parameters for `GET /payments`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListPaymentsParams {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order_id: Option<OrderId>,
}

impl ListPaymentsParams {
    /// Filter by order.
    #[must_use]
    pub fn for_order(order_id: impl Into<OrderId>) -> Self {
        Self {
            order_id: Some(order_id.into()),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_currency_defaults_to_eur() {
        let request: ProcessPaymentRequest = serde_json::from_value(serde_json::json!({
            "orderId": "order-uuid-001",
            "amount": 10,
            "paymentMethod": "PAYPAL"
        }))
        .unwrap();

        assert_eq!(request.currency, "EUR");
        assert_eq!(request.amount, Decimal::from(10));
    }
}
