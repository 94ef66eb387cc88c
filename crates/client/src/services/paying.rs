//! Paying service: payments against orders.

use std::sync::Arc;

use async_trait::async_trait;
use boutique_core::{
    ListPaymentsParams, Payment, PaymentId, PaymentStatus, PayingError, ProcessPaymentRequest,
};
use chrono::Utc;
use tokio::sync::RwLock;
use tracing::{debug, instrument};
use url::Url;

use super::collection::{Collection, prefixed_id};
use super::fixtures;
use crate::http::{ApiRequest, RestClient};
use crate::latency::Latency;

/// Payment operations.
#[async_trait]
pub trait PayingService: Send + Sync + std::fmt::Debug {
    /// Charge an order.
    async fn process_payment(
        &self,
        request: &ProcessPaymentRequest,
    ) -> Result<Payment, PayingError>;

    /// Fetch one payment.
    async fn get_payment(&self, id: &PaymentId) -> Result<Payment, PayingError>;

    /// List payments, optionally only one order's.
    async fn list_payments(
        &self,
        params: &ListPaymentsParams,
    ) -> Result<Vec<Payment>, PayingError>;
}

fn not_found(id: &PaymentId) -> PayingError {
    PayingError::not_found(format!("Payment with ID {id} not found"))
}

/// Paying backend over HTTP.
#[derive(Debug, Clone)]
pub struct RemotePayingService {
    client: RestClient<PayingError>,
}

impl RemotePayingService {
    /// Client for the paying API at `base_url`.
    #[must_use]
    pub const fn new(http: reqwest::Client, base_url: Url) -> Self {
        Self {
            client: RestClient::new(http, base_url),
        }
    }
}

#[async_trait]
impl PayingService for RemotePayingService {
    #[instrument(
        skip(self, request),
        fields(order_id = %request.order_id, method = %request.payment_method)
    )]
    async fn process_payment(
        &self,
        request: &ProcessPaymentRequest,
    ) -> Result<Payment, PayingError> {
        let request = ApiRequest::post("process payment", &["payments"]).json(request);
        self.client.send(request).await?.item("payment")
    }

    #[instrument(skip(self), fields(payment_id = %id))]
    async fn get_payment(&self, id: &PaymentId) -> Result<Payment, PayingError> {
        let request = ApiRequest::get("fetch payment", &["payments", id.as_str()])
            .on_not_found(format!("Payment with ID {id} not found"));
        self.client.send(request).await?.item("payment")
    }

    #[instrument(skip(self))]
    async fn list_payments(
        &self,
        params: &ListPaymentsParams,
    ) -> Result<Vec<Payment>, PayingError> {
        let request = ApiRequest::get("fetch payments", &["payments"])
            .query("orderId", params.order_id.as_ref().map(|id| id.as_str()));
        self.client.send(request).await?.list("payments")
    }
}

/// Paying backed by fixture payments. Every payment is accepted.
#[derive(Debug, Clone)]
pub struct InMemoryPayingService {
    payments: Arc<RwLock<Collection<Payment>>>,
    latency: Latency,
}

impl InMemoryPayingService {
    /// Seeded with the fixture payments.
    #[must_use]
    pub fn new(latency: Latency) -> Self {
        Self::with_payments(fixtures::payments(), latency)
    }

    /// Seeded with `payments`.
    #[must_use]
    pub fn with_payments(payments: Vec<Payment>, latency: Latency) -> Self {
        Self {
            payments: Arc::new(RwLock::new(Collection::seeded(payments))),
            latency,
        }
    }
}

impl Default for InMemoryPayingService {
    fn default() -> Self {
        Self::new(Latency::default())
    }
}

#[async_trait]
impl PayingService for InMemoryPayingService {
    async fn process_payment(
        &self,
        request: &ProcessPaymentRequest,
    ) -> Result<Payment, PayingError> {
        self.latency.wait(400).await;

        let mut payments = self.payments.write().await;
        let payment = Payment {
            id: PaymentId::new(prefixed_id("payment", payments.next_id())),
            order_id: request.order_id.clone(),
            amount: request.amount,
            currency: request.currency.clone(),
            payment_method: request.payment_method.clone(),
            status: PaymentStatus::Accepted,
            created_at: Utc::now(),
        };
        debug!(payment_id = %payment.id, amount = %payment.amount, "Accepted mock payment");
        Ok(payments.insert(payment))
    }

    async fn get_payment(&self, id: &PaymentId) -> Result<Payment, PayingError> {
        self.latency.wait(200).await;

        self.payments
            .read()
            .await
            .find(|p| &p.id == id)
            .cloned()
            .ok_or_else(|| not_found(id))
    }

    async fn list_payments(
        &self,
        params: &ListPaymentsParams,
    ) -> Result<Vec<Payment>, PayingError> {
        self.latency.wait(300).await;

        let payments = self.payments.read().await;
        Ok(match &params.order_id {
            Some(order_id) => payments.filter(|p| &p.order_id == order_id),
            None => payments.records().to_vec(),
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use boutique_core::OrderId;
    use rust_decimal::Decimal;

    use super::*;

    fn service() -> InMemoryPayingService {
        InMemoryPayingService::new(Latency::None)
    }

    #[tokio::test]
    async fn test_payment_always_accepted() {
        let service = service();
        let request = ProcessPaymentRequest::new(
            OrderId::new("order-uuid-004"),
            Decimal::new(13_998, 2),
            "PAYPAL",
        );

        let payment = service.process_payment(&request).await.unwrap();
        assert_eq!(payment.id.as_str(), "payment-uuid-004");
        assert_eq!(payment.status, PaymentStatus::Accepted);
        assert_eq!(payment.currency, "EUR");
        assert_eq!(payment.amount, Decimal::new(13_998, 2));

        let fetched = service.get_payment(&payment.id).await.unwrap();
        assert_eq!(fetched, payment);
    }

    #[tokio::test]
    async fn test_list_payments_by_order() {
        let payments = service()
            .list_payments(&ListPaymentsParams::for_order("order-uuid-003"))
            .await
            .unwrap();
        assert_eq!(payments.len(), 1);
        assert_eq!(payments[0].payment_method, "PAYPAL");
    }

    #[tokio::test]
    async fn test_missing_payment() {
        let err = service()
            .get_payment(&PaymentId::new("payment-uuid-999"))
            .await
            .unwrap_err();
        assert!(err.is_not_found());
    }
}
