//! Ordering service: orders and their status.

use std::sync::Arc;

use async_trait::async_trait;
use boutique_core::{
    CreateOrderRequest, ListOrdersParams, Order, OrderId, OrderStatus, OrderingError,
    UpdateOrderStatusRequest,
};
use chrono::Utc;
use tokio::sync::RwLock;
use tracing::{debug, instrument};
use url::Url;

use super::collection::{Collection, prefixed_id};
use super::fixtures;
use crate::http::{ApiRequest, RestClient};
use crate::latency::Latency;

/// Order operations.
#[async_trait]
pub trait OrderingService: Send + Sync + std::fmt::Debug {
    /// Place an order. New orders start as `CREATED`.
    async fn create_order(&self, request: &CreateOrderRequest) -> Result<Order, OrderingError>;

    /// List orders, optionally only one user's.
    async fn list_orders(&self, params: &ListOrdersParams) -> Result<Vec<Order>, OrderingError>;

    /// Fetch one order.
    async fn get_order(&self, id: &OrderId) -> Result<Order, OrderingError>;

    /// Overwrite an order's status. Any status may follow any other.
    async fn update_order_status(
        &self,
        id: &OrderId,
        request: &UpdateOrderStatusRequest,
    ) -> Result<Order, OrderingError>;
}

fn not_found(id: &OrderId) -> OrderingError {
    OrderingError::not_found(format!("Order with ID {id} not found"))
}

/// Ordering backend over HTTP.
#[derive(Debug, Clone)]
pub struct RemoteOrderingService {
    client: RestClient<OrderingError>,
}

impl RemoteOrderingService {
    /// Client for the ordering API at `base_url`.
    #[must_use]
    pub const fn new(http: reqwest::Client, base_url: Url) -> Self {
        Self {
            client: RestClient::new(http, base_url),
        }
    }
}

#[async_trait]
impl OrderingService for RemoteOrderingService {
    #[instrument(skip(self, request), fields(user_id = %request.user_id))]
    async fn create_order(&self, request: &CreateOrderRequest) -> Result<Order, OrderingError> {
        let request = ApiRequest::post("create order", &["orders"]).json(request);
        self.client.send(request).await?.item("order")
    }

    #[instrument(skip(self))]
    async fn list_orders(&self, params: &ListOrdersParams) -> Result<Vec<Order>, OrderingError> {
        let request = ApiRequest::get("fetch orders", &["orders"])
            .query("userId", params.user_id.as_ref().map(|id| id.as_str()));
        self.client.send(request).await?.list("orders")
    }

    #[instrument(skip(self), fields(order_id = %id))]
    async fn get_order(&self, id: &OrderId) -> Result<Order, OrderingError> {
        let request = ApiRequest::get("fetch order", &["orders", id.as_str()])
            .on_not_found(format!("Order with ID {id} not found"));
        self.client.send(request).await?.item("order")
    }

    #[instrument(skip(self, request), fields(order_id = %id, status = %request.status))]
    async fn update_order_status(
        &self,
        id: &OrderId,
        request: &UpdateOrderStatusRequest,
    ) -> Result<Order, OrderingError> {
        let request = ApiRequest::put("update order status", &["orders", id.as_str(), "status"])
            .json(request)
            .on_not_found(format!("Order with ID {id} not found"));
        self.client.send(request).await?.item("order")
    }
}

/// Ordering backed by fixture orders. Clones share state.
#[derive(Debug, Clone)]
pub struct InMemoryOrderingService {
    orders: Arc<RwLock<Collection<Order>>>,
    latency: Latency,
}

impl InMemoryOrderingService {
    /// Seeded with the fixture orders.
    #[must_use]
    pub fn new(latency: Latency) -> Self {
        Self::with_orders(fixtures::orders(), latency)
    }

    /// Seeded with `orders`.
    #[must_use]
    pub fn with_orders(orders: Vec<Order>, latency: Latency) -> Self {
        Self {
            orders: Arc::new(RwLock::new(Collection::seeded(orders))),
            latency,
        }
    }
}

impl Default for InMemoryOrderingService {
    fn default() -> Self {
        Self::new(Latency::default())
    }
}

#[async_trait]
impl OrderingService for InMemoryOrderingService {
    async fn create_order(&self, request: &CreateOrderRequest) -> Result<Order, OrderingError> {
        self.latency.wait(500).await;

        let mut orders = self.orders.write().await;
        let order = Order {
            id: OrderId::new(prefixed_id("order", orders.next_id())),
            user_id: request.user_id.clone(),
            items: request.items.clone(),
            total_amount: request.total_amount,
            status: OrderStatus::Created,
            created_at: Utc::now(),
        };
        debug!(order_id = %order.id, "Created mock order");
        Ok(orders.insert(order))
    }

    async fn list_orders(&self, params: &ListOrdersParams) -> Result<Vec<Order>, OrderingError> {
        self.latency.wait(300).await;

        let orders = self.orders.read().await;
        Ok(match &params.user_id {
            Some(user_id) => orders.filter(|o| &o.user_id == user_id),
            None => orders.records().to_vec(),
        })
    }

    async fn get_order(&self, id: &OrderId) -> Result<Order, OrderingError> {
        self.latency.wait(200).await;

        self.orders
            .read()
            .await
            .find(|o| &o.id == id)
            .cloned()
            .ok_or_else(|| not_found(id))
    }

    async fn update_order_status(
        &self,
        id: &OrderId,
        request: &UpdateOrderStatusRequest,
    ) -> Result<Order, OrderingError> {
        self.latency.wait(300).await;

        let mut orders = self.orders.write().await;
        let order = orders.find_mut(|o| &o.id == id).ok_or_else(|| not_found(id))?;
        order.status = request.status;
        debug!(order_id = %id, status = %request.status, "Updated mock order status");
        Ok(order.clone())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use boutique_core::{OrderItem, ProductId, UserId};
    use rust_decimal::Decimal;

    use super::*;

    fn service() -> InMemoryOrderingService {
        InMemoryOrderingService::new(Latency::None)
    }

    fn request(user: &str) -> CreateOrderRequest {
        CreateOrderRequest {
            user_id: UserId::new(user),
            items: vec![OrderItem {
                product_id: ProductId::new("8"),
                quantity: 2,
                price: Decimal::new(12_999, 2),
            }],
            total_amount: Decimal::new(25_998, 2),
        }
    }

    #[tokio::test]
    async fn test_create_order_starts_created() {
        let service = service();

        let order = service.create_order(&request("user-uuid-003")).await.unwrap();
        assert_eq!(order.id.as_str(), "order-uuid-005");
        assert_eq!(order.status, OrderStatus::Created);

        let next = service.create_order(&request("user-uuid-003")).await.unwrap();
        assert_eq!(next.id.as_str(), "order-uuid-006");

        let all = service.list_orders(&ListOrdersParams::default()).await.unwrap();
        assert_eq!(all.len(), 6);
        assert_eq!(all.last().map(|o| &o.id), Some(&next.id));
    }

    #[tokio::test]
    async fn test_list_orders_by_user() {
        let orders = service()
            .list_orders(&ListOrdersParams::for_user("user-uuid-001"))
            .await
            .unwrap();
        let ids: Vec<&str> = orders.iter().map(|o| o.id.as_str()).collect();
        assert_eq!(ids, ["order-uuid-001", "order-uuid-002", "order-uuid-004"]);

        let none = service()
            .list_orders(&ListOrdersParams::for_user("user-uuid-404"))
            .await
            .unwrap();
        assert!(none.is_empty());
    }

    #[tokio::test]
    async fn test_status_overwrite_is_unvalidated() {
        let service = service();
        let id = OrderId::new("order-uuid-001");

        let order = service
            .update_order_status(
                &id,
                &UpdateOrderStatusRequest {
                    status: OrderStatus::Created,
                },
            )
            .await
            .unwrap();
        assert_eq!(order.status, OrderStatus::Created);
        assert_eq!(
            service.get_order(&id).await.unwrap().status,
            OrderStatus::Created
        );
    }

    #[tokio::test]
    async fn test_missing_order() {
        let err = service()
            .get_order(&OrderId::new("order-uuid-999"))
            .await
            .unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(err.message(), "Order with ID order-uuid-999 not found");
    }

    #[tokio::test(start_paused = true)]
    async fn test_simulated_latency() {
        let service = InMemoryOrderingService::new(Latency::Simulated);
        let start = tokio::time::Instant::now();
        service.create_order(&request("user-uuid-001")).await.unwrap();
        assert!(start.elapsed() >= std::time::Duration::from_millis(500));
    }
}
