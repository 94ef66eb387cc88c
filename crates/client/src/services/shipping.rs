//! Shipping service: shipments for orders.

use std::sync::Arc;

use async_trait::async_trait;
use boutique_core::{
    CreateShipmentRequest, ListShipmentsParams, Shipment, ShipmentId, ShippingError,
    ShippingStatus, UpdateShipmentStatusRequest,
};
use chrono::Utc;
use tokio::sync::RwLock;
use tracing::{debug, instrument};
use url::Url;

use super::collection::{Collection, prefixed_id};
use super::fixtures;
use crate::http::{ApiRequest, RestClient};
use crate::latency::Latency;

/// Shipment operations.
#[async_trait]
pub trait ShippingService: Send + Sync + std::fmt::Debug {
    /// Open a shipment for an order. New shipments start as `PREPARING`.
    async fn create_shipment(
        &self,
        request: &CreateShipmentRequest,
    ) -> Result<Shipment, ShippingError>;

    /// Fetch one shipment.
    async fn get_shipment(&self, id: &ShipmentId) -> Result<Shipment, ShippingError>;

    /// Overwrite a shipment's status.
    async fn update_shipment_status(
        &self,
        id: &ShipmentId,
        request: &UpdateShipmentStatusRequest,
    ) -> Result<Shipment, ShippingError>;

    /// List shipments, optionally only one order's.
    async fn list_shipments(
        &self,
        params: &ListShipmentsParams,
    ) -> Result<Vec<Shipment>, ShippingError>;
}

fn not_found(id: &ShipmentId) -> ShippingError {
    ShippingError::not_found(format!("Shipment with ID {id} not found"))
}

/// Shipping backend over HTTP.
#[derive(Debug, Clone)]
pub struct RemoteShippingService {
    client: RestClient<ShippingError>,
}

impl RemoteShippingService {
    /// Client for the shipping API at `base_url`.
    #[must_use]
    pub const fn new(http: reqwest::Client, base_url: Url) -> Self {
        Self {
            client: RestClient::new(http, base_url),
        }
    }
}

#[async_trait]
impl ShippingService for RemoteShippingService {
    #[instrument(skip(self, request), fields(order_id = %request.order_id))]
    async fn create_shipment(
        &self,
        request: &CreateShipmentRequest,
    ) -> Result<Shipment, ShippingError> {
        let request = ApiRequest::post("create shipment", &["shipments"]).json(request);
        self.client.send(request).await?.item("shipment")
    }

    #[instrument(skip(self), fields(shipment_id = %id))]
    async fn get_shipment(&self, id: &ShipmentId) -> Result<Shipment, ShippingError> {
        let request = ApiRequest::get("fetch shipment", &["shipments", id.as_str()])
            .on_not_found(format!("Shipment with ID {id} not found"));
        self.client.send(request).await?.item("shipment")
    }

    #[instrument(skip(self, request), fields(shipment_id = %id, status = %request.status))]
    async fn update_shipment_status(
        &self,
        id: &ShipmentId,
        request: &UpdateShipmentStatusRequest,
    ) -> Result<Shipment, ShippingError> {
        let request = ApiRequest::put(
            "update shipment status",
            &["shipments", id.as_str(), "status"],
        )
        .json(request)
        .on_not_found(format!("Shipment with ID {id} not found"));
        self.client.send(request).await?.item("shipment")
    }

    #[instrument(skip(self))]
    async fn list_shipments(
        &self,
        params: &ListShipmentsParams,
    ) -> Result<Vec<Shipment>, ShippingError> {
        let request = ApiRequest::get("fetch shipments", &["shipments"])
            .query("orderId", params.order_id.as_ref().map(|id| id.as_str()));
        self.client.send(request).await?.list("shipments")
    }
}

/// Shipping backed by fixture shipments. Clones share state.
#[derive(Debug, Clone)]
pub struct InMemoryShippingService {
    shipments: Arc<RwLock<Collection<Shipment>>>,
    latency: Latency,
}

impl InMemoryShippingService {
    /// Seeded with the fixture shipments.
    #[must_use]
    pub fn new(latency: Latency) -> Self {
        Self::with_shipments(fixtures::shipments(), latency)
    }

    /// Seeded with `shipments`.
    #[must_use]
    pub fn with_shipments(shipments: Vec<Shipment>, latency: Latency) -> Self {
        Self {
            shipments: Arc::new(RwLock::new(Collection::seeded(shipments))),
            latency,
        }
    }
}

impl Default for InMemoryShippingService {
    fn default() -> Self {
        Self::new(Latency::default())
    }
}

#[async_trait]
impl ShippingService for InMemoryShippingService {
    async fn create_shipment(
        &self,
        request: &CreateShipmentRequest,
    ) -> Result<Shipment, ShippingError> {
        self.latency.wait(400).await;

        let mut shipments = self.shipments.write().await;
        let shipment = Shipment {
            id: ShipmentId::new(prefixed_id("shipment", shipments.next_id())),
            order_id: request.order_id.clone(),
            address: request.address.clone(),
            status: ShippingStatus::Preparing,
            created_at: Some(Utc::now()),
        };
        debug!(shipment_id = %shipment.id, "Created mock shipment");
        Ok(shipments.insert(shipment))
    }

    async fn get_shipment(&self, id: &ShipmentId) -> Result<Shipment, ShippingError> {
        self.latency.wait(200).await;

        self.shipments
            .read()
            .await
            .find(|s| &s.id == id)
            .cloned()
            .ok_or_else(|| not_found(id))
    }

    async fn update_shipment_status(
        &self,
        id: &ShipmentId,
        request: &UpdateShipmentStatusRequest,
    ) -> Result<Shipment, ShippingError> {
        self.latency.wait(300).await;

        let mut shipments = self.shipments.write().await;
        let shipment = shipments
            .find_mut(|s| &s.id == id)
            .ok_or_else(|| not_found(id))?;
        shipment.status = request.status;
        debug!(shipment_id = %id, status = %request.status, "Updated mock shipment status");
        Ok(shipment.clone())
    }

    async fn list_shipments(
        &self,
        params: &ListShipmentsParams,
    ) -> Result<Vec<Shipment>, ShippingError> {
        self.latency.wait(300).await;

        let shipments = self.shipments.read().await;
        Ok(match &params.order_id {
            Some(order_id) => shipments.filter(|s| &s.order_id == order_id),
            None => shipments.records().to_vec(),
        })
    }
}
