//! Back-office application context.

use std::sync::Arc;

use boutique_client::http::build_http_client;
use boutique_client::services::{cataloging_service, ordering_service, shipping_service};
use boutique_client::{
    CatalogingService, ClientConfig, ClientError, FileStorage, LocalStorage, OrderingService,
    Services, ShippingService, TokenStorage,
};

use crate::auth::AdminAuthStore;

/// Everything the back office needs. Clones share state.
#[derive(Debug, Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

#[derive(Debug)]
struct AppStateInner {
    config: ClientConfig,
    cataloging: Arc<dyn CatalogingService>,
    ordering: Arc<dyn OrderingService>,
    shipping: Arc<dyn ShippingService>,
    auth: AdminAuthStore,
}

impl AppState {
    /// Build the back-office services from `config` and the session over
    /// `storage`. Paying and profiling are never built.
    ///
    /// # Errors
    ///
    /// Returns `ClientError` if the HTTP client cannot be built.
    pub fn new(config: ClientConfig, storage: Arc<dyn LocalStorage>) -> Result<Self, ClientError> {
        let http = build_http_client()?;
        let cataloging = cataloging_service(&config, &http);
        let ordering = ordering_service(&config, &http);
        let shipping = shipping_service(&config, &http);

        Ok(Self {
            inner: Arc::new(AppStateInner {
                config,
                cataloging,
                ordering,
                shipping,
                auth: AdminAuthStore::new(TokenStorage::new(storage)),
            }),
        })
    }

    /// Build with file storage in the configured directory.
    ///
    /// # Errors
    ///
    /// Returns `ClientError` if the HTTP client cannot be built.
    pub fn from_config(config: ClientConfig) -> Result<Self, ClientError> {
        let storage = Arc::new(FileStorage::new(config.storage_dir.clone()));
        Self::new(config, storage)
    }

    /// Assemble from prebuilt services, keeping the back-office ones.
    #[must_use]
    pub fn with_services(
        config: ClientConfig,
        services: Services,
        storage: Arc<dyn LocalStorage>,
    ) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                config,
                cataloging: services.cataloging,
                ordering: services.ordering,
                shipping: services.shipping,
                auth: AdminAuthStore::new(TokenStorage::new(storage)),
            }),
        }
    }

    /// Restore the admin session from storage.
    pub fn initialize(&self) {
        self.inner.auth.initialize();
    }

    #[must_use]
    pub fn config(&self) -> &ClientConfig {
        &self.inner.config
    }

    #[must_use]
    pub fn cataloging(&self) -> &Arc<dyn CatalogingService> {
        &self.inner.cataloging
    }

    #[must_use]
    pub fn ordering(&self) -> &Arc<dyn OrderingService> {
        &self.inner.ordering
    }

    #[must_use]
    pub fn shipping(&self) -> &Arc<dyn ShippingService> {
        &self.inner.shipping
    }

    /// Get a reference to the admin session store.
    #[must_use]
    pub fn auth(&self) -> &AdminAuthStore {
        &self.inner.auth
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use boutique_client::{Latency, MemoryStorage};
    use boutique_core::{
        ListOrdersParams, ListShipmentsParams, OrderId, OrderStatus, ProductListParams,
        UpdateOrderStatusRequest,
    };
    use secrecy::SecretString;

    use super::*;
    use crate::auth::ADMIN_EMAIL;

    fn state(storage: &MemoryStorage) -> AppState {
        AppState::with_services(
            ClientConfig::fake("/tmp/boutique-admin-test"),
            Services::in_memory(Latency::None),
            Arc::new(storage.clone()),
        )
    }

    #[test]
    fn test_session_survives_restart() {
        let storage = MemoryStorage::new();
        state(&storage)
            .auth()
            .login(ADMIN_EMAIL, &SecretString::from("admin123".to_string()))
            .unwrap();

        let restarted = state(&storage);
        restarted.initialize();
        assert!(restarted.auth().is_authenticated());
    }

    #[tokio::test]
    async fn test_new_serves_back_office_domains() {
        let state = AppState::new(
            ClientConfig::fake("/tmp/boutique-admin-test"),
            Arc::new(MemoryStorage::new()),
        )
        .unwrap();

        let products = state
            .cataloging()
            .list_products(&ProductListParams::default())
            .await
            .unwrap();
        assert_eq!(products.total, 8);
        let shipments = state
            .shipping()
            .list_shipments(&ListShipmentsParams::default())
            .await
            .unwrap();
        assert_eq!(shipments.len(), 3);
    }

    #[tokio::test]
    async fn test_manage_order_status() {
        let state = state(&MemoryStorage::new());
        let id = OrderId::new("order-uuid-001");

        let order = state
            .ordering()
            .update_order_status(
                &id,
                &UpdateOrderStatusRequest {
                    status: OrderStatus::Shipped,
                },
            )
            .await
            .unwrap();
        assert_eq!(order.status, OrderStatus::Shipped);

        let orders = state
            .ordering()
            .list_orders(&ListOrdersParams::default())
            .await
            .unwrap();
        assert!(orders.iter().any(|o| o.id == id && o.status == OrderStatus::Shipped));
    }
}
