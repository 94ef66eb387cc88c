//! Domain services.
//!
//! Each domain has one async trait and two implementations: `Remote*` talks
//! to the backend over HTTP, `InMemory*` serves seeded fixtures and never
//! touches the network. [`Services`] picks one per domain from
//! [`ClientConfig`] and hands out shared trait objects.

mod collection;
pub mod fixtures;

pub mod cataloging;
pub mod ordering;
pub mod paying;
pub mod profiling;
pub mod shipping;

use std::sync::Arc;

pub use cataloging::{CatalogingService, InMemoryCatalogingService, RemoteCatalogingService};
pub use ordering::{InMemoryOrderingService, OrderingService, RemoteOrderingService};
pub use paying::{InMemoryPayingService, PayingService, RemotePayingService};
pub use profiling::{InMemoryProfilingService, ProfilingService, RemoteProfilingService};
pub use shipping::{InMemoryShippingService, RemoteShippingService, ShippingService};

use tracing::info;

use crate::config::{ClientConfig, Domain};
use crate::error::ClientError;
use crate::http::build_http_client;
use crate::latency::Latency;

/// One handle per domain, resolved once from configuration.
#[derive(Debug, Clone)]
pub struct Services {
    pub cataloging: Arc<dyn CatalogingService>,
    pub ordering: Arc<dyn OrderingService>,
    pub shipping: Arc<dyn ShippingService>,
    pub paying: Arc<dyn PayingService>,
    pub profiling: Arc<dyn ProfilingService>,
}

impl Services {
    /// Build every service, remote or in-memory per the domain's fake flag.
    ///
    /// All remote services share one connection pool.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::HttpClient` if the HTTP client cannot be built.
    pub fn from_config(config: &ClientConfig) -> Result<Self, ClientError> {
        let http = build_http_client()?;

        Ok(Self {
            cataloging: cataloging_service(config, &http),
            ordering: ordering_service(config, &http),
            shipping: shipping_service(config, &http),
            paying: paying_service(config, &http),
            profiling: profiling_service(config, &http),
        })
    }

    /// Every domain in-memory, seeded from fixtures.
    #[must_use]
    pub fn in_memory(latency: Latency) -> Self {
        Self {
            cataloging: Arc::new(InMemoryCatalogingService::new(latency)),
            ordering: Arc::new(InMemoryOrderingService::new(latency)),
            shipping: Arc::new(InMemoryShippingService::new(latency)),
            paying: Arc::new(InMemoryPayingService::new(latency)),
            profiling: Arc::new(InMemoryProfilingService::new(latency)),
        }
    }
}

/// Returns true if `domain` is served from fixtures, logging the choice.
fn uses_fake_data(config: &ClientConfig, domain: Domain) -> bool {
    let domain_config = config.domain(domain);
    if domain_config.use_fake_data {
        info!(%domain, "Using in-memory fake data");
    } else {
        info!(%domain, base_url = %domain_config.base_url, "Using remote backend");
    }
    domain_config.use_fake_data
}

/// Cataloging service selected by `config`; remote calls go through `http`.
#[must_use]
pub fn cataloging_service(
    config: &ClientConfig,
    http: &reqwest::Client,
) -> Arc<dyn CatalogingService> {
    if uses_fake_data(config, Domain::Cataloging) {
        Arc::new(InMemoryCatalogingService::new(config.latency))
    } else {
        Arc::new(RemoteCatalogingService::new(
            http.clone(),
            config.cataloging.base_url.clone(),
        ))
    }
}

/// Ordering service selected by `config`.
#[must_use]
pub fn ordering_service(
    config: &ClientConfig,
    http: &reqwest::Client,
) -> Arc<dyn OrderingService> {
    if uses_fake_data(config, Domain::Ordering) {
        Arc::new(InMemoryOrderingService::new(config.latency))
    } else {
        Arc::new(RemoteOrderingService::new(
            http.clone(),
            config.ordering.base_url.clone(),
        ))
    }
}

/// Shipping service selected by `config`.
#[must_use]
pub fn shipping_service(
    config: &ClientConfig,
    http: &reqwest::Client,
) -> Arc<dyn ShippingService> {
    if uses_fake_data(config, Domain::Shipping) {
        Arc::new(InMemoryShippingService::new(config.latency))
    } else {
        Arc::new(RemoteShippingService::new(
            http.clone(),
            config.shipping.base_url.clone(),
        ))
    }
}

/// Paying service selected by `config`.
#[must_use]
pub fn paying_service(
    config: &ClientConfig,
    http: &reqwest::Client,
) -> Arc<dyn PayingService> {
    if uses_fake_data(config, Domain::Paying) {
        Arc::new(InMemoryPayingService::new(config.latency))
    } else {
        Arc::new(RemotePayingService::new(
            http.clone(),
            config.paying.base_url.clone(),
        ))
    }
}

/// Profiling service selected by `config`.
#[must_use]
pub fn profiling_service(
    config: &ClientConfig,
    http: &reqwest::Client,
) -> Arc<dyn ProfilingService> {
    if uses_fake_data(config, Domain::Profiling) {
        Arc::new(InMemoryProfilingService::new(config.latency))
    } else {
        Arc::new(RemoteProfilingService::new(
            http.clone(),
            config.profiling.base_url.clone(),
        ))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use boutique_core::{ProductId, ProductListParams, ShipmentId};

    use super::*;

    #[tokio::test]
    async fn test_fake_config_never_touches_network() {
        // Unroutable base URL: any HTTP call would fail.
        let mut config = ClientConfig::fake("/tmp/boutique-services-test");
        config.api_base_url = "http://127.0.0.1:9/api".parse().unwrap();
        for domain in Domain::ALL {
            config.domain_mut(domain).base_url = "http://127.0.0.1:9/api".parse().unwrap();
        }

        let services = Services::from_config(&config).unwrap();
        let list = services
            .cataloging
            .list_products(&ProductListParams::default())
            .await
            .unwrap();
        assert_eq!(list.total, 8);

        let product = services
            .cataloging
            .get_product(&ProductId::new("3"))
            .await
            .unwrap();
        assert_eq!(product.name, "Mechanical Keyboard RGB");
    }

    #[tokio::test]
    async fn test_remote_selected_without_fake_flag() {
        let mut config = ClientConfig::fake("/tmp/boutique-services-test");
        config.cataloging.use_fake_data = false;
        config.cataloging.base_url = "http://127.0.0.1:9/api/cataloging".parse().unwrap();

        let services = Services::from_config(&config).unwrap();
        let err = services
            .cataloging
            .list_products(&ProductListParams::default())
            .await
            .unwrap_err();
        assert_eq!(err.message(), "Failed to fetch products");
        assert!(std::error::Error::source(&err).is_some());
    }

    #[tokio::test]
    async fn test_single_domain_builder() {
        let config = ClientConfig::fake("/tmp/boutique-services-test");
        let http = build_http_client().unwrap();

        let shipment = shipping_service(&config, &http)
            .get_shipment(&ShipmentId::new("shipment-uuid-001"))
            .await
            .unwrap();
        assert_eq!(shipment.address.city, "Paris");
    }
}
