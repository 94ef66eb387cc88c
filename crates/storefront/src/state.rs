//! Front-office application context.

use std::sync::Arc;

use boutique_client::{
    ClientConfig, ClientError, FileStorage, LocalStorage, Services, TokenStorage,
};

use crate::auth::AuthStore;
use crate::cart::CartStore;

/// Everything the storefront needs, built once and passed around.
///
/// This struct is cheaply cloneable via `Arc`; clones share the same
/// services, session and cart.
#[derive(Debug, Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

#[derive(Debug)]
struct AppStateInner {
    config: ClientConfig,
    services: Services,
    auth: AuthStore,
    cart: CartStore,
}

impl AppState {
    /// Build services from `config` and stores over `storage`.
    ///
    /// # Errors
    ///
    /// Returns `ClientError` if the HTTP client cannot be built.
    pub fn new(config: ClientConfig, storage: Arc<dyn LocalStorage>) -> Result<Self, ClientError> {
        let services = Services::from_config(&config)?;
        Ok(Self::with_services(config, services, storage))
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

    /// Assemble from prebuilt services.
    #[must_use]
    pub fn with_services(
        config: ClientConfig,
        services: Services,
        storage: Arc<dyn LocalStorage>,
    ) -> Self {
        let auth = AuthStore::new(
            services.profiling.clone(),
            TokenStorage::new(storage.clone()),
        );
        let cart = CartStore::new(storage);

        Self {
            inner: Arc::new(AppStateInner {
                config,
                services,
                auth,
                cart,
            }),
        }
    }

    /// Restore the session and the cart from storage.
    pub fn initialize(&self) {
        self.inner.auth.initialize();
        self.inner.cart.initialize();
    }

    /// Get a reference to the client configuration.
    #[must_use]
    pub fn config(&self) -> &ClientConfig {
        &self.inner.config
    }

    /// Get a reference to the domain services.
    #[must_use]
    pub fn services(&self) -> &Services {
        &self.inner.services
    }

    /// Get a reference to the session store.
    #[must_use]
    pub fn auth(&self) -> &AuthStore {
        &self.inner.auth
    }

    /// Get a reference to the cart store.
    #[must_use]
    pub fn cart(&self) -> &CartStore {
        &self.inner.cart
    }
}
