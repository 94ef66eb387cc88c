//! Command implementations.
//!
//! Every command runs against a [`Context`] built from the environment and
//! prints its result as pretty JSON.

pub mod admin;
pub mod cart;
pub mod catalog;
pub mod orders;
pub mod session;

use std::sync::Arc;

use boutique_admin::AdminAuthError;
use boutique_client::{ClientConfig, ClientError, FileStorage, Services};
use boutique_core::{CatalogingError, OrderingError, ShippingError};
use boutique_storefront::{AuthError, CheckoutError};
use serde::Serialize;
use thiserror::Error;

/// Errors that can occur while running a command.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error(transparent)]
    Cataloging(#[from] CatalogingError),

    #[error(transparent)]
    Ordering(#[from] OrderingError),

    #[error(transparent)]
    Shipping(#[from] ShippingError),

    #[error(transparent)]
    Checkout(#[from] CheckoutError),

    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    AdminAuth(#[from] AdminAuthError),

    /// Result could not be rendered.
    #[error("Failed to render output: {0}")]
    Output(#[from] serde_json::Error),
}

/// Storefront and back-office state over one set of services.
///
/// The two sessions live in separate storage directories so a customer
/// login never overwrites the admin one.
pub struct Context {
    pub storefront: boutique_storefront::AppState,
    pub admin: boutique_admin::AppState,
}

impl Context {
    /// Build from environment variables and restore persisted state.
    pub fn from_env() -> Result<Self, ClientError> {
        let config = ClientConfig::from_env()?;
        let services = Services::from_config(&config)?;

        let storefront_storage = Arc::new(FileStorage::new(config.storage_dir.join("storefront")));
        let admin_storage = Arc::new(FileStorage::new(config.storage_dir.join("back-office")));

        let storefront = boutique_storefront::AppState::with_services(
            config.clone(),
            services.clone(),
            storefront_storage,
        );
        let admin = boutique_admin::AppState::with_services(config, services, admin_storage);

        storefront.initialize();
        admin.initialize();

        Ok(Self { storefront, admin })
    }
}

/// Print `value` as pretty JSON on stdout.
#[allow(clippy::print_stdout)]
pub fn print_json(value: &impl Serialize) -> Result<(), CommandError> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
