//! Boutique back office.
//!
//! Staff-facing counterpart to the storefront: a locally checked admin
//! session plus the cataloging, ordering and shipping services used to
//! manage products, orders and shipments.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod auth;
pub mod error;
pub mod state;

pub use auth::AdminAuthStore;
pub use error::AdminAuthError;
pub use state::AppState;
