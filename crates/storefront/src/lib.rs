//! Boutique storefront state.
//!
//! Customer-facing state on top of the service clients: the login session
//! ([`AuthStore`]), the shopping cart ([`CartStore`]), the [`AppState`]
//! context that owns them, and checkout on top of all three.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod auth;
pub mod cart;
pub mod checkout;
pub mod error;
pub mod state;

pub use auth::AuthStore;
pub use cart::CartStore;
pub use checkout::CheckoutReceipt;
pub use error::{AuthError, CheckoutError};
pub use state::AppState;
