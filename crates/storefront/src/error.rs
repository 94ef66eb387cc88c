//! Front-office store errors.

use boutique_core::{OrderingError, PayingError, PaymentId, ProfilingError};
use thiserror::Error;

/// Errors from the session store.
#[derive(Debug, Error)]
pub enum AuthError {
    /// The profiling backend rejected or failed the call.
    #[error(transparent)]
    Profiling(#[from] ProfilingError),

    /// The operation needs a logged-in user.
    #[error("Not logged in")]
    NotAuthenticated,
}

impl AuthError {
    /// HTTP status behind the failure, if any.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Profiling(e) => e.status(),
            Self::NotAuthenticated => None,
        }
    }
}

/// Errors from placing an order for the cart.
#[derive(Debug, Error)]
pub enum CheckoutError {
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// Nothing to order.
    #[error("Cart is empty")]
    EmptyCart,

    #[error(transparent)]
    Ordering(#[from] OrderingError),

    #[error(transparent)]
    Paying(#[from] PayingError),

    /// The payment was recorded but refused; the order stays unpaid.
    #[error("Payment {0} was refused")]
    PaymentRefused(PaymentId),
}
