//! Cart checkout: order, payment, then the order is marked paid.

use boutique_core::{
    Order, OrderStatus, Payment, PaymentStatus, ProcessPaymentRequest, UpdateOrderStatusRequest,
};
use serde::Serialize;
use tracing::{info, instrument, warn};

use crate::error::CheckoutError;
use crate::state::AppState;

/// The paid order and its payment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckoutReceipt {
    pub order: Order,
    pub payment: Payment,
}

impl AppState {
    /// Order the cart for the logged-in user and pay with `payment_method`.
    ///
    /// The cart is cleared only once the payment is accepted and the order
    /// marked `PAID`. A refused payment leaves the order `CREATED` and the
    /// cart untouched.
    ///
    /// # Errors
    ///
    /// Returns `CheckoutError` if nobody is logged in, the cart is empty,
    /// a backend call fails or the payment is refused.
    #[instrument(skip(self))]
    pub async fn checkout(&self, payment_method: &str) -> Result<CheckoutReceipt, CheckoutError> {
        let user = self.auth().require_user()?;
        if self.cart().is_empty() {
            return Err(CheckoutError::EmptyCart);
        }

        let services = self.services();
        let order = services
            .ordering
            .create_order(&self.cart().checkout_request(user.id))
            .await?;

        let payment = services
            .paying
            .process_payment(&ProcessPaymentRequest::new(
                order.id.clone(),
                order.total_amount,
                payment_method,
            ))
            .await?;
        if payment.status == PaymentStatus::Refused {
            warn!(order_id = %order.id, payment_id = %payment.id, "Payment refused");
            return Err(CheckoutError::PaymentRefused(payment.id));
        }

        let order = services
            .ordering
            .update_order_status(
                &order.id,
                &UpdateOrderStatusRequest {
                    status: OrderStatus::Paid,
                },
            )
            .await?;
        self.cart().clear();

        info!(order_id = %order.id, payment_id = %payment.id, "Checkout complete");
        Ok(CheckoutReceipt { order, payment })
    }
}
