//! Order, shipment and checkout commands.

use boutique_core::{ListOrdersParams, OrderId, ShipmentId, UserId};

use super::{CommandError, Context, print_json};

/// List orders, optionally only one user's.
pub async fn list(ctx: &Context, user: Option<String>) -> Result<(), CommandError> {
    let params = ListOrdersParams {
        user_id: user.map(UserId::new),
    };
    let orders = ctx.admin.ordering().list_orders(&params).await?;
    print_json(&orders)
}

/// Show one order.
pub async fn show(ctx: &Context, id: &str) -> Result<(), CommandError> {
    let order = ctx.admin.ordering().get_order(&OrderId::new(id)).await?;
    print_json(&order)
}

/// Show one shipment.
pub async fn show_shipment(ctx: &Context, id: &str) -> Result<(), CommandError> {
    let shipment = ctx
        .admin
        .shipping()
        .get_shipment(&ShipmentId::new(id))
        .await?;
    print_json(&shipment)
}

/// Place and pay for an order covering the cart.
pub async fn checkout(ctx: &Context, payment_method: &str) -> Result<(), CommandError> {
    let receipt = ctx.storefront.checkout(payment_method).await?;
    print_json(&receipt)
}
