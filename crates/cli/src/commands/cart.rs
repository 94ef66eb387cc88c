//! Shopping cart commands.
//!
//! The cart lives in local storage, so it survives between invocations
//! even when the catalog is served from fake data.

use boutique_core::{CartItem, CartSummary, ProductId};
use serde::Serialize;

use super::{CommandError, Context, print_json};

#[derive(Serialize)]
struct CartView {
    items: Vec<CartItem>,
    summary: CartSummary,
}

pub fn show(ctx: &Context) -> Result<(), CommandError> {
    let cart = ctx.storefront.cart();
    print_json(&CartView {
        items: cart.items(),
        summary: cart.summary(),
    })
}

/// Look the product up, then add it.
pub async fn add(ctx: &Context, product_id: &str, quantity: u32) -> Result<(), CommandError> {
    let product = ctx
        .storefront
        .services()
        .cataloging
        .get_product(&ProductId::new(product_id))
        .await?;
    ctx.storefront.cart().add_item(product, quantity);
    show(ctx)
}

pub fn remove(ctx: &Context, product_id: &str) -> Result<(), CommandError> {
    ctx.storefront.cart().remove_item(&ProductId::new(product_id));
    show(ctx)
}

pub fn clear(ctx: &Context) -> Result<(), CommandError> {
    ctx.storefront.cart().clear();
    show(ctx)
}
