//! Catalog commands.
//!
//! ```bash
//! boutique products list --name mouse
//! boutique products show 2
//! ```

use boutique_core::{ProductId, ProductListParams};

use super::{CommandError, Context, print_json};

/// List products, optionally filtered by name.
pub async fn list(ctx: &Context, name: Option<String>) -> Result<(), CommandError> {
    let params = ProductListParams { name };
    let list = ctx
        .storefront
        .services()
        .cataloging
        .list_products(&params)
        .await?;
    print_json(&list)
}

/// Show one product.
pub async fn show(ctx: &Context, id: &str) -> Result<(), CommandError> {
    let product = ctx
        .storefront
        .services()
        .cataloging
        .get_product(&ProductId::new(id))
        .await?;
    print_json(&product)
}
