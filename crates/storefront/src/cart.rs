//! Shopping cart store.
//!
//! Lines are kept in insertion order, one per product. Every mutation
//! rewrites the whole list under [`CART_KEY`] in local storage.

use std::sync::{Arc, PoisonError, RwLock};

use boutique_client::LocalStorage;
use boutique_client::storage::{CART_KEY, read_json, write_json};
use boutique_core::{
    CartItem, CartSummary, CreateOrderRequest, OrderItem, Product, ProductId, UserId,
};
use chrono::Utc;
use rust_decimal::Decimal;
use tracing::{debug, error};

/// The customer's cart. Clones share state.
#[derive(Debug, Clone)]
pub struct CartStore {
    inner: Arc<CartStoreInner>,
}

#[derive(Debug)]
struct CartStoreInner {
    storage: Arc<dyn LocalStorage>,
    items: RwLock<Vec<CartItem>>,
}

fn total_quantity(items: &[CartItem]) -> u32 {
    items
        .iter()
        .fold(0, |total, item| total.saturating_add(item.quantity))
}

impl CartStore {
    /// Create an empty cart persisted to `storage`.
    #[must_use]
    pub fn new(storage: Arc<dyn LocalStorage>) -> Self {
        Self {
            inner: Arc::new(CartStoreInner {
                storage,
                items: RwLock::new(Vec::new()),
            }),
        }
    }

    /// Load the persisted cart.
    ///
    /// A missing or unreadable cart keeps the current lines.
    pub fn initialize(&self) {
        match read_json::<Vec<CartItem>>(self.inner.storage.as_ref(), CART_KEY) {
            Ok(Some(items)) => {
                debug!(lines = items.len(), "Loaded cart from storage");
                *self.write() = items;
            }
            Ok(None) => {}
            Err(e) => error!(error = %e, "Failed to load cart from storage"),
        }
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, Vec<CartItem>> {
        self.inner.items.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, Vec<CartItem>> {
        self.inner.items.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Apply `change` to the lines and persist the result.
    fn mutate(&self, change: impl FnOnce(&mut Vec<CartItem>)) {
        let mut items = self.write();
        change(&mut items);
        if let Err(e) = write_json(self.inner.storage.as_ref(), CART_KEY, &*items) {
            error!(error = %e, "Failed to persist cart");
        }
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// Snapshot of the lines.
    #[must_use]
    pub fn items(&self) -> Vec<CartItem> {
        self.read().clone()
    }

    /// Sum of quantities, saturating at `u32::MAX`.
    #[must_use]
    pub fn total_items(&self) -> u32 {
        total_quantity(&self.read())
    }

    /// Sum of price × quantity.
    #[must_use]
    pub fn total_price(&self) -> Decimal {
        self.read().iter().map(CartItem::line_total).sum()
    }

    /// Returns true if the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    /// Totals for display.
    #[must_use]
    pub fn summary(&self) -> CartSummary {
        let items = self.read();
        CartSummary {
            total_items: total_quantity(&items),
            total_price: items.iter().map(CartItem::line_total).sum(),
            item_count: items.len(),
        }
    }

    /// Quantity of a product, 0 if absent.
    #[must_use]
    pub fn item_quantity(&self, product_id: &ProductId) -> u32 {
        self.read()
            .iter()
            .find(|item| &item.product.id == product_id)
            .map_or(0, |item| item.quantity)
    }

    /// Returns true if the product is in the cart.
    #[must_use]
    pub fn has_item(&self, product_id: &ProductId) -> bool {
        self.read().iter().any(|item| &item.product.id == product_id)
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Add `quantity` of a product, merging with an existing line.
    ///
    /// Adding zero is ignored.
    pub fn add_item(&self, product: Product, quantity: u32) {
        if quantity == 0 {
            return;
        }

        self.mutate(|items| {
            match items.iter_mut().find(|item| item.product.id == product.id) {
                Some(item) => item.quantity = item.quantity.saturating_add(quantity),
                None => items.push(CartItem {
                    product,
                    quantity,
                    added_at: Utc::now(),
                }),
            }
        });
    }

    /// Set a line's quantity. Zero or less removes the line; unknown products are ignored.
    pub fn update_quantity(&self, product_id: &ProductId, quantity: i64) {
        if !self.has_item(product_id) {
            return;
        }

        if quantity <= 0 {
            self.remove_item(product_id);
            return;
        }
        let quantity = u32::try_from(quantity).unwrap_or(u32::MAX);

        self.mutate(|items| {
            if let Some(item) = items.iter_mut().find(|item| &item.product.id == product_id) {
                item.quantity = quantity;
            }
        });
    }

    /// Add one to a line.
    pub fn increment_item(&self, product_id: &ProductId) {
        if !self.has_item(product_id) {
            return;
        }

        self.mutate(|items| {
            if let Some(item) = items.iter_mut().find(|item| &item.product.id == product_id) {
                item.quantity = item.quantity.saturating_add(1);
            }
        });
    }

    /// Take one from a line, removing it when it reaches zero.
    pub fn decrement_item(&self, product_id: &ProductId) {
        if !self.has_item(product_id) {
            return;
        }

        self.mutate(|items| {
            if let Some(item) = items.iter_mut().find(|item| &item.product.id == product_id)
                && item.quantity > 1
            {
                item.quantity -= 1;
            } else {
                items.retain(|item| &item.product.id != product_id);
            }
        });
    }

    /// Drop a line.
    pub fn remove_item(&self, product_id: &ProductId) {
        self.mutate(|items| items.retain(|item| &item.product.id != product_id));
    }

    /// Drop every line.
    pub fn clear(&self) {
        self.mutate(Vec::clear);
    }

    /// Order request for the current lines, priced at the cart's snapshot.
    ///
    /// The cart is left untouched.
    #[must_use]
    pub fn checkout_request(&self, user_id: UserId) -> CreateOrderRequest {
        let items = self.read();
        CreateOrderRequest {
            user_id,
            items: items
                .iter()
                .map(|item| OrderItem {
                    product_id: item.product.id.clone(),
                    quantity: item.quantity,
                    price: item.product.price,
                })
                .collect(),
            total_amount: items.iter().map(CartItem::line_total).sum(),
        }
    }
}
