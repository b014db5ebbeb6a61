//! Local mirror of the server-side cart.
//!
//! The server owns the cart. The store keeps a read-optimized mirror for one
//! shopper and expresses every mutation through the increment/decrement calls
//! the backend actually offers; after each successful mutation the mirror is
//! rebuilt wholesale from the server. Concurrent mutations are accepted with
//! weak consistency, the store serves a single logical shopper.

use std::sync::Arc;

use rust_decimal::Decimal;
use tokio::sync::RwLock;
use tracing::{debug, warn};
use vitrin_api::objects::cart::CartItem;

use crate::backend::StorefrontBackend;
use crate::errors::FlowError;

pub struct CartStore {
    backend: Arc<dyn StorefrontBackend>,
    user_id: i64,
    items: RwLock<Vec<CartItem>>,
}

impl CartStore {
    /// A store with an empty mirror; call [`refresh`](Self::refresh) to
    /// populate it.
    pub fn new(backend: Arc<dyn StorefrontBackend>, user_id: i64) -> Self {
        Self {
            backend,
            user_id,
            items: RwLock::new(Vec::new()),
        }
    }

    pub fn user_id(&self) -> i64 {
        self.user_id
    }

    /// Current mirror snapshot.
    pub async fn items(&self) -> Vec<CartItem> {
        self.items.read().await.clone()
    }

    /// Mirror quantity for one product, zero when absent.
    pub async fn quantity_of(&self, product_id: i64) -> u32 {
        self.items
            .read()
            .await
            .iter()
            .find(|item| item.id == product_id)
            .map(|item| item.quantity)
            .unwrap_or(0)
    }

    /// Mirror total, `Σ price × quantity`.
    pub async fn total(&self) -> Decimal {
        self.items.read().await.iter().map(CartItem::subtotal).sum()
    }

    /// Rebuild the mirror wholesale from the server.
    ///
    /// Lines violating the cart item invariant are dropped with a warning. A
    /// fetch failure empties the mirror and is logged, never raised; the next
    /// successful refresh repopulates it. Returns the new snapshot.
    pub async fn refresh(&self) -> Vec<CartItem> {
        let fetched = match self.backend.fetch_cart(self.user_id).await {
            Ok(items) => items,
            Err(e) => {
                warn!(user_id = self.user_id, error = %e, "cart fetch failed, emptying mirror");
                self.items.write().await.clear();
                return Vec::new();
            }
        };
        let mut valid = Vec::with_capacity(fetched.len());
        for item in fetched {
            if item.is_valid() {
                valid.push(item);
            } else {
                warn!(
                    user_id = self.user_id,
                    product_id = item.id,
                    price = %item.price,
                    quantity = item.quantity,
                    "dropping invalid cart line from mirror"
                );
            }
        }
        debug!(user_id = self.user_id, lines = valid.len(), "cart mirror refreshed");
        *self.items.write().await = valid.clone();
        valid
    }

    /// Add `quantity` units of a product to the cart.
    ///
    /// A zero quantity is rejected before any network call.
    pub async fn add_item(&self, product_id: i64, quantity: u32) -> Result<(), FlowError> {
        if quantity == 0 {
            return Err(FlowError::Validation(
                "quantity must be at least 1".to_owned(),
            ));
        }
        self.backend
            .add_to_cart(self.user_id, product_id, quantity)
            .await?;
        debug!(user_id = self.user_id, product_id, quantity, "cart line incremented");
        self.refresh().await;
        Ok(())
    }

    /// Remove `quantity` units of a product, or the whole line when `None`.
    ///
    /// A product absent from the mirror is a validation error; the server
    /// drops the line once the decrement reaches zero.
    pub async fn remove_item(
        &self,
        product_id: i64,
        quantity: Option<u32>,
    ) -> Result<(), FlowError> {
        if quantity == Some(0) {
            return Err(FlowError::Validation(
                "quantity must be at least 1".to_owned(),
            ));
        }
        let current = self.quantity_of(product_id).await;
        if current == 0 {
            return Err(FlowError::Validation(format!(
                "product {product_id} is not in the cart"
            )));
        }
        let quantity = quantity.unwrap_or(current);
        self.backend
            .remove_from_cart(self.user_id, product_id, quantity)
            .await?;
        debug!(user_id = self.user_id, product_id, quantity, "cart line decremented");
        self.refresh().await;
        Ok(())
    }

    /// Bring the line to an absolute quantity by issuing the delta as one
    /// increment or decrement.
    ///
    /// Equal quantity issues nothing; anything below one removes the line
    /// entirely.
    pub async fn update_quantity(
        &self,
        product_id: i64,
        new_quantity: u32,
    ) -> Result<(), FlowError> {
        let current = self.quantity_of(product_id).await;
        if current == 0 {
            return Err(FlowError::Validation(format!(
                "product {product_id} is not in the cart"
            )));
        }
        if new_quantity == current {
            return Ok(());
        }
        if new_quantity < 1 {
            return self.remove_item(product_id, None).await;
        }
        if new_quantity > current {
            self.backend
                .add_to_cart(self.user_id, product_id, new_quantity - current)
                .await?;
        } else {
            self.backend
                .remove_from_cart(self.user_id, product_id, current - new_quantity)
                .await?;
        }
        self.refresh().await;
        Ok(())
    }

    /// Empty the server cart line by line, then the mirror.
    ///
    /// Works from a fresh server snapshot, not the mirror. Stops at the first
    /// failed removal, refreshes the mirror so it stays honest, and returns
    /// that failure. Clearing an already-empty cart is a success.
    pub async fn clear(&self) -> Result<(), FlowError> {
        let lines = self
            .backend
            .fetch_cart(self.user_id)
            .await
            .map_err(FlowError::from)?;
        for line in &lines {
            if let Err(e) = self
                .backend
                .remove_from_cart(self.user_id, line.id, line.quantity)
                .await
            {
                warn!(
                    user_id = self.user_id,
                    product_id = line.id,
                    error = %e,
                    "cart clear interrupted"
                );
                self.refresh().await;
                return Err(e.into());
            }
        }
        self.items.write().await.clear();
        debug!(user_id = self.user_id, lines = lines.len(), "cart cleared");
        Ok(())
    }
}
