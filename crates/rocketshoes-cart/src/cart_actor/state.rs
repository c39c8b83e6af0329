//! StoreState implementation for the Cart.
//!
//! This module contains the rules the Cart actor applies to each [`CartCommand`], and the
//! commit hook that writes the cart to storage.

use async_trait::async_trait;
use state_actor::StoreState;
use tracing::debug;

use super::{CartCommand, CartContext, CartError, UpdateProductAmount};
use crate::model::{Cart, Product, ProductId, CART_STORAGE_KEY};
use crate::services::{StockService, StorageError};

#[async_trait]
impl StoreState for Cart {
    type Command = CartCommand;
    type Context = CartContext;
    type Error = CartError;

    async fn apply(
        &self,
        command: CartCommand,
        ctx: &CartContext,
    ) -> Result<Option<Self>, CartError> {
        match command {
            CartCommand::AddProduct(product_id) => self
                .add_product(product_id, ctx.stock.as_ref())
                .await
                .map(Some),
            CartCommand::RemoveProduct(product_id) => self.remove_product(product_id).map(Some),
            CartCommand::UpdateProductAmount(request) => {
                self.update_product_amount(request, ctx.stock.as_ref()).await
            }
        }
    }

    /// Writes the full cart under [`CART_STORAGE_KEY`].
    async fn on_commit(&self, ctx: &CartContext) -> Result<(), CartError> {
        let snapshot = self
            .to_snapshot()
            .map_err(|source| StorageError::Serialization {
                key: CART_STORAGE_KEY.to_string(),
                source,
            })?;
        ctx.storage.set_item(CART_STORAGE_KEY, &snapshot)?;
        debug!(entries = self.len(), "Persisted cart");
        Ok(())
    }
}

impl Cart {
    /// One more unit of `product_id`, capped by stock.
    async fn add_product(
        &self,
        product_id: ProductId,
        stock: &dyn StockService,
    ) -> Result<Cart, CartError> {
        if let Some(existing) = self.get(product_id) {
            let available = stock.get_stock(product_id).await?;
            let requested = existing.amount.saturating_add(1);
            if requested > available.amount {
                return Err(CartError::StockExceeded {
                    product_id,
                    requested: i64::from(requested),
                    available: available.amount,
                });
            }
            return Ok(self.with_amount(product_id, requested));
        }

        let available = stock.get_stock(product_id).await?;
        if available.is_empty() {
            return Err(CartError::OutOfStock(product_id));
        }

        let metadata = stock.get_product(product_id).await?;
        let entry = Product {
            id: product_id,
            ..Product::from_metadata(metadata, 1)
        };
        Ok(self.with_appended(entry))
    }

    fn remove_product(&self, product_id: ProductId) -> Result<Cart, CartError> {
        if !self.contains(product_id) {
            return Err(CartError::NotFound(product_id));
        }
        Ok(self.without(product_id))
    }

    /// Moves the entry's amount one unit towards `amount`.
    ///
    /// The entry is decremented by one when it holds more than `amount` and incremented by
    /// one otherwise; it is never set to `amount` directly. Storefront quantity widgets
    /// rely on this stepping, but note that it increments even when the entry already
    /// equals `amount`, which can take it one past stock. Likely a bug, kept for
    /// compatibility.
    async fn update_product_amount(
        &self,
        request: UpdateProductAmount,
        stock: &dyn StockService,
    ) -> Result<Option<Cart>, CartError> {
        let UpdateProductAmount { product_id, amount } = request;
        if amount <= 0 {
            debug!(%product_id, amount, "Ignoring non-positive amount");
            return Ok(None);
        }

        let available = stock.get_stock(product_id).await?;
        if amount > i64::from(available.amount) {
            return Err(CartError::StockExceeded {
                product_id,
                requested: amount,
                available: available.amount,
            });
        }

        let Some(existing) = self.get(product_id) else {
            debug!(%product_id, "Not in cart, nothing to update");
            return Ok(None);
        };

        let next = if i64::from(existing.amount) > amount {
            existing.amount - 1
        } else {
            existing.amount.saturating_add(1)
        };
        Ok(Some(self.with_amount(product_id, next)))
    }
}
