//! # Cart Client
//!
//! Provides the storefront-facing API of the cart: `add_product`, `remove_product` and
//! `update_product_amount`. It wraps a `StoreClient<Cart>` and turns every failure into
//! both a typed [`CartError`] and a [`Notice`] for the shopper.
use std::sync::Arc;

use crate::cart_actor::{CartCommand, CartError, UpdateProductAmount};
use crate::model::{Cart, ProductId};
use crate::services::Notifier;
use async_trait::async_trait;
use state_actor::{FrameworkError, StoreClient, StoreHandle};
use tracing::{debug, instrument, warn};

/// Client for interacting with the Cart actor.
///
/// Every public operation returns the cart as it stands after the operation. On failure
/// the matching notice is sent to the notifier before the error is returned, so callers
/// that only care about the happy path can ignore the `Err`.
#[derive(Clone)]
pub struct CartClient {
    inner: StoreClient<Cart>,
    notifier: Arc<dyn Notifier>,
}

impl CartClient {
    pub fn new(inner: StoreClient<Cart>, notifier: Arc<dyn Notifier>) -> Self {
        Self { inner, notifier }
    }

    /// Adds one unit of `product_id`, creating the entry with catalog data on first add.
    #[instrument(skip(self))]
    pub async fn add_product(&self, product_id: ProductId) -> Result<Cart, CartError> {
        self.execute(CartCommand::AddProduct(product_id)).await
    }

    /// Removes the entry for `product_id`.
    #[instrument(skip(self))]
    pub async fn remove_product(&self, product_id: ProductId) -> Result<Cart, CartError> {
        self.execute(CartCommand::RemoveProduct(product_id)).await
    }

    /// Steps the entry's quantity towards `request.amount`.
    #[instrument(skip(self))]
    pub async fn update_product_amount(
        &self,
        request: UpdateProductAmount,
    ) -> Result<Cart, CartError> {
        self.execute(CartCommand::UpdateProductAmount(request)).await
    }

    async fn execute(&self, command: CartCommand) -> Result<Cart, CartError> {
        debug!("Sending request");
        let operation = command.operation();
        match self.inner.dispatch(command).await {
            Ok(cart) => Ok(cart),
            Err(e) => {
                let err = e
                    .downcast_state::<CartError>()
                    .unwrap_or_else(Self::map_error);
                warn!(%operation, error = %err, "Cart operation failed");
                if let Some(notice) = err.notice(operation) {
                    self.notifier.notify(notice);
                }
                Err(err)
            }
        }
    }
}

#[async_trait]
impl StoreHandle<Cart> for CartClient {
    type Error = CartError;

    fn inner(&self) -> &StoreClient<Cart> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        CartError::ActorCommunication(e.to_string())
    }
}
