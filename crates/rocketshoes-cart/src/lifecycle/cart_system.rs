use std::sync::Arc;

use thiserror::Error;
use tracing::{error, info};

use crate::cart_actor::{self, CartContext};
use crate::clients::CartClient;
use crate::config::CartConfig;
use crate::model::Cart;
use crate::services::{
    FileStorage, HttpStockService, Notifier, StockServiceError, StorageError,
};

/// Errors raised while building a [`CartSystem`] from configuration.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("Failed to build stock service client: {0}")]
    Stock(#[from] StockServiceError),
    #[error("Failed to open cart storage: {0}")]
    Storage(#[from] StorageError),
}

/// The runtime orchestrator of the cart.
///
/// `CartSystem` is responsible for:
/// - **Restoring**: reading the persisted cart before the actor starts
/// - **Dependency Wiring**: running the Cart actor with its stock service and storage
/// - **Lifecycle Management**: stopping the actor and waiting for it
///
/// # Example
///
/// ```ignore
/// let system = CartSystem::from_config(&config, Arc::new(TracingNotifier))?;
///
/// let cart = system.cart_client.add_product(ProductId(1)).await?;
///
/// system.shutdown().await?;
/// ```
pub struct CartSystem {
    /// Client for interacting with the Cart actor
    pub cart_client: CartClient,

    /// Task handle of the Cart actor (used for graceful shutdown)
    handle: tokio::task::JoinHandle<()>,
}

impl CartSystem {
    /// Restores the cart from `context.storage` and starts the Cart actor.
    ///
    /// A missing or unreadable snapshot starts an empty cart. Must be called from within a
    /// Tokio runtime.
    pub fn start(context: CartContext, notifier: Arc<dyn Notifier>, capacity: usize) -> Self {
        let cart = Cart::restore(context.storage.as_ref());
        info!(entries = cart.len(), "Starting cart system");

        let (actor, client) = cart_actor::new(cart, capacity);
        let handle = tokio::spawn(actor.run(context));

        Self {
            cart_client: CartClient::new(client, notifier),
            handle,
        }
    }

    /// Builds the production wiring: HTTP stock service and file storage.
    pub fn from_config(
        config: &CartConfig,
        notifier: Arc<dyn Notifier>,
    ) -> Result<Self, StartupError> {
        let stock = HttpStockService::new(config.api_url.clone(), config.http_timeout)?;
        let storage = FileStorage::open(config.storage_dir.clone())?;
        let context = CartContext::new(Arc::new(stock), Arc::new(storage));
        Ok(Self::start(context, notifier, config.channel_capacity))
    }

    /// Gracefully shuts down the cart.
    ///
    /// Drops the client, which closes the actor's channel once every clone is gone, then
    /// waits for the actor task. Commands already queued are still applied.
    ///
    /// # Returns
    ///
    /// - `Ok(())` if the actor shut down cleanly
    /// - `Err(String)` if the actor task panicked
    pub async fn shutdown(self) -> Result<(), String> {
        info!("Shutting down cart system...");

        drop(self.cart_client);

        if let Err(e) = self.handle.await {
            error!("Actor task failed: {:?}", e);
            return Err(format!("Actor task failed: {:?}", e));
        }

        info!("Cart system shutdown complete.");
        Ok(())
    }
}
