//! # StoreHandle Trait
//!
//! Common interface for domain-specific store clients, adding default `snapshot` and
//! `subscribe` methods on top of a generic `StoreClient`.
use crate::{FrameworkError, StoreClient, StoreState};
use async_trait::async_trait;
use tokio::sync::broadcast;

/// Trait for domain clients that wrap a [`StoreClient`].
///
/// Domain clients usually expose their own command methods (`add_product`, ...) and get the
/// read side for free by implementing `inner` and `map_error`.
#[async_trait]
pub trait StoreHandle<S: StoreState>: Send + Sync {
    /// The domain-specific error type.
    type Error: Send + Sync;

    /// Access the inner generic StoreClient.
    fn inner(&self) -> &StoreClient<S>;

    /// Map framework errors to the domain error type.
    fn map_error(e: FrameworkError) -> Self::Error;

    /// Fetch the current state.
    #[tracing::instrument(skip(self))]
    async fn snapshot(&self) -> Result<S, Self::Error> {
        tracing::debug!("Sending request");
        self.inner().snapshot().await.map_err(Self::map_error)
    }

    /// Subscribe to change events.
    fn subscribe(&self) -> broadcast::Receiver<S> {
        self.inner().subscribe()
    }
}
