//! # Generic Client
//!
//! The client half of a store actor.

use crate::error::FrameworkError;
use crate::message::StoreRequest;
use crate::state::StoreState;
use tokio::sync::{broadcast, mpsc, oneshot};

/// ## StoreClient
///
/// `StoreClient<S>` sends commands to a `StoreActor<S>` over a Tokio mpsc channel and
/// awaits the answer on a oneshot channel. It also hands out receivers for the actor's
/// change events.
///
/// * **Cloneable** - holds two senders, so cloning is inexpensive.
/// * **Shutdown** - the actor stops once every clone has been dropped.
#[derive(Clone)]
pub struct StoreClient<S: StoreState> {
    sender: mpsc::Sender<StoreRequest<S>>,
    events: broadcast::Sender<S>,
}

impl<S: StoreState> StoreClient<S> {
    pub fn new(sender: mpsc::Sender<StoreRequest<S>>, events: broadcast::Sender<S>) -> Self {
        Self { sender, events }
    }

    /// Applies `command` and returns the resulting state.
    ///
    /// A command that changes nothing still answers with the (unchanged) state; a rejected
    /// command answers with [`FrameworkError::StateError`].
    pub async fn dispatch(&self, command: S::Command) -> Result<S, FrameworkError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(StoreRequest::Dispatch {
                command,
                respond_to,
            })
            .await
            .map_err(|_| FrameworkError::ActorClosed)?;
        response.await.map_err(|_| FrameworkError::ActorDropped)?
    }

    /// Returns a copy of the current state.
    pub async fn snapshot(&self) -> Result<S, FrameworkError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(StoreRequest::Snapshot { respond_to })
            .await
            .map_err(|_| FrameworkError::ActorClosed)?;
        response.await.map_err(|_| FrameworkError::ActorDropped)?
    }

    /// Subscribes to change events. Each committed state is delivered once.
    pub fn subscribe(&self) -> broadcast::Receiver<S> {
        self.events.subscribe()
    }
}
