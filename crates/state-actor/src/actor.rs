//! # Store Actor
//!
//! This module defines the `StoreActor`, the server side of a store. It owns the state,
//! processes requests sequentially and runs the commit pipeline.

use crate::client::StoreClient;
use crate::error::FrameworkError;
use crate::message::StoreRequest;
use crate::state::StoreState;
use tokio::sync::{broadcast, mpsc};
use tracing::{debug, info, warn};

/// Capacity of the change-event channel. Slow subscribers that fall further behind than
/// this skip ahead (`RecvError::Lagged`) instead of blocking the actor.
const EVENT_CAPACITY: usize = 64;

/// ## StoreActor
///
/// The `StoreActor<S>` owns one value of type `S: StoreState` and the receiving end of the
/// request channel. It runs in its own Tokio task and handles one request at a time, so no
/// lock is needed around the state.
///
/// # Commit Pipeline
///
/// For every `Dispatch` request:
///
/// 1. Calls [`StoreState::apply`] on the current state with the injected context.
/// 2. On `Ok(Some(next))`: replaces the state, bumps the revision, calls
///    [`StoreState::on_commit`] (a failure there is logged, not rolled back) and broadcasts
///    the new state to subscribers.
/// 3. On `Ok(None)`: leaves everything untouched.
/// 4. On `Err(e)`: leaves everything untouched and answers with `FrameworkError::StateError`.
///
/// The caller always receives the state as it stands after its own command.
pub struct StoreActor<S: StoreState> {
    receiver: mpsc::Receiver<StoreRequest<S>>,
    state: S,
    events: broadcast::Sender<S>,
    revision: u64,
}

impl<S: StoreState> StoreActor<S> {
    /// Creates a new `StoreActor` holding `initial` and its associated `StoreClient`.
    ///
    /// `buffer_size` is the capacity of the request channel; callers wait when it is full.
    pub fn new(initial: S, buffer_size: usize) -> (Self, StoreClient<S>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        let actor = Self {
            receiver,
            state: initial,
            events: events.clone(),
            revision: 0,
        };
        let client = StoreClient::new(sender, events);
        (actor, client)
    }

    /// Runs the actor's event loop until every client has been dropped.
    pub async fn run(mut self, context: S::Context) {
        // Just the type name (e.g. "Cart" instead of "rocketshoes_cart::model::cart::Cart")
        let state_type = std::any::type_name::<S>()
            .split("::")
            .last()
            .unwrap_or("Unknown");
        info!(state_type, "Actor started");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                StoreRequest::Dispatch {
                    command,
                    respond_to,
                } => {
                    debug!(state_type, ?command, "Dispatch");
                    match self.state.apply(command, &context).await {
                        Ok(Some(next)) => {
                            self.state = next;
                            self.revision += 1;
                            if let Err(e) = self.state.on_commit(&context).await {
                                warn!(state_type, revision = self.revision, error = %e, "on_commit failed");
                            }
                            // No subscribers is not an error.
                            let _ = self.events.send(self.state.clone());
                            info!(
                                state_type,
                                revision = self.revision,
                                subscribers = self.events.receiver_count(),
                                "Committed"
                            );
                            let _ = respond_to.send(Ok(self.state.clone()));
                        }
                        Ok(None) => {
                            debug!(state_type, revision = self.revision, "Unchanged");
                            let _ = respond_to.send(Ok(self.state.clone()));
                        }
                        Err(e) => {
                            warn!(state_type, revision = self.revision, error = %e, "Rejected");
                            let _ = respond_to.send(Err(FrameworkError::StateError(Box::new(e))));
                        }
                    }
                }
                StoreRequest::Snapshot { respond_to } => {
                    debug!(state_type, revision = self.revision, "Snapshot");
                    let _ = respond_to.send(Ok(self.state.clone()));
                }
            }
        }

        info!(state_type, revision = self.revision, "Shutdown");
    }
}
