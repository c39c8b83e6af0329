//! # Store Messages
//!
//! The message types exchanged between a `StoreClient` and its `StoreActor`.

use crate::error::FrameworkError;
use crate::state::StoreState;
use tokio::sync::oneshot;

/// Type alias for the one-shot response channel used by the actor.
pub type Response<T> = oneshot::Sender<Result<T, FrameworkError>>;

/// Request sent to the actor.
///
/// Every request carries its own `respond_to` channel, so callers can await the outcome of
/// exactly their request even when many tasks share one client.
#[derive(Debug)]
pub enum StoreRequest<S: StoreState> {
    /// Apply a command. Answers with the state as it stands after the command.
    Dispatch {
        command: S::Command,
        respond_to: Response<S>,
    },
    /// Read the current state without changing it.
    Snapshot { respond_to: Response<S> },
}
