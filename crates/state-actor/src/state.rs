//! # StoreState Trait
//!
//! The `StoreState` trait is the contract a value must satisfy to be owned by a
//! [`StoreActor`](crate::StoreActor). It names the command type, the injected context and the
//! error type, and supplies the transition function plus an optional commit hook.
//!
//! # Transitions
//! [`StoreState::apply`] never mutates `self`. It returns the *next* state:
//!
//! - `Ok(Some(next))` - the command was accepted; `next` replaces the current state.
//! - `Ok(None)` - the command was accepted but changes nothing (no commit, no event).
//! - `Err(e)` - the command was rejected; the current state is kept as is.
//!
//! Because the next state is built on the side and swapped in only on success, a command
//! is either fully applied or not applied at all.

use async_trait::async_trait;
use std::fmt::Debug;

/// Trait that any value must implement to be managed by a `StoreActor`.
///
/// # Async & Context
/// The trait is `#[async_trait]` so that transitions can await external services. The
/// `Context` associated type is injected into every call, which keeps dependencies out of
/// the state value itself.
#[async_trait]
pub trait StoreState: Clone + Debug + Send + Sync + 'static {
    /// The commands this state understands (e.g. `AddProduct`).
    type Command: Send + Sync + Debug;

    /// The runtime context (dependencies) injected into the actor.
    /// Use `()` if no dependencies are needed.
    type Context: Send + Sync;

    /// The error type for rejected commands.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Compute the state that results from `command`.
    async fn apply(
        &self,
        command: Self::Command,
        ctx: &Self::Context,
    ) -> Result<Option<Self>, Self::Error>;

    /// Called after a new state has been committed.
    ///
    /// Failures are logged by the actor and do not undo the commit.
    async fn on_commit(&self, _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }
}
