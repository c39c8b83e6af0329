//! # State Actor
//!
//! This crate provides a small building block for owning one piece of mutable application
//! state behind an actor. Callers never touch the state directly: they send **commands**
//! over a channel, the actor applies them one at a time, and every committed change is
//! handed to a commit hook (for persistence) and broadcast to subscribers.
//!
//! ## Why a Single-State Actor?
//!
//! UI-facing stores (a shopping cart, a settings panel, a session) tend to share the same
//! shape:
//!
//! - one value that is read often and replaced on every change
//! - mutations that need to consult an external service before deciding
//! - a side effect (write to disk) after every accepted change
//! - listeners that re-render when the value changes
//!
//! Doing this with a `Mutex` invites two classic bugs: holding the lock across an `.await`,
//! or releasing it and deciding on a stale snapshot. The actor avoids both. Each command
//! runs to completion before the next one starts, so a command always sees the latest
//! committed state, and no lock is ever held across the external call.
//!
//! ## Architecture Overview
//!
//! 1. **State Layer** ([`StoreState`]) - the value plus the rules for computing the next value
//! 2. **Runtime Layer** ([`StoreActor`]) - message processing, commit pipeline, events
//! 3. **Interface Layer** ([`StoreClient`], [`StoreHandle`]) - type-safe communication
//!
//! ## Example
//!
//! ```rust
//! use state_actor::{StoreActor, StoreState};
//! use async_trait::async_trait;
//!
//! #[derive(Clone, Debug, Default)]
//! struct Counter { value: u32 }
//!
//! #[derive(Debug)]
//! enum CounterCommand { Increment, Reset }
//!
//! #[derive(Debug, thiserror::Error)]
//! #[error("counter error")]
//! struct CounterError;
//!
//! #[async_trait]
//! impl StoreState for Counter {
//!     type Command = CounterCommand;
//!     type Context = ();
//!     type Error = CounterError;
//!
//!     async fn apply(&self, command: CounterCommand, _ctx: &()) -> Result<Option<Self>, CounterError> {
//!         match command {
//!             CounterCommand::Increment => Ok(Some(Counter { value: self.value + 1 })),
//!             CounterCommand::Reset if self.value == 0 => Ok(None),
//!             CounterCommand::Reset => Ok(Some(Counter::default())),
//!         }
//!     }
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let (actor, client) = StoreActor::new(Counter::default(), 10);
//!     tokio::spawn(actor.run(()));
//!
//!     let state = client.dispatch(CounterCommand::Increment).await.unwrap();
//!     assert_eq!(state.value, 1);
//! }
//! ```
//!
//! ## Context Injection
//!
//! Dependencies (service clients, storage handles) are passed to [`StoreActor::run`], not to
//! the constructor, and are handed to every [`StoreState::apply`] and
//! [`StoreState::on_commit`] call. Tests swap in mocks at exactly that point.
//!
//! ## Testing
//!
//! The [`mock`] module provides a `MockClient` that speaks the same protocol as the real
//! actor but answers from a queue of expectations.

pub mod actor;
pub mod client;
pub mod error;
pub mod handle;
pub mod message;
pub mod mock;
pub mod state;

pub use actor::StoreActor;
pub use client::StoreClient;
pub use error::FrameworkError;
pub use handle::StoreHandle;
pub use message::{Response, StoreRequest};
pub use state::StoreState;
