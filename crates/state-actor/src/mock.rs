//! # Mock Client & Testing Guide
//!
//! `MockClient<S>` hands out a real `StoreClient<S>` whose requests are answered from a
//! queue of expectations instead of a running `StoreActor`. Use it to test code that sits
//! *around* a client (error mapping, notifications) without building any state transitions.
//!
//! ## When to use Mocks vs Real Actors
//!
//! | Feature | MockClient | Real Actor |
//! |---------|------------|------------|
//! | **Speed** | Instant (in-memory) | Fast (but involves tokio spawn) |
//! | **Determinism** | Fully scripted | Depends on the state's rules |
//! | **Error Injection** | Easy (`return_err`) | Needs a state that rejects |
//! | **Use Case** | Logic around the client | The state rules or the full system |
//!
//! ## Example
//!
//! ```rust
//! use state_actor::mock::MockClient;
//! use state_actor::{FrameworkError, StoreState};
//! use async_trait::async_trait;
//!
//! #[derive(Clone, Debug, PartialEq)] struct Flag(bool);
//! #[derive(Debug)] enum FlagCommand { Toggle }
//! #[derive(Debug, thiserror::Error)] #[error("flag error")] struct FlagError;
//!
//! #[async_trait]
//! impl StoreState for Flag {
//!     type Command = FlagCommand; type Context = (); type Error = FlagError;
//!     async fn apply(&self, _: FlagCommand, _: &()) -> Result<Option<Self>, FlagError> {
//!         Ok(Some(Flag(!self.0)))
//!     }
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let mut mock = MockClient::<Flag>::new();
//!     mock.expect_dispatch().return_ok(Flag(true));
//!     mock.expect_dispatch().return_err(FrameworkError::ActorClosed);
//!
//!     let client = mock.client();
//!     assert_eq!(client.dispatch(FlagCommand::Toggle).await.unwrap(), Flag(true));
//!     assert!(matches!(
//!         client.dispatch(FlagCommand::Toggle).await,
//!         Err(FrameworkError::ActorClosed)
//!     ));
//!
//!     mock.verify();
//!     assert_eq!(mock.take_commands().len(), 2);
//! }
//! ```
//!
//! ## Raw Channel Helpers
//!
//! [`create_mock_client`] returns a client plus the receiving end of its channel, so a test
//! can inspect each request and answer it by hand (see [`expect_dispatch`]).

use crate::client::StoreClient;
use crate::error::FrameworkError;
use crate::message::{Response, StoreRequest};
use crate::state::StoreState;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::sync::{broadcast, mpsc};

// =============================================================================
// EXPECTATION BUILDER API
// =============================================================================

/// An expected request and the answer to give it.
enum Expectation<S: StoreState> {
    Dispatch { response: Result<S, FrameworkError> },
    Snapshot { response: Result<S, FrameworkError> },
}

type Shared<T> = Arc<Mutex<T>>;

fn lock<T>(shared: &Shared<T>) -> MutexGuard<'_, T> {
    shared.lock().unwrap_or_else(PoisonError::into_inner)
}

/// A mock client with expectation tracking for fluent testing.
pub struct MockClient<S: StoreState> {
    client: StoreClient<S>,
    events: broadcast::Sender<S>,
    expectations: Shared<VecDeque<Expectation<S>>>,
    commands: Shared<Vec<S::Command>>,
    _handle: tokio::task::JoinHandle<()>,
}

impl<S: StoreState> Default for MockClient<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: StoreState> MockClient<S> {
    /// Creates a new mock client with no expectations.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn new() -> Self {
        let (sender, mut receiver) = mpsc::channel::<StoreRequest<S>>(100);
        let (events, _) = broadcast::channel(16);
        let expectations: Shared<VecDeque<Expectation<S>>> = Arc::default();
        let commands: Shared<Vec<S::Command>> = Arc::default();

        let expectations_clone = expectations.clone();
        let commands_clone = commands.clone();
        let handle = tokio::spawn(async move {
            while let Some(request) = receiver.recv().await {
                let expectation = lock(&expectations_clone).pop_front();

                match (request, expectation) {
                    (
                        StoreRequest::Dispatch {
                            command,
                            respond_to,
                        },
                        Some(Expectation::Dispatch { response }),
                    ) => {
                        lock(&commands_clone).push(command);
                        let _ = respond_to.send(response);
                    }
                    (
                        StoreRequest::Snapshot { respond_to },
                        Some(Expectation::Snapshot { response }),
                    ) => {
                        let _ = respond_to.send(response);
                    }
                    _ => {
                        panic!("Unexpected request or expectation mismatch");
                    }
                }
            }
        });

        Self {
            client: StoreClient::new(sender, events.clone()),
            events,
            expectations,
            commands,
            _handle: handle,
        }
    }

    /// Returns the client for use in tests.
    pub fn client(&self) -> StoreClient<S> {
        self.client.clone()
    }

    /// Expects a `dispatch` request.
    pub fn expect_dispatch(&mut self) -> ExpectationBuilder<S> {
        ExpectationBuilder {
            kind: ExpectedRequest::Dispatch,
            expectations: self.expectations.clone(),
        }
    }

    /// Expects a `snapshot` request.
    pub fn expect_snapshot(&mut self) -> ExpectationBuilder<S> {
        ExpectationBuilder {
            kind: ExpectedRequest::Snapshot,
            expectations: self.expectations.clone(),
        }
    }

    /// Publishes `state` to subscribers as if the actor had committed it.
    pub fn emit(&self, state: S) {
        let _ = self.events.send(state);
    }

    /// Drains the commands received so far, in arrival order.
    pub fn take_commands(&self) -> Vec<S::Command> {
        std::mem::take(&mut *lock(&self.commands))
    }

    /// Verifies that all expectations were met.
    pub fn verify(&self) {
        let remaining = lock(&self.expectations).len();
        if remaining > 0 {
            panic!("Not all expectations were met. {} remaining", remaining);
        }
    }
}

#[derive(Clone, Copy)]
enum ExpectedRequest {
    Dispatch,
    Snapshot,
}

/// Builder returned by `expect_*`; finish it with `return_ok` or `return_err`.
pub struct ExpectationBuilder<S: StoreState> {
    kind: ExpectedRequest,
    expectations: Shared<VecDeque<Expectation<S>>>,
}

impl<S: StoreState> ExpectationBuilder<S> {
    /// Sets the expectation to answer with `state`.
    pub fn return_ok(self, state: S) {
        self.push(Ok(state));
    }

    /// Sets the expectation to answer with an error.
    pub fn return_err(self, error: FrameworkError) {
        self.push(Err(error));
    }

    fn push(self, response: Result<S, FrameworkError>) {
        let expectation = match self.kind {
            ExpectedRequest::Dispatch => Expectation::Dispatch { response },
            ExpectedRequest::Snapshot => Expectation::Snapshot { response },
        };
        lock(&self.expectations).push_back(expectation);
    }
}

// =============================================================================
// RAW CHANNEL HELPERS
// =============================================================================

/// Creates a client and the receiver its requests arrive on.
///
/// Nothing answers the requests until the test does, which makes it easy to assert on the
/// exact command that was sent.
pub fn create_mock_client<S: StoreState>(
    buffer_size: usize,
) -> (StoreClient<S>, mpsc::Receiver<StoreRequest<S>>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    let (events, _) = broadcast::channel(16);
    (StoreClient::new(sender, events), receiver)
}

/// Waits for the next request and returns it if it is a `Dispatch`.
pub async fn expect_dispatch<S: StoreState>(
    receiver: &mut mpsc::Receiver<StoreRequest<S>>,
) -> Option<(S::Command, Response<S>)> {
    match receiver.recv().await {
        Some(StoreRequest::Dispatch {
            command,
            respond_to,
        }) => Some((command, respond_to)),
        _ => None,
    }
}
