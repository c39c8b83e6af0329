//! # Framework Errors
//!
//! Errors raised by the actor plumbing itself, plus a wrapper that carries the state's own
//! error back across the channel.

use std::error::Error;

/// Errors that can occur within the state actor framework.
#[derive(Debug, thiserror::Error)]
pub enum FrameworkError {
    #[error("Actor closed")]
    ActorClosed,
    #[error("Actor dropped response channel")]
    ActorDropped,
    #[error("State error: {0}")]
    StateError(Box<dyn Error + Send + Sync>),
}

impl FrameworkError {
    /// Recovers the state's own error type from a rejected command.
    ///
    /// Returns `Err(self)` for plumbing errors or when the wrapped error is of another type.
    pub fn downcast_state<E: Error + 'static>(self) -> Result<E, Self> {
        match self {
            Self::StateError(inner) => inner.downcast::<E>().map(|e| *e).map_err(Self::StateError),
            other => Err(other),
        }
    }
}
