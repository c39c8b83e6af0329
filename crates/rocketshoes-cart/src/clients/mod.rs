//! Domain clients that hide the message passing behind plain async methods.

pub mod cart_client;

pub use cart_client::*;
