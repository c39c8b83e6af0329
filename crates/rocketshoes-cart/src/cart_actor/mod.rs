//! # Cart Actor
//!
//! This module implements the shopping cart as a single-state actor.
//!
//! ## Overview
//!
//! The cart is one value, a [`Cart`], owned by a [`StoreActor`]. Every mutation is sent to
//! the actor as a [`CartCommand`] and applied one at a time, so two overlapping requests
//! for the same product always see each other's result.
//!
//! A command either:
//! - commits a new cart, which is then written to storage and broadcast to subscribers,
//! - leaves the cart unchanged (an update with a non-positive amount, or for a product
//!   that is not in the cart), or
//! - is rejected with a [`CartError`], leaving cart and storage untouched.
//!
//! ## Structure
//!
//! - [`commands`] - [`CartCommand`] and [`UpdateProductAmount`]
//! - [`context`] - [`CartContext`], the stock service and storage the actor runs with
//! - [`error`] - [`CartError`] and the mapping from errors to shopper notices
//! - [`state`] - [`StoreState`](state_actor::StoreState) implementation for [`Cart`]
//! - [`new()`] - Factory function that creates the actor and client
//!
//! ## Usage
//!
//! ```rust
//! use rocketshoes_cart::cart_actor::{self, CartCommand, CartContext};
//! use rocketshoes_cart::mock::MockStockService;
//! use rocketshoes_cart::model::{Cart, ProductId};
//! use rocketshoes_cart::services::MemoryStorage;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() {
//!     let stock = Arc::new(MockStockService::new());
//!     let context = CartContext::new(stock, Arc::new(MemoryStorage::new()));
//!
//!     let (actor, client) = cart_actor::new(Cart::new(), 32);
//!     tokio::spawn(actor.run(context));
//!
//!     // Removing something that is not there is rejected.
//!     let result = client.dispatch(CartCommand::RemoveProduct(ProductId(1))).await;
//!     assert!(result.is_err());
//! }
//! ```

pub mod commands;
pub mod context;
pub mod error;
pub mod state;

pub use commands::*;
pub use context::*;
pub use error::*;

use crate::model::Cart;
use state_actor::{StoreActor, StoreClient};

/// Creates a new Cart actor holding `cart`, and its client.
pub fn new(cart: Cart, capacity: usize) -> (StoreActor<Cart>, StoreClient<Cart>) {
    StoreActor::new(cart, capacity)
}
