//! # RocketShoes Cart
//!
//! The shopping cart of the RocketShoes storefront: an ordered list of products with
//! quantities, checked against live stock, persisted after every change and observable by
//! subscribers.
//!
//! ## Core Components
//!
//! - **[model]**: [`Cart`](model::Cart), [`Product`](model::Product) and the wire types
//!   of the stock API.
//! - **[cart_actor]**: the rules for adding, removing and updating entries, run inside a
//!   [`StoreActor`](state_actor::StoreActor) so mutations never interleave.
//! - **[clients]**: [`CartClient`](clients::CartClient), the public operations plus
//!   shopper notifications on failure.
//! - **[services]**: the stock service (HTTP), key/value storage (files or memory) and the
//!   notification sink.
//! - **[lifecycle]**: [`CartSystem`](lifecycle::CartSystem), which restores, starts and
//!   stops the cart, and [`setup_tracing`](lifecycle::setup_tracing).
//! - **[config]**: environment-based [`CartConfig`](config::CartConfig).
//!
//! ## Testing
//!
//! See [`mock`] for stock service and notifier doubles, and [`state_actor::mock`] for
//! testing code around a client without a running actor.

pub mod cart_actor;
pub mod clients;
pub mod config;
pub mod lifecycle;
pub mod mock;
pub mod model;
pub mod services;
