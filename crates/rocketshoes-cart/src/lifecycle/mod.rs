//! # System Lifecycle
//!
//! This module starts, wires and stops the cart.
//!
//! ## The CartSystem Pattern
//!
//! [`CartSystem`] is the composition root. It owns the only long-lived [`CartClient`] and
//! the actor's task handle:
//!
//! ```rust,ignore
//! impl CartSystem {
//!     pub fn start(context: CartContext, notifier: Arc<dyn Notifier>, capacity: usize) -> Self {
//!         // 1. Restore the persisted cart (empty if missing or invalid)
//!         let cart = Cart::restore(context.storage.as_ref());
//!
//!         // 2. Create the actor, then start it with its dependencies injected
//!         let (actor, client) = cart_actor::new(cart, capacity);
//!         let handle = tokio::spawn(actor.run(context));
//!
//!         Self { cart_client: CartClient::new(client, notifier), handle }
//!     }
//! }
//! ```
//!
//! [`CartClient`]: crate::clients::CartClient
//!
//! ## Dependency Injection via Context
//!
//! The actor is created without dependencies; its [`CartContext`](crate::cart_actor::CartContext)
//! (stock service and storage) is handed over in `run(context)`. Tests swap in
//! [`MockStockService`](crate::mock::MockStockService) and
//! [`MemoryStorage`](crate::services::MemoryStorage) at this point;
//! [`CartSystem::from_config`] plugs in the HTTP service and file storage.
//!
//! ## Graceful Shutdown
//!
//! 1. **Drop all clients** - closes the sender side of the channel
//! 2. **Actor detects closure** - applies what is still queued, logs its final revision
//! 3. **Await completion** - [`CartSystem::shutdown`] waits for the task
//!
//! Clones of the client held elsewhere keep the actor alive, so drop them first.
//!
//! ## Observability
//!
//! [`setup_tracing`] initializes structured logging; see the [`tracing`](self::tracing)
//! module.

pub mod cart_system;
pub mod tracing;

pub use cart_system::*;
pub use self::tracing::*;
