//! External collaborators of the cart: the stock service, local storage and the
//! notification sink.

pub mod http_stock;
pub mod notifier;
pub mod stock;
pub mod storage;

pub use http_stock::*;
pub use notifier::*;
pub use stock::*;
pub use storage::*;
