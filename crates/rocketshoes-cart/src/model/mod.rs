//! Pure data structures: cart entries, catalog metadata and stock records.

pub mod cart;
pub mod product;
pub mod stock;

pub use cart::*;
pub use product::*;
pub use stock::*;
