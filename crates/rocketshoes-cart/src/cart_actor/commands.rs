//! Commands understood by the Cart actor.

use super::CartOperation;
use crate::model::ProductId;

/// Payload of [`CartCommand::UpdateProductAmount`].
///
/// `amount` is signed because it comes straight from a quantity input; zero and negative
/// values are accepted and ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UpdateProductAmount {
    pub product_id: ProductId,
    pub amount: i64,
}

/// Cart mutations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CartCommand {
    /// Adds one unit of a product, creating the entry on first add.
    AddProduct(ProductId),
    /// Removes a product's entry entirely.
    RemoveProduct(ProductId),
    /// Adjusts the quantity of an entry, see [`UpdateProductAmount`].
    UpdateProductAmount(UpdateProductAmount),
}

impl CartCommand {
    pub fn operation(&self) -> CartOperation {
        match self {
            CartCommand::AddProduct(_) => CartOperation::AddProduct,
            CartCommand::RemoveProduct(_) => CartOperation::RemoveProduct,
            CartCommand::UpdateProductAmount(_) => CartOperation::UpdateProductAmount,
        }
    }
}
