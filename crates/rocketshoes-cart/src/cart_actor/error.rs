//! Error types for the Cart actor.

use std::fmt::Display;

use thiserror::Error;

use crate::model::ProductId;
use crate::services::{Notice, StockServiceError, StorageError};

/// Errors that can occur during cart operations.
#[derive(Debug, Error)]
pub enum CartError {
    /// The quantity asked for (or implied by an increment) is above available stock.
    #[error("Requested quantity {requested} for {product_id} exceeds stock of {available}")]
    StockExceeded {
        product_id: ProductId,
        requested: i64,
        available: u32,
    },

    /// First add of a product that has no stock.
    #[error("{0} is out of stock")]
    OutOfStock(ProductId),

    /// Removal of a product that is not in the cart.
    #[error("{0} is not in the cart")]
    NotFound(ProductId),

    /// The stock service could not be reached or gave an unusable answer.
    #[error("Stock service failure: {0}")]
    ServiceFailure(#[from] StockServiceError),

    /// Writing the cart snapshot failed. Raised by the commit hook only: the actor logs it,
    /// keeps the committed cart and answers the caller with that cart, so callers never
    /// receive this variant.
    #[error("Cart persistence failed: {0}")]
    Persistence(#[from] StorageError),

    /// An error occurred while communicating with the actor system.
    #[error("Actor communication error: {0}")]
    ActorCommunication(String),
}

/// The three public cart operations, used to pick the right failure message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CartOperation {
    AddProduct,
    RemoveProduct,
    UpdateProductAmount,
}

impl CartOperation {
    /// Message shown when the operation fails for a reason without a message of its own.
    pub fn failure_notice(&self) -> Notice {
        match self {
            CartOperation::AddProduct => Notice::AddFailed,
            CartOperation::RemoveProduct => Notice::RemoveFailed,
            CartOperation::UpdateProductAmount => Notice::UpdateFailed,
        }
    }
}

impl Display for CartOperation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            CartOperation::AddProduct => "add product",
            CartOperation::RemoveProduct => "remove product",
            CartOperation::UpdateProductAmount => "update product amount",
        };
        f.write_str(name)
    }
}

impl CartError {
    /// The notice to show the shopper when `operation` fails with this error.
    ///
    /// `None` for errors the shopper never sees.
    pub fn notice(&self, operation: CartOperation) -> Option<Notice> {
        match self {
            CartError::StockExceeded { .. } => Some(Notice::StockExceeded),
            CartError::OutOfStock(_) => Some(Notice::OutOfStock),
            CartError::NotFound(_) => Some(Notice::RemoveFailed),
            CartError::ServiceFailure(_) | CartError::ActorCommunication(_) => {
                Some(operation.failure_notice())
            }
            CartError::Persistence(_) => None,
        }
    }
}
