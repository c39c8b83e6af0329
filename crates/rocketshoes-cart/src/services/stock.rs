//! The external product/stock service the cart consults before every quantity change.

use async_trait::async_trait;
use thiserror::Error;

use crate::model::{ProductId, ProductMetadata, Stock};

/// Errors raised while talking to the stock service.
///
/// The cart does not distinguish between them: any of these turns into a generic
/// "failed to ..." message for the shopper.
#[derive(Debug, Error)]
pub enum StockServiceError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Stock service returned {status} for {url}")]
    Status { status: u16, url: String },

    #[error("Stock service unavailable: {0}")]
    Unavailable(String),
}

/// Read-only access to inventory and catalog data.
#[async_trait]
pub trait StockService: Send + Sync {
    /// Current available quantity for `product_id`.
    async fn get_stock(&self, product_id: ProductId) -> Result<Stock, StockServiceError>;

    /// Catalog data for `product_id`, fetched when a product first enters the cart.
    async fn get_product(&self, product_id: ProductId)
        -> Result<ProductMetadata, StockServiceError>;
}
