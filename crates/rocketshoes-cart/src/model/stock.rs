use serde::{Deserialize, Serialize};

use super::ProductId;

/// Available inventory for one product, as served by `GET /stock/{id}`.
///
/// Read only: the cart never changes stock, it only compares against it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stock {
    #[serde(rename = "id", alias = "productId")]
    pub product_id: ProductId,
    pub amount: u32,
}

impl Stock {
    pub fn new(product_id: impl Into<ProductId>, amount: u32) -> Self {
        Self {
            product_id: product_id.into(),
            amount,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.amount == 0
    }
}
