//! Product types: the identifier, the catalog metadata and the cart entry.
use serde::{Deserialize, Serialize};

use std::fmt::Display;

/// Type-safe identifier for Products.
///
/// Serialized as a bare integer, the way the stock service and the stored snapshot
/// represent ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(pub u32);

impl From<u32> for ProductId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl Display for ProductId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "product_{}", self.0)
    }
}

/// Catalog data for a product, as served by `GET /products/{id}`.
///
/// Older catalog payloads use `title`/`image`; both are accepted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductMetadata {
    pub id: ProductId,
    #[serde(alias = "title")]
    pub name: String,
    pub price: f64,
    #[serde(alias = "image", default)]
    pub image_url: String,
}

/// A product in the cart: catalog data plus the quantity the shopper wants.
///
/// `amount` is at least 1 for every entry held by a [`Cart`](crate::model::Cart).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    #[serde(alias = "title")]
    pub name: String,
    pub price: f64,
    #[serde(alias = "image", default)]
    pub image_url: String,
    pub amount: u32,
}

impl Product {
    /// Creates a cart entry from catalog data.
    pub fn from_metadata(metadata: ProductMetadata, amount: u32) -> Self {
        Self {
            id: metadata.id,
            name: metadata.name,
            price: metadata.price,
            image_url: metadata.image_url,
            amount,
        }
    }

    /// Copy of this entry with a different amount.
    pub fn with_amount(&self, amount: u32) -> Self {
        Self {
            amount,
            ..self.clone()
        }
    }
}
