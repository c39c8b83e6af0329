//! The cart: an ordered list of products, at most one entry per product id.
//!
//! Every transition method returns a *new* `Cart` and leaves `self` untouched, which is
//! what lets the store decide on a copy and commit it in one step.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use super::{Product, ProductId};
use crate::services::KeyValueStorage;

/// Storage key the cart snapshot is written under.
pub const CART_STORAGE_KEY: &str = "@RocketShoes:cart";

/// Why a stored snapshot was not accepted as a cart.
#[derive(Debug, Error, PartialEq)]
pub enum InvalidCart {
    #[error("Duplicate cart entry for {0}")]
    DuplicateEntry(ProductId),
    #[error("Cart entry for {0} has amount 0")]
    EmptyEntry(ProductId),
}

/// Ordered sequence of products, unique by id.
///
/// Serialized as a plain JSON array of entries. Deserialization checks the invariants, so a
/// snapshot with duplicate ids or zero amounts never becomes a `Cart`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Product>", into = "Vec<Product>")]
pub struct Cart {
    entries: Vec<Product>,
}

impl TryFrom<Vec<Product>> for Cart {
    type Error = InvalidCart;

    fn try_from(entries: Vec<Product>) -> Result<Self, Self::Error> {
        for (index, entry) in entries.iter().enumerate() {
            if entry.amount == 0 {
                return Err(InvalidCart::EmptyEntry(entry.id));
            }
            if entries[..index].iter().any(|p| p.id == entry.id) {
                return Err(InvalidCart::DuplicateEntry(entry.id));
            }
        }
        Ok(Self { entries })
    }
}

impl From<Cart> for Vec<Product> {
    fn from(cart: Cart) -> Self {
        cart.entries
    }
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[Product] {
        &self.entries
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Product> {
        self.entries.iter()
    }

    pub fn get(&self, id: ProductId) -> Option<&Product> {
        self.entries.iter().find(|p| p.id == id)
    }

    pub fn contains(&self, id: ProductId) -> bool {
        self.get(id).is_some()
    }

    /// Amount in cart per product id, for listings that show "n in cart" badges.
    pub fn amounts(&self) -> HashMap<ProductId, u32> {
        self.entries.iter().map(|p| (p.id, p.amount)).collect()
    }

    // --- Transitions ---

    /// Appends `product` as a new entry. An existing entry with the same id is replaced
    /// in place instead, so the id stays unique.
    pub fn with_appended(&self, product: Product) -> Self {
        let mut entries = self.entries.clone();
        match entries.iter_mut().find(|p| p.id == product.id) {
            Some(existing) => *existing = product,
            None => entries.push(product),
        }
        Self { entries }
    }

    /// Sets the amount of entry `id`. Other entries are copied unchanged.
    pub fn with_amount(&self, id: ProductId, amount: u32) -> Self {
        let entries = self
            .entries
            .iter()
            .map(|p| if p.id == id { p.with_amount(amount) } else { p.clone() })
            .collect();
        Self { entries }
    }

    /// Drops entry `id`.
    pub fn without(&self, id: ProductId) -> Self {
        let entries = self.entries.iter().filter(|p| p.id != id).cloned().collect();
        Self { entries }
    }

    // --- Snapshots ---

    pub fn to_snapshot(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    pub fn from_snapshot(snapshot: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(snapshot)
    }

    /// Loads the cart persisted under [`CART_STORAGE_KEY`].
    ///
    /// A missing, unreadable or malformed snapshot yields an empty cart.
    pub fn restore(storage: &dyn KeyValueStorage) -> Self {
        let snapshot = match storage.get_item(CART_STORAGE_KEY) {
            Ok(Some(snapshot)) => snapshot,
            Ok(None) => {
                debug!("No stored cart, starting empty");
                return Self::new();
            }
            Err(e) => {
                warn!(error = %e, "Failed to read stored cart, starting empty");
                return Self::new();
            }
        };

        match Self::from_snapshot(&snapshot) {
            Ok(cart) => {
                debug!(entries = cart.len(), "Restored cart");
                cart
            }
            Err(e) => {
                warn!(error = %e, "Stored cart is invalid, starting empty");
                Self::new()
            }
        }
    }
}

impl<'a> IntoIterator for &'a Cart {
    type Item = &'a Product;
    type IntoIter = std::slice::Iter<'a, Product>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
