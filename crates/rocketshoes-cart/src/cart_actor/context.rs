use std::sync::Arc;

use crate::services::{KeyValueStorage, StockService};

/// Dependencies injected into the Cart actor when it starts running.
#[derive(Clone)]
pub struct CartContext {
    pub stock: Arc<dyn StockService>,
    pub storage: Arc<dyn KeyValueStorage>,
}

impl CartContext {
    pub fn new(stock: Arc<dyn StockService>, storage: Arc<dyn KeyValueStorage>) -> Self {
        Self { stock, storage }
    }
}
