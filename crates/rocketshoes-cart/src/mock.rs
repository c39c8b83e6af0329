//! # Test Doubles
//!
//! Stand-ins for the cart's collaborators:
//!
//! - [`MockStockService`] answers stock and catalog lookups from a scripted queue and
//!   records every call, for tests that care about the exact sequence of lookups.
//! - [`StubStockService`] answers from fixed tables, for tests that only care about the
//!   outcome (concurrency, the full system).
//! - [`RecordingNotifier`] keeps every notice it receives.
//!
//! ## Example
//!
//! ```rust
//! use rocketshoes_cart::mock::{MockStockService, StockCall};
//! use rocketshoes_cart::model::ProductId;
//! use rocketshoes_cart::services::StockService;
//!
//! #[tokio::main]
//! async fn main() {
//!     let stock = MockStockService::new();
//!     stock.expect_stock(ProductId(1)).return_ok(3);
//!
//!     assert_eq!(stock.get_stock(ProductId(1)).await.unwrap().amount, 3);
//!     assert_eq!(stock.calls(), vec![StockCall::GetStock(ProductId(1))]);
//!     stock.verify();
//! }
//! ```

use std::collections::{HashMap, VecDeque};
use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;

use crate::model::{ProductId, ProductMetadata, Stock};
use crate::services::{Notice, Notifier, StockService, StockServiceError};

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// A lookup made against a [`MockStockService`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StockCall {
    GetStock(ProductId),
    GetProduct(ProductId),
}

enum Expectation {
    Stock(ProductId, Result<Stock, StockServiceError>),
    Product(ProductId, Result<ProductMetadata, StockServiceError>),
}

impl Expectation {
    fn call(&self) -> StockCall {
        match self {
            Expectation::Stock(id, _) => StockCall::GetStock(*id),
            Expectation::Product(id, _) => StockCall::GetProduct(*id),
        }
    }
}

/// Scripted [`StockService`].
///
/// Lookups are matched in order against the expectations. A lookup that does not match the
/// next expectation (or comes when none is left) fails with
/// [`StockServiceError::Unavailable`] and makes [`verify`](Self::verify) panic.
#[derive(Default)]
pub struct MockStockService {
    expectations: Mutex<VecDeque<Expectation>>,
    calls: Mutex<Vec<StockCall>>,
    unexpected: Mutex<Vec<StockCall>>,
}

impl MockStockService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Expect a stock lookup for `product_id`.
    pub fn expect_stock(&self, product_id: ProductId) -> StockExpectation<'_> {
        StockExpectation {
            mock: self,
            product_id,
        }
    }

    /// Expect a catalog lookup for `product_id`.
    pub fn expect_product(&self, product_id: ProductId) -> ProductExpectation<'_> {
        ProductExpectation {
            mock: self,
            product_id,
        }
    }

    /// Every lookup made so far, in order.
    pub fn calls(&self) -> Vec<StockCall> {
        lock(&self.calls).clone()
    }

    /// Panics if expectations are left over or an unexpected lookup was made.
    pub fn verify(&self) {
        let unexpected = lock(&self.unexpected);
        if !unexpected.is_empty() {
            panic!("Unexpected stock service calls: {:?}", *unexpected);
        }
        let remaining: Vec<StockCall> = lock(&self.expectations)
            .iter()
            .map(Expectation::call)
            .collect();
        if !remaining.is_empty() {
            panic!("Unmet stock service expectations: {remaining:?}");
        }
    }

    fn push(&self, expectation: Expectation) {
        lock(&self.expectations).push_back(expectation);
    }

    /// Records `call` and pops the matching expectation, if it is next in line.
    fn next(&self, call: StockCall) -> Result<Expectation, StockServiceError> {
        lock(&self.calls).push(call);
        let mut expectations = lock(&self.expectations);
        if expectations.front().map(Expectation::call) == Some(call) {
            if let Some(expected) = expectations.pop_front() {
                return Ok(expected);
            }
        }
        lock(&self.unexpected).push(call);
        Err(unexpected(call))
    }
}

fn unexpected(call: StockCall) -> StockServiceError {
    StockServiceError::Unavailable(format!("unexpected call {call:?}"))
}

#[async_trait]
impl StockService for MockStockService {
    async fn get_stock(&self, product_id: ProductId) -> Result<Stock, StockServiceError> {
        let call = StockCall::GetStock(product_id);
        match self.next(call)? {
            Expectation::Stock(_, response) => response,
            Expectation::Product(..) => Err(unexpected(call)),
        }
    }

    async fn get_product(
        &self,
        product_id: ProductId,
    ) -> Result<ProductMetadata, StockServiceError> {
        let call = StockCall::GetProduct(product_id);
        match self.next(call)? {
            Expectation::Product(_, response) => response,
            Expectation::Stock(..) => Err(unexpected(call)),
        }
    }
}

/// Builder returned by [`MockStockService::expect_stock`].
pub struct StockExpectation<'a> {
    mock: &'a MockStockService,
    product_id: ProductId,
}

impl StockExpectation<'_> {
    pub fn return_ok(self, amount: u32) {
        let stock = Stock::new(self.product_id, amount);
        self.mock
            .push(Expectation::Stock(self.product_id, Ok(stock)));
    }

    pub fn return_err(self, error: StockServiceError) {
        self.mock
            .push(Expectation::Stock(self.product_id, Err(error)));
    }
}

/// Builder returned by [`MockStockService::expect_product`].
pub struct ProductExpectation<'a> {
    mock: &'a MockStockService,
    product_id: ProductId,
}

impl ProductExpectation<'_> {
    pub fn return_ok(self, metadata: ProductMetadata) {
        self.mock
            .push(Expectation::Product(self.product_id, Ok(metadata)));
    }

    pub fn return_err(self, error: StockServiceError) {
        self.mock
            .push(Expectation::Product(self.product_id, Err(error)));
    }
}

/// [`StockService`] backed by fixed stock and catalog tables.
///
/// Unknown products have no stock and no metadata.
#[derive(Debug, Default)]
pub struct StubStockService {
    stock: HashMap<ProductId, u32>,
    catalog: HashMap<ProductId, ProductMetadata>,
}

impl StubStockService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a product to the catalog with `amount` units in stock.
    pub fn with_product(mut self, metadata: ProductMetadata, amount: u32) -> Self {
        self.stock.insert(metadata.id, amount);
        self.catalog.insert(metadata.id, metadata);
        self
    }

    /// Sets stock for a product without catalog metadata.
    pub fn with_stock(mut self, product_id: ProductId, amount: u32) -> Self {
        self.stock.insert(product_id, amount);
        self
    }
}

#[async_trait]
impl StockService for StubStockService {
    async fn get_stock(&self, product_id: ProductId) -> Result<Stock, StockServiceError> {
        let amount = self.stock.get(&product_id).copied().unwrap_or(0);
        Ok(Stock::new(product_id, amount))
    }

    async fn get_product(
        &self,
        product_id: ProductId,
    ) -> Result<ProductMetadata, StockServiceError> {
        self.catalog
            .get(&product_id)
            .cloned()
            .ok_or_else(|| StockServiceError::Unavailable(format!("{product_id} not in catalog")))
    }
}

/// [`Notifier`] that keeps every notice.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    notices: Mutex<Vec<Notice>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Notices received so far, oldest first.
    pub fn notices(&self) -> Vec<Notice> {
        lock(&self.notices).clone()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notice: Notice) {
        lock(&self.notices).push(notice);
    }
}
