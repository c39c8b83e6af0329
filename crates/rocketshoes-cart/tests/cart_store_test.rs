use std::sync::Arc;

use rocketshoes_cart::cart_actor::{CartContext, CartError, UpdateProductAmount};
use rocketshoes_cart::lifecycle::CartSystem;
use rocketshoes_cart::mock::{MockStockService, RecordingNotifier, StockCall, StubStockService};
use rocketshoes_cart::model::{Cart, Product, ProductId, ProductMetadata, CART_STORAGE_KEY};
use rocketshoes_cart::services::{
    KeyValueStorage, MemoryStorage, Notice, StockServiceError, StorageError,
};
use state_actor::StoreHandle;

struct Harness {
    system: CartSystem,
    stock: Arc<MockStockService>,
    storage: Arc<MemoryStorage>,
    notifier: Arc<RecordingNotifier>,
}

impl Harness {
    /// Starts a cart system whose storage already holds `initial`.
    fn start(initial: &Cart) -> Self {
        let storage = Arc::new(MemoryStorage::new());
        storage
            .set_item(CART_STORAGE_KEY, &initial.to_snapshot().unwrap())
            .unwrap();
        let stock = Arc::new(MockStockService::new());
        let notifier = Arc::new(RecordingNotifier::new());
        let context = CartContext::new(stock.clone(), storage.clone());
        let system = CartSystem::start(context, notifier.clone(), 16);
        Self {
            system,
            stock,
            storage,
            notifier,
        }
    }

    fn stored(&self) -> Cart {
        let snapshot = self.storage.get_item(CART_STORAGE_KEY).unwrap().unwrap();
        Cart::from_snapshot(&snapshot).unwrap()
    }

    async fn cart(&self) -> Cart {
        self.system.cart_client.snapshot().await.unwrap()
    }
}

fn entry(id: u32, amount: u32) -> Product {
    Product {
        id: ProductId(id),
        name: format!("Tênis {id}"),
        price: 100.0 + f64::from(id),
        image_url: format!("https://rocketshoes.dev/{id}.jpg"),
        amount,
    }
}

fn cart(entries: Vec<Product>) -> Cart {
    Cart::try_from(entries).unwrap()
}

fn metadata(id: u32, name: &str, price: f64) -> ProductMetadata {
    ProductMetadata {
        id: ProductId(id),
        name: name.to_string(),
        price,
        image_url: String::new(),
    }
}

#[tokio::test]
async fn test_add_new_product_appends_one_entry_and_persists() {
    let initial = cart(vec![entry(1, 1)]);
    let harness = Harness::start(&initial);
    harness.stock.expect_stock(ProductId(5)).return_ok(3);
    harness
        .stock
        .expect_product(ProductId(5))
        .return_ok(metadata(5, "X", 10.0));

    let result = harness
        .system
        .cart_client
        .add_product(ProductId(5))
        .await
        .unwrap();

    assert_eq!(result.len(), initial.len() + 1);
    let added = result.get(ProductId(5)).unwrap();
    assert_eq!(added.amount, 1);
    assert_eq!(added.name, "X");
    assert_eq!(added.price, 10.0);
    assert_eq!(harness.stored(), result);
    assert_eq!(harness.cart().await, result);
    assert!(harness.notifier.notices().is_empty());
    harness.stock.verify();
}

#[tokio::test]
async fn test_add_into_empty_cart() {
    let harness = Harness::start(&Cart::new());
    harness.stock.expect_stock(ProductId(5)).return_ok(3);
    harness
        .stock
        .expect_product(ProductId(5))
        .return_ok(metadata(5, "X", 10.0));

    let result = harness
        .system
        .cart_client
        .add_product(ProductId(5))
        .await
        .unwrap();

    let expected = cart(vec![Product {
        id: ProductId(5),
        name: "X".to_string(),
        price: 10.0,
        image_url: String::new(),
        amount: 1,
    }]);
    assert_eq!(result, expected);
    assert_eq!(harness.stored(), expected);
}

#[tokio::test]
async fn test_add_existing_product_increments_only_that_entry() {
    let initial = cart(vec![entry(1, 1), entry(2, 2), entry(3, 1)]);
    let harness = Harness::start(&initial);
    harness.stock.expect_stock(ProductId(2)).return_ok(5);

    let result = harness
        .system
        .cart_client
        .add_product(ProductId(2))
        .await
        .unwrap();

    assert_eq!(result.len(), 3);
    assert_eq!(result.get(ProductId(2)).unwrap().amount, 3);
    assert_eq!(result.get(ProductId(1)), initial.get(ProductId(1)));
    assert_eq!(result.get(ProductId(3)), initial.get(ProductId(3)));
    assert_eq!(harness.stored(), result);
    assert_eq!(harness.stock.calls(), vec![StockCall::GetStock(ProductId(2))]);
}

#[tokio::test]
async fn test_add_beyond_stock_emits_stock_exceeded() {
    let initial = cart(vec![entry(1, 2)]);
    let harness = Harness::start(&initial);
    harness.stock.expect_stock(ProductId(1)).return_ok(2);

    let err = harness
        .system
        .cart_client
        .add_product(ProductId(1))
        .await
        .unwrap_err();

    assert!(matches!(err, CartError::StockExceeded { .. }));
    assert_eq!(harness.notifier.notices(), vec![Notice::StockExceeded]);
    assert_eq!(harness.cart().await, initial);
    assert_eq!(harness.stored(), initial);
}

#[tokio::test]
async fn test_add_without_stock_emits_out_of_stock() {
    let initial = cart(vec![entry(1, 1)]);
    let harness = Harness::start(&initial);
    harness.stock.expect_stock(ProductId(4)).return_ok(0);

    let err = harness
        .system
        .cart_client
        .add_product(ProductId(4))
        .await
        .unwrap_err();

    assert!(matches!(err, CartError::OutOfStock(ProductId(4))));
    assert_eq!(harness.notifier.notices(), vec![Notice::OutOfStock]);
    assert_eq!(harness.cart().await, initial);
    harness.stock.verify();
}

#[tokio::test]
async fn test_add_with_failing_service_emits_add_failed() {
    let harness = Harness::start(&Cart::new());
    harness
        .stock
        .expect_stock(ProductId(1))
        .return_err(StockServiceError::Status {
            status: 404,
            url: "http://localhost:3333/stock/1".to_string(),
        });

    let err = harness
        .system
        .cart_client
        .add_product(ProductId(1))
        .await
        .unwrap_err();

    assert!(matches!(err, CartError::ServiceFailure(_)));
    assert_eq!(harness.notifier.notices(), vec![Notice::AddFailed]);
    assert!(harness.cart().await.is_empty());
}

#[tokio::test]
async fn test_remove_present_product_removes_exactly_that_entry() {
    let initial = cart(vec![entry(1, 1), entry(2, 4)]);
    let harness = Harness::start(&initial);

    let result = harness
        .system
        .cart_client
        .remove_product(ProductId(1))
        .await
        .unwrap();

    assert_eq!(result, cart(vec![entry(2, 4)]));
    assert_eq!(harness.stored(), result);
    assert!(harness.stock.calls().is_empty());
}

#[tokio::test]
async fn test_remove_absent_product_emits_remove_failed() {
    let initial = cart(vec![entry(1, 1)]);
    let harness = Harness::start(&initial);

    let err = harness
        .system
        .cart_client
        .remove_product(ProductId(9))
        .await
        .unwrap_err();

    assert!(matches!(err, CartError::NotFound(ProductId(9))));
    assert_eq!(harness.notifier.notices(), vec![Notice::RemoveFailed]);
    assert_eq!(harness.cart().await, initial);
}

#[tokio::test]
async fn test_update_with_non_positive_amount_is_silent() {
    let initial = cart(vec![entry(1, 2)]);
    let harness = Harness::start(&initial);
    let mut events = harness.system.cart_client.subscribe();

    for amount in [0, -1] {
        let result = harness
            .system
            .cart_client
            .update_product_amount(UpdateProductAmount {
                product_id: ProductId(1),
                amount,
            })
            .await
            .unwrap();
        assert_eq!(result, initial);
    }

    assert!(harness.notifier.notices().is_empty());
    assert!(harness.stock.calls().is_empty());
    assert_eq!(harness.stored(), initial);
    assert!(events.try_recv().is_err());
}

#[tokio::test]
async fn test_update_beyond_stock_emits_stock_exceeded() {
    let initial = cart(vec![entry(1, 1)]);
    let harness = Harness::start(&initial);
    harness.stock.expect_stock(ProductId(1)).return_ok(2);

    let err = harness
        .system
        .cart_client
        .update_product_amount(UpdateProductAmount {
            product_id: ProductId(1),
            amount: 3,
        })
        .await
        .unwrap_err();

    assert!(matches!(err, CartError::StockExceeded { requested: 3, .. }));
    assert_eq!(harness.notifier.notices(), vec![Notice::StockExceeded]);
    assert_eq!(harness.cart().await, initial);
}

#[tokio::test]
async fn test_update_below_existing_steps_down_by_one() {
    let initial = cart(vec![entry(1, 1), entry(2, 3)]);
    let harness = Harness::start(&initial);
    harness.stock.expect_stock(ProductId(2)).return_ok(5);

    let result = harness
        .system
        .cart_client
        .update_product_amount(UpdateProductAmount {
            product_id: ProductId(2),
            amount: 1,
        })
        .await
        .unwrap();

    assert_eq!(result.get(ProductId(2)).unwrap().amount, 2);
    assert_eq!(result.get(ProductId(1)), initial.get(ProductId(1)));
    assert_eq!(harness.stored(), result);
}

#[tokio::test]
async fn test_update_with_failing_service_emits_update_failed() {
    let initial = cart(vec![entry(1, 1)]);
    let harness = Harness::start(&initial);
    harness
        .stock
        .expect_stock(ProductId(1))
        .return_err(StockServiceError::Unavailable("connection refused".to_string()));

    let err = harness
        .system
        .cart_client
        .update_product_amount(UpdateProductAmount {
            product_id: ProductId(1),
            amount: 2,
        })
        .await
        .unwrap_err();

    assert!(matches!(err, CartError::ServiceFailure(_)));
    assert_eq!(harness.notifier.notices(), vec![Notice::UpdateFailed]);
    assert_eq!(harness.stored(), initial);
}

#[tokio::test]
async fn test_subscribers_see_commits_only() {
    let harness = Harness::start(&cart(vec![entry(1, 1), entry(2, 1)]));
    let mut events = harness.system.cart_client.subscribe();

    let _ = harness.system.cart_client.remove_product(ProductId(7)).await;
    let after = harness
        .system
        .cart_client
        .remove_product(ProductId(1))
        .await
        .unwrap();

    assert_eq!(events.recv().await.unwrap(), after);
    assert!(events.try_recv().is_err());
}

#[tokio::test]
async fn test_cart_survives_restart() {
    let harness = Harness::start(&Cart::new());
    harness.stock.expect_stock(ProductId(3)).return_ok(2);
    harness
        .stock
        .expect_product(ProductId(3))
        .return_ok(metadata(3, "Tênis Runner", 179.9));
    let before = harness
        .system
        .cart_client
        .add_product(ProductId(3))
        .await
        .unwrap();
    harness.system.shutdown().await.unwrap();

    let context = CartContext::new(harness.stock.clone(), harness.storage.clone());
    let restarted = CartSystem::start(context, harness.notifier.clone(), 16);

    assert_eq!(restarted.cart_client.snapshot().await.unwrap(), before);
    restarted.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_invalid_snapshot_starts_empty() {
    let storage = Arc::new(MemoryStorage::new());
    storage
        .set_item(CART_STORAGE_KEY, r#"[{"id": 1, "amount": 0}]"#)
        .unwrap();
    let context = CartContext::new(Arc::new(StubStockService::new()), storage);
    let system = CartSystem::start(context, Arc::new(RecordingNotifier::new()), 16);

    assert!(system.cart_client.snapshot().await.unwrap().is_empty());
    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_overlapping_adds_cannot_oversell() {
    let stock = StubStockService::new().with_product(metadata(8, "Tênis Trail", 249.9), 1);
    let storage = Arc::new(MemoryStorage::new());
    let notifier = Arc::new(RecordingNotifier::new());
    let context = CartContext::new(Arc::new(stock), storage.clone());
    let system = CartSystem::start(context, notifier.clone(), 16);

    let first = system.cart_client.clone();
    let second = system.cart_client.clone();
    let (a, b) = tokio::join!(
        first.add_product(ProductId(8)),
        second.add_product(ProductId(8))
    );

    assert_eq!(a.is_ok() as u8 + b.is_ok() as u8, 1);
    assert_eq!(notifier.notices(), vec![Notice::StockExceeded]);
    let cart = system.cart_client.snapshot().await.unwrap();
    assert_eq!(cart.get(ProductId(8)).unwrap().amount, 1);

    drop(first);
    drop(second);
    system.shutdown().await.unwrap();
}

/// Storage that reads nothing and refuses every write.
struct ReadOnlyStorage;

impl KeyValueStorage for ReadOnlyStorage {
    fn get_item(&self, _key: &str) -> Result<Option<String>, StorageError> {
        Ok(None)
    }

    fn set_item(&self, key: &str, _value: &str) -> Result<(), StorageError> {
        Err(StorageError::Io {
            key: key.to_string(),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only"),
        })
    }

    fn remove_item(&self, _key: &str) -> Result<(), StorageError> {
        Ok(())
    }
}

#[tokio::test]
async fn test_failed_persist_keeps_commit_without_notice() {
    let stock = Arc::new(MockStockService::new());
    stock.expect_stock(ProductId(6)).return_ok(4);
    stock
        .expect_product(ProductId(6))
        .return_ok(metadata(6, "Tênis Slip-on", 89.9));
    let notifier = Arc::new(RecordingNotifier::new());
    let context = CartContext::new(stock.clone(), Arc::new(ReadOnlyStorage));
    let system = CartSystem::start(context, notifier.clone(), 16);
    let mut events = system.cart_client.subscribe();

    let result = system
        .cart_client
        .add_product(ProductId(6))
        .await
        .unwrap();

    assert_eq!(result.get(ProductId(6)).unwrap().amount, 1);
    assert_eq!(system.cart_client.snapshot().await.unwrap(), result);
    assert_eq!(events.recv().await.unwrap(), result);
    assert!(notifier.notices().is_empty());
    stock.verify();
    system.shutdown().await.unwrap();
}
