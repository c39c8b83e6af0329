use std::sync::Arc;
use std::time::Duration;

use rocketshoes_cart::config::CartConfig;
use rocketshoes_cart::lifecycle::CartSystem;
use rocketshoes_cart::mock::RecordingNotifier;
use rocketshoes_cart::model::{Cart, ProductId, CART_STORAGE_KEY};
use rocketshoes_cart::services::{FileStorage, Notice};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn config(server: &MockServer, dir: &tempfile::TempDir) -> CartConfig {
    CartConfig {
        api_url: server.uri(),
        storage_dir: dir.path().to_path_buf(),
        http_timeout: Duration::from_secs(2),
        channel_capacity: 8,
    }
}

async fn mount_product(server: &MockServer, id: u32, stock: u32) {
    Mock::given(method("GET"))
        .and(path(format!("/stock/{id}")))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({"id": id, "amount": stock})),
        )
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path(format!("/products/{id}")))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "id": id,
            "title": "Tênis de Caminhada Leve Confortável",
            "price": 179.9,
            "image": "https://rocketseat-cdn.s3-sa-east-1.amazonaws.com/modulo-redux/tenis1.jpg"
        })))
        .mount(server)
        .await;
}

/// Full run against a fake HTTP API and a real storage directory.
#[tokio::test]
async fn test_cart_round_trip_through_http_and_files() {
    let server = MockServer::start().await;
    mount_product(&server, 1, 2).await;
    let dir = tempfile::tempdir().unwrap();
    let config = config(&server, &dir);
    let notifier = Arc::new(RecordingNotifier::new());

    let system = CartSystem::from_config(&config, notifier.clone()).unwrap();
    system.cart_client.add_product(ProductId(1)).await.unwrap();
    let cart = system.cart_client.add_product(ProductId(1)).await.unwrap();
    let rejected = system.cart_client.add_product(ProductId(1)).await;
    system.shutdown().await.unwrap();

    let entry = cart.get(ProductId(1)).unwrap();
    assert_eq!(entry.amount, 2);
    assert_eq!(entry.name, "Tênis de Caminhada Leve Confortável");
    assert!(entry.image_url.ends_with("tenis1.jpg"));
    assert!(rejected.is_err());
    assert_eq!(notifier.notices(), vec![Notice::StockExceeded]);

    let file = FileStorage::open(dir.path()).unwrap().path_for(CART_STORAGE_KEY);
    let stored = Cart::from_snapshot(&std::fs::read_to_string(file).unwrap()).unwrap();
    assert_eq!(stored, cart);

    let restarted = CartSystem::from_config(&config, notifier.clone()).unwrap();
    let restored = restarted.cart_client.remove_product(ProductId(1)).await.unwrap();
    restarted.shutdown().await.unwrap();
    assert!(restored.is_empty());
}

#[tokio::test]
async fn test_unknown_product_reports_add_failure() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/stock/42"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;
    let dir = tempfile::tempdir().unwrap();
    let notifier = Arc::new(RecordingNotifier::new());

    let system = CartSystem::from_config(&config(&server, &dir), notifier.clone()).unwrap();
    let result = system.cart_client.add_product(ProductId(42)).await;
    system.shutdown().await.unwrap();

    assert!(result.is_err());
    assert_eq!(notifier.notices(), vec![Notice::AddFailed]);
}
