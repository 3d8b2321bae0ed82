//! End-to-end flows through the stores and commands against a mock API.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;
use wiremock::matchers::{body_json, body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use bazaar_api::ClientConfig;
use bazaar_cli::commands::{bag, cart, product, session};
use bazaar_cli::error::ErrorCode;
use bazaar_cli::state::{ConfigState, Stores};
use bazaar_core::{Money, Navigation, CART_KEY, TOKEN_KEY, USER_KEY};
use bazaar_store::{MemoryStorage, Storage, StoreError, StoreResult};

const STORED_USER: &str = r#"{"username":"u","email":"u@x.com","token":"T"}"#;

fn config(server: &MockServer) -> ConfigState {
    let mut config = ConfigState::new(ClientConfig::with_base_url(server.uri()));
    config.database_path = None;
    config
}

async fn logged_in(server: &MockServer) -> (Stores, Arc<MemoryStorage>) {
    let storage = Arc::new(MemoryStorage::with_entries([
        (TOKEN_KEY, "T"),
        (USER_KEY, STORED_USER),
    ]));
    let stores = Stores::with_storage(config(server), storage.clone()).await.unwrap();
    (stores, storage)
}

fn product_json(id: u64, title: &str, price: f64) -> serde_json::Value {
    json!({
        "id": id,
        "title": title,
        "price": price,
        "description": "desc",
        "category": "men's clothing",
        "image": format!("https://img/{}.jpg", id),
        "rating": { "rate": 3.9, "count": 120 }
    })
}

async fn mount_product(server: &MockServer, id: u64, title: &str, price: f64) {
    Mock::given(method("GET"))
        .and(path(format!("/products/{}", id)))
        .respond_with(ResponseTemplate::new(200).set_body_json(product_json(id, title, price)))
        .mount(server)
        .await;
}

// =============================================================================
// Session
// =============================================================================

#[tokio::test]
async fn test_login_then_whoami() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .and(body_json(json!({ "username": "u", "password": "p" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "token": "T" })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/users/1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "username": "u", "email": "u@x.com"
        })))
        .mount(&server)
        .await;

    let storage = Arc::new(MemoryStorage::new());
    let stores = Stores::with_storage(config(&server), storage.clone()).await.unwrap();

    let response = session::login(&stores, "u", "p").await.unwrap();
    assert_eq!(response.navigation, Navigation::Profile);
    assert_eq!(response.path, "/profile");

    assert_eq!(storage.get(TOKEN_KEY).await.unwrap().as_deref(), Some("T"));
    let user: serde_json::Value =
        serde_json::from_str(&storage.get(USER_KEY).await.unwrap().unwrap()).unwrap();
    assert_eq!(user, json!({ "username": "u", "email": "u@x.com", "token": "T" }));

    let me = session::whoami(&stores).await.unwrap();
    assert_eq!(me.email, "u@x.com");
}

#[tokio::test]
async fn test_gated_commands_require_login() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(0)
        .mount(&server)
        .await;

    let stores = Stores::with_storage(config(&server), Arc::new(MemoryStorage::new()))
        .await
        .unwrap();

    let err = product::list_products(&stores).await.unwrap_err();
    assert_eq!(err.code, ErrorCode::Unauthenticated);
    assert_eq!(err.navigation, Some(Navigation::Login));

    assert_eq!(
        bag::bag_view(&stores).await.unwrap_err().code,
        ErrorCode::Unauthenticated
    );
    assert_eq!(
        session::whoami(&stores).await.unwrap_err().code,
        ErrorCode::Unauthenticated
    );
}

#[tokio::test]
async fn test_logout_clears_session_and_cart() {
    let server = MockServer::start().await;
    mount_product(&server, 1, "Backpack", 109.95).await;
    let (stores, storage) = logged_in(&server).await;

    product::add_product_to_cart(&stores, "1").await.unwrap();
    assert!(storage.get(CART_KEY).await.unwrap().is_some());

    let response = session::logout(&stores).await.unwrap();
    assert_eq!(response.navigation, Navigation::Login);

    for key in [TOKEN_KEY, USER_KEY, CART_KEY] {
        assert_eq!(storage.get(key).await.unwrap(), None, "{} should be removed", key);
    }
    assert_eq!(cart::get_cart(&stores).await.unwrap().count, 0);
}

/// Memory storage that refuses to delete the session token.
struct PinnedTokenStorage(MemoryStorage);

#[async_trait]
impl Storage for PinnedTokenStorage {
    async fn get(&self, key: &str) -> StoreResult<Option<String>> {
        self.0.get(key).await
    }

    async fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        self.0.set(key, value).await
    }

    async fn remove(&self, key: &str) -> StoreResult<()> {
        if key == TOKEN_KEY {
            return Err(StoreError::QueryFailed("database is locked".into()));
        }
        self.0.remove(key).await
    }
}

#[tokio::test]
async fn test_failed_logout_still_clears_cart() {
    let server = MockServer::start().await;
    mount_product(&server, 1, "Backpack", 109.95).await;
    let storage = Arc::new(PinnedTokenStorage(MemoryStorage::with_entries([
        (TOKEN_KEY, "T"),
        (USER_KEY, STORED_USER),
    ])));
    let stores = Stores::with_storage(config(&server), storage.clone()).await.unwrap();
    product::add_product_to_cart(&stores, "1").await.unwrap();

    let err = session::logout(&stores).await.unwrap_err();
    assert_eq!(err.code, ErrorCode::StorageError);

    assert_eq!(session::whoami(&stores).await.unwrap().username, "u");
    assert_eq!(storage.get(TOKEN_KEY).await.unwrap().as_deref(), Some("T"));
    assert_eq!(storage.get(CART_KEY).await.unwrap(), None);
    assert_eq!(cart::get_cart(&stores).await.unwrap().count, 0);
}

// =============================================================================
// Products
// =============================================================================

#[tokio::test]
async fn test_product_details_view() {
    let server = MockServer::start().await;
    mount_product(&server, 3, "Jacket", 55.99).await;
    let (stores, _) = logged_in(&server).await;

    let view = product::product_details(&stores, "3").await.unwrap();
    assert_eq!(view.product.title, "Jacket");
    assert_eq!(view.product.price, Money::from_cents(5599));
    assert_eq!(view.filled_stars, 4);
    assert_eq!(view.rating_label, "3.9");
}

#[tokio::test]
async fn test_invalid_product_id_is_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/products/42"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;
    let (stores, _) = logged_in(&server).await;

    for raw in ["abc", "0", "-1", "42"] {
        let err = product::product_details(&stores, raw).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound, "id {:?}", raw);
        assert_eq!(err.navigation, Some(Navigation::NotFound));
    }
}

#[tokio::test]
async fn test_list_products_empty_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/products"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;
    let (stores, _) = logged_in(&server).await;

    assert!(product::list_products(&stores).await.unwrap().is_empty());
}

// =============================================================================
// Cart
// =============================================================================

#[tokio::test]
async fn test_add_to_bag_without_mirror() {
    let server = MockServer::start().await;
    mount_product(&server, 1, "Backpack", 109.95).await;
    mount_product(&server, 2, "T-Shirt", 22.3).await;
    Mock::given(method("POST"))
        .and(path("/carts"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;
    let (stores, _) = logged_in(&server).await;

    product::add_product_to_cart(&stores, "1").await.unwrap();
    product::add_product_to_cart(&stores, "2").await.unwrap();
    let response = product::add_product_to_cart(&stores, "1").await.unwrap();

    assert_eq!(response.message, "Added to bag successfully!");
    assert_eq!(response.cart.count, 3);
    assert_eq!(response.cart.total, Money::from_cents(10995 * 2 + 2230));
    let ids: Vec<_> = response.cart.items.iter().map(|i| (i.id, i.quantity)).collect();
    assert_eq!(ids, vec![(1, 2), (2, 1)]);
}

#[tokio::test]
async fn test_add_to_bag_mirrors_when_enabled() {
    let server = MockServer::start().await;
    mount_product(&server, 3, "Jacket", 55.99).await;
    Mock::given(method("POST"))
        .and(path("/carts"))
        .and(body_partial_json(json!({
            "userId": 1,
            "products": [{ "productId": 3, "quantity": 1 }]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 11, "userId": 1, "date": "2024-01-01T00:00:00.000Z",
            "products": [{ "productId": 3, "quantity": 1 }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let mut config = config(&server);
    config.mirror_remote = true;
    let storage = Arc::new(MemoryStorage::with_entries([
        (TOKEN_KEY, "T"),
        (USER_KEY, STORED_USER),
    ]));
    let stores = Stores::with_storage(config, storage).await.unwrap();

    let response = product::add_product_to_cart(&stores, "3").await.unwrap();
    assert_eq!(response.cart.count, 1);
}

#[tokio::test]
async fn test_mirror_failure_keeps_local_cart() {
    let server = MockServer::start().await;
    mount_product(&server, 3, "Jacket", 55.99).await;
    Mock::given(method("POST"))
        .and(path("/carts"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let mut config = config(&server);
    config.mirror_remote = true;
    let storage = Arc::new(MemoryStorage::with_entries([
        (TOKEN_KEY, "T"),
        (USER_KEY, STORED_USER),
    ]));
    let stores = Stores::with_storage(config, storage).await.unwrap();

    let response = product::add_product_to_cart(&stores, "3").await.unwrap();
    assert_eq!(response.cart.count, 1);
}

#[tokio::test]
async fn test_submit_cart_posts_all_lines() {
    let server = MockServer::start().await;
    mount_product(&server, 1, "Backpack", 109.95).await;
    mount_product(&server, 2, "T-Shirt", 22.3).await;
    Mock::given(method("POST"))
        .and(path("/carts"))
        .and(body_partial_json(json!({
            "userId": 1,
            "products": [
                { "productId": 1, "quantity": 2 },
                { "productId": 2, "quantity": 1 }
            ]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 21, "userId": 1, "date": "2024-01-01T00:00:00.000Z",
            "products": [
                { "productId": 1, "quantity": 2 },
                { "productId": 2, "quantity": 1 }
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;
    let (stores, _) = logged_in(&server).await;

    for id in ["1", "1", "2"] {
        product::add_product_to_cart(&stores, id).await.unwrap();
    }

    let response = cart::submit_cart(&stores).await.unwrap();
    assert!(response.submitted);
    assert_eq!(response.record.unwrap().id, 21);
    assert_eq!(response.cart.count, 3);
    assert_eq!(cart::get_cart(&stores).await.unwrap().count, 3);
}

#[tokio::test]
async fn test_submit_failure_is_reported_not_raised() {
    let server = MockServer::start().await;
    mount_product(&server, 1, "Backpack", 109.95).await;
    Mock::given(method("POST"))
        .and(path("/carts"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;
    let (stores, _) = logged_in(&server).await;

    product::add_product_to_cart(&stores, "1").await.unwrap();
    let response = cart::submit_cart(&stores).await.unwrap();

    assert!(!response.submitted);
    assert_eq!(response.cart.count, 1);
}

#[tokio::test]
async fn test_restart_rehydrates_session_and_cart() {
    let server = MockServer::start().await;
    mount_product(&server, 1, "Backpack", 109.95).await;
    mount_product(&server, 2, "T-Shirt", 22.3).await;
    mount_product(&server, 3, "Jacket", 55.99).await;

    let dir = tempfile::tempdir().unwrap();
    let mut config = config(&server);
    config.database_path = Some(dir.path().join("bazaar.db"));

    {
        let stores = Stores::open(config.clone()).await.unwrap();
        let storage = bazaar_store::SqliteStorage::new(stores.database().unwrap().clone());
        storage.set(TOKEN_KEY, "T").await.unwrap();
        storage.set(USER_KEY, STORED_USER).await.unwrap();
        stores.close().await;
    }

    {
        let stores = Stores::open(config.clone()).await.unwrap();
        for id in ["3", "1", "2", "1"] {
            product::add_product_to_cart(&stores, id).await.unwrap();
        }
        cart::remove_from_cart(&stores, 2).await.unwrap();
        stores.close().await;
    }

    let stores = Stores::open(config).await.unwrap();
    assert_eq!(session::whoami(&stores).await.unwrap().username, "u");

    let cart = cart::get_cart(&stores).await.unwrap();
    let ids: Vec<_> = cart.items.iter().map(|i| (i.id, i.quantity)).collect();
    assert_eq!(ids, vec![(3, 1), (1, 2)]);
    assert_eq!(cart.total, Money::from_cents(5599 + 10995 * 2));
}

// =============================================================================
// Bag
// =============================================================================

async fn mount_carts(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/carts"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {
                "id": 7, "userId": 1, "date": "2020-03-02T00:00:00.000Z",
                "products": [
                    { "productId": 1, "quantity": 2 },
                    { "productId": 3, "quantity": 1 }
                ]
            },
            {
                "id": 9, "userId": 2, "date": "2020-03-01T00:00:00.000Z",
                "products": [{ "productId": 1, "quantity": 1 }]
            }
        ])))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_bag_fetches_each_product_once() {
    let server = MockServer::start().await;
    mount_carts(&server).await;
    Mock::given(method("GET"))
        .and(path("/products/1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(product_json(1, "Backpack", 109.95)))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/products/3"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;
    let (stores, _) = logged_in(&server).await;

    let view = bag::bag_view(&stores).await.unwrap();

    assert_eq!(view.rows.len(), 3);
    assert_eq!(view.rows[0].title(), Some("Backpack"));
    assert_eq!(view.rows[1].product_id, 3);
    assert!(view.rows[1].product.is_none());
    assert_eq!(view.rows[2].cart_id, 9);
    assert_eq!(view.total, Money::from_cents(10995 * 3));
    assert!(view.message.is_none());
}

#[tokio::test]
async fn test_bag_delete_removes_whole_record() {
    let server = MockServer::start().await;
    mount_carts(&server).await;
    mount_product(&server, 1, "Backpack", 109.95).await;
    mount_product(&server, 3, "Jacket", 55.99).await;
    Mock::given(method("DELETE"))
        .and(path("/carts/7"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": 7 })))
        .expect(1)
        .mount(&server)
        .await;
    let (stores, _) = logged_in(&server).await;

    let response = bag::remove_cart_record(&stores, 7).await.unwrap();

    assert_eq!(response.rows_removed, 2);
    assert_eq!(response.message, "Item successfully removed from the cart!");
    assert_eq!(response.bag.rows.len(), 1);
    assert!(response.bag.rows.iter().all(|r| r.cart_id == 9));
    assert_eq!(response.bag.total, Money::from_cents(10995));
}

#[tokio::test]
async fn test_bag_delete_failure_is_reported() {
    let server = MockServer::start().await;
    mount_carts(&server).await;
    mount_product(&server, 1, "Backpack", 109.95).await;
    mount_product(&server, 3, "Jacket", 55.99).await;
    Mock::given(method("DELETE"))
        .and(path("/carts/7"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    let (stores, _) = logged_in(&server).await;

    let err = bag::remove_cart_record(&stores, 7).await.unwrap_err();
    assert_eq!(err.code, ErrorCode::NetworkError);

    assert_eq!(bag::bag_view(&stores).await.unwrap().rows.len(), 3);
}

#[tokio::test]
async fn test_bag_delete_unknown_record() {
    let server = MockServer::start().await;
    mount_carts(&server).await;
    mount_product(&server, 1, "Backpack", 109.95).await;
    mount_product(&server, 3, "Jacket", 55.99).await;
    Mock::given(method("DELETE"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;
    let (stores, _) = logged_in(&server).await;

    let err = bag::remove_cart_record(&stores, 99).await.unwrap_err();
    assert_eq!(err.code, ErrorCode::NotFound);
}

#[tokio::test]
async fn test_empty_bag_message() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/carts"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;
    let (stores, _) = logged_in(&server).await;

    let view = bag::bag_view(&stores).await.unwrap();
    assert!(view.rows.is_empty());
    assert_eq!(view.message, Some("Your bag is empty. Start shopping now!"));
}
