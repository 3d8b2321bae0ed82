//! # Cart State
//!
//! Manages the local shopping cart and its persisted `cart` record.
//!
//! ## Thread Safety
//! The cart sits behind a `tokio::sync::Mutex` held across the storage write,
//! so mutation and persistence form one step. Callers only ever receive
//! cloned snapshots.
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart State Operations                                │
//! │                                                                         │
//! │  Action                 Store Method            Cart Change             │
//! │  ──────                 ────────────            ───────────             │
//! │                                                                         │
//! │  Add to bag ──────────► add_to_cart() ────────► qty + 1 or push(1)     │
//! │                                                                         │
//! │  Remove ──────────────► remove_from_cart() ───► retain(id != x)        │
//! │                                                                         │
//! │  Clear ───────────────► clear_cart() ─────────► items.clear(),         │
//! │                                                 `cart` key removed      │
//! │                                                                         │
//! │  View ────────────────► snapshot() ───────────► (read only)            │
//! │                                                                         │
//! │  Each write: clone → mutate → persist → commit. A failed persist       │
//! │  leaves memory untouched, so memory and storage never diverge.         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use bazaar_core::{Cart, CartItem, Money, ProductId, CART_KEY};
use bazaar_store::Storage;

use crate::error::AppResult;

/// The cart store.
pub struct CartStore {
    storage: Arc<dyn Storage>,
    cart: Mutex<Cart>,
}

impl CartStore {
    /// Creates an empty store. Call [`CartStore::load`] to rehydrate.
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        CartStore {
            storage,
            cart: Mutex::new(Cart::new()),
        }
    }

    /// Rehydrates the cart from storage.
    ///
    /// A corrupted record is dropped and the cart starts empty.
    pub async fn load(&self) -> AppResult<()> {
        let mut cart = self.cart.lock().await;

        *cart = match self.storage.get(CART_KEY).await? {
            Some(json) => match Cart::from_json(&json) {
                Ok(restored) => {
                    debug!(lines = restored.len(), "Cart restored");
                    restored
                }
                Err(e) => {
                    warn!(error = %e, "Stored cart is corrupted, starting empty");
                    self.storage.remove(CART_KEY).await?;
                    Cart::new()
                }
            },
            None => Cart::new(),
        };

        Ok(())
    }

    /// Adds one unit of a product. Existing lines keep their position.
    pub async fn add_to_cart(&self, item: CartItem) -> AppResult<Cart> {
        let id = item.id;
        let snapshot = self.mutate(|cart| cart.add_item(item)).await?;
        debug!(product_id = id, count = snapshot.count(), "Added to cart");
        Ok(snapshot)
    }

    /// Removes every line for a product.
    pub async fn remove_from_cart(&self, id: ProductId) -> AppResult<Cart> {
        let snapshot = self
            .mutate(|cart| {
                cart.remove(id);
            })
            .await?;
        debug!(product_id = id, count = snapshot.count(), "Removed from cart");
        Ok(snapshot)
    }

    /// Empties the cart and deletes the persisted record.
    pub async fn clear_cart(&self) -> AppResult<()> {
        let mut cart = self.cart.lock().await;
        self.storage.remove(CART_KEY).await?;
        cart.clear();

        info!("Cart cleared");
        Ok(())
    }

    pub async fn cart_count(&self) -> u64 {
        self.cart.lock().await.count()
    }

    pub async fn cart_total(&self) -> Money {
        self.cart.lock().await.total()
    }

    /// Cloned view of the cart.
    pub async fn snapshot(&self) -> Cart {
        self.cart.lock().await.clone()
    }

    async fn mutate<F>(&self, f: F) -> AppResult<Cart>
    where
        F: FnOnce(&mut Cart),
    {
        let mut cart = self.cart.lock().await;

        let mut next = cart.clone();
        f(&mut next);
        self.storage.set(CART_KEY, &next.to_json()?).await?;

        *cart = next;
        Ok(cart.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bazaar_store::{Database, MemoryStorage, SqliteStorage, StoreConfig};

    fn item(id: ProductId, cents: i64) -> CartItem {
        CartItem::new(id, format!("Product {}", id), Money::from_cents(cents), "")
    }

    #[tokio::test]
    async fn test_add_increments_and_persists() {
        let storage = Arc::new(MemoryStorage::new());
        let store = CartStore::new(storage.clone());
        store.load().await.unwrap();

        store.add_to_cart(item(1, 1000)).await.unwrap();
        store.add_to_cart(item(2, 250)).await.unwrap();
        let cart = store.add_to_cart(item(1, 1000)).await.unwrap();

        assert_eq!(cart.len(), 2);
        assert_eq!(cart.get(1).unwrap().quantity, 2);
        assert_eq!(store.cart_count().await, 3);
        assert_eq!(store.cart_total().await, Money::from_cents(2250));

        let stored = storage.get(CART_KEY).await.unwrap().unwrap();
        assert_eq!(stored, cart.to_json().unwrap());
    }

    #[tokio::test]
    async fn test_remove_then_add_starts_at_one() {
        let store = CartStore::new(Arc::new(MemoryStorage::new()));

        store.add_to_cart(item(5, 100)).await.unwrap();
        store.add_to_cart(item(5, 100)).await.unwrap();
        store.remove_from_cart(5).await.unwrap();
        let cart = store.add_to_cart(item(5, 100)).await.unwrap();

        assert_eq!(cart.len(), 1);
        assert_eq!(cart.get(5).unwrap().quantity, 1);
    }

    #[tokio::test]
    async fn test_clear_removes_record() {
        let storage = Arc::new(MemoryStorage::new());
        let store = CartStore::new(storage.clone());

        store.add_to_cart(item(1, 100)).await.unwrap();
        store.clear_cart().await.unwrap();

        assert!(store.snapshot().await.is_empty());
        assert_eq!(storage.get(CART_KEY).await.unwrap(), None);

        let reloaded = CartStore::new(storage);
        reloaded.load().await.unwrap();
        assert!(reloaded.snapshot().await.is_empty());
    }

    #[tokio::test]
    async fn test_corrupted_record_resets() {
        let storage = Arc::new(MemoryStorage::with_entries([(CART_KEY, "[{\"id\":")]));
        let store = CartStore::new(storage.clone());

        store.load().await.unwrap();

        assert!(store.snapshot().await.is_empty());
        assert_eq!(storage.get(CART_KEY).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_restart_preserves_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bazaar.db");

        {
            let db = Database::new(StoreConfig::new(&path)).await.unwrap();
            let store = CartStore::new(Arc::new(SqliteStorage::new(db.clone())));
            for id in [3, 1, 2, 1] {
                store.add_to_cart(item(id, 100)).await.unwrap();
            }
            db.close().await;
        }

        let db = Database::new(StoreConfig::new(&path)).await.unwrap();
        let store = CartStore::new(Arc::new(SqliteStorage::new(db)));
        store.load().await.unwrap();

        let cart = store.snapshot().await;
        let ids: Vec<_> = cart.items().iter().map(|i| (i.id, i.quantity)).collect();
        assert_eq!(ids, vec![(3, 1), (1, 2), (2, 1)]);
    }
}
