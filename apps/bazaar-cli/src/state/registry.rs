//! # Stores Registry
//!
//! Explicit container for the application's stores, passed by reference to
//! every command.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Stores::open(config)                                                   │
//! │     │                                                                   │
//! │     ├── database_path = Some ──► Database::new ──► SqliteStorage        │
//! │     │   database_path = None ──► MemoryStorage                          │
//! │     │                                                                   │
//! │     ├── SessionStore::restore()  ┐                                      │
//! │     ├── CartStore::load()        ┘ awaited before anything is returned  │
//! │     ▼                                                                   │
//! │  Stores { config, api, session, cart }                                  │
//! │                                                                         │
//! │  stores.session()? / stores.cart()?                                     │
//! │     unregistered ──► STORE_NOT_INITIALIZED                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::Arc;

use tracing::info;

use bazaar_api::ApiClient;
use bazaar_store::{Database, MemoryStorage, SqliteStorage, Storage, StoreConfig};

use crate::error::{AppError, AppResult};
use crate::state::{CartStore, ConfigState, SessionStore};

/// Every store a command may need.
pub struct Stores {
    config: ConfigState,
    api: ApiClient,
    database: Option<Database>,
    session: Option<Arc<SessionStore>>,
    cart: Option<Arc<CartStore>>,
}

impl Stores {
    /// An empty registry. Stores must be registered before use.
    pub fn new(config: ConfigState, api: ApiClient) -> Self {
        Stores {
            config,
            api,
            database: None,
            session: None,
            cart: None,
        }
    }

    /// Opens storage per the configuration and registers restored stores.
    pub async fn open(config: ConfigState) -> AppResult<Self> {
        match config.database_path.clone() {
            Some(path) => {
                info!(path = %path.display(), "Opening storage");
                let db = Database::new(StoreConfig::new(path)).await?;
                let storage = Arc::new(SqliteStorage::new(db.clone()));
                let mut stores = Stores::with_storage(config, storage).await?;
                stores.database = Some(db);
                Ok(stores)
            }
            None => {
                info!("Using in-memory storage");
                Stores::with_storage(config, Arc::new(MemoryStorage::new())).await
            }
        }
    }

    /// Builds and restores both stores on the given storage.
    pub async fn with_storage(config: ConfigState, storage: Arc<dyn Storage>) -> AppResult<Self> {
        let api = ApiClient::new(&config.client().api)?;

        let session = SessionStore::new(storage.clone(), api.clone(), config.profile_user_id);
        session.restore().await?;

        let cart = CartStore::new(storage);
        cart.load().await?;

        let mut stores = Stores::new(config, api);
        stores.register_session(Arc::new(session));
        stores.register_cart(Arc::new(cart));
        Ok(stores)
    }

    pub fn register_session(&mut self, session: Arc<SessionStore>) {
        self.session = Some(session);
    }

    pub fn register_cart(&mut self, cart: Arc<CartStore>) {
        self.cart = Some(cart);
    }

    pub fn session(&self) -> AppResult<&SessionStore> {
        self.session
            .as_deref()
            .ok_or_else(|| AppError::store_not_initialized("Session"))
    }

    pub fn cart(&self) -> AppResult<&CartStore> {
        self.cart
            .as_deref()
            .ok_or_else(|| AppError::store_not_initialized("Cart"))
    }

    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    pub fn config(&self) -> &ConfigState {
        &self.config
    }

    /// The SQLite database, when storage is durable.
    pub fn database(&self) -> Option<&Database> {
        self.database.as_ref()
    }

    /// Closes the database pool, if any.
    pub async fn close(&self) {
        if let Some(db) = &self.database {
            db.close().await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use bazaar_api::ClientConfig;

    #[tokio::test]
    async fn test_unregistered_store() {
        let config = ConfigState::default();
        let api = ApiClient::with_base_url("http://localhost:1").unwrap();
        let stores = Stores::new(config, api);

        let err = stores.session().err().unwrap();
        assert_eq!(err.code, ErrorCode::StoreNotInitialized);
        assert_eq!(stores.cart().err().unwrap().code, ErrorCode::StoreNotInitialized);
    }

    #[tokio::test]
    async fn test_open_in_memory_is_ready() {
        let mut config = ConfigState::new(ClientConfig::with_base_url("http://localhost:1"));
        config.database_path = None;

        let stores = Stores::open(config).await.unwrap();
        assert!(stores.session().unwrap().is_ready());
        assert!(stores.cart().unwrap().snapshot().await.is_empty());
        assert!(stores.database().is_none());
    }

    #[tokio::test]
    async fn test_open_sqlite_file() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = ConfigState::new(ClientConfig::with_base_url("http://localhost:1"));
        config.database_path = Some(dir.path().join("bazaar.db"));

        let stores = Stores::open(config).await.unwrap();
        let db = stores.database().unwrap();
        assert!(db.health_check().await);
        stores.close().await;
    }
}
