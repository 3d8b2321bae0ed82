//! # bazaar-api: Remote Store API Client
//!
//! Typed access to the fakestoreapi-compatible REST API.
//!
//! ## Endpoints
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Operation        Method   Path              Module                    │
//! │  ─────────        ──────   ────              ──────                    │
//! │  List products    GET      /products         products.rs               │
//! │  Get product      GET      /products/{id}    products.rs               │
//! │  List carts       GET      /carts            carts.rs                  │
//! │  Create cart      POST     /carts            carts.rs                  │
//! │  Delete cart      DELETE   /carts/{id}       carts.rs                  │
//! │  Login            POST     /auth/login       auth.rs                   │
//! │  Get user         GET      /users/{id}       auth.rs                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use bazaar_api::{ApiClient, ClientConfig};
//!
//! let config = ClientConfig::load_or_default(None);
//! let client = ApiClient::new(&config.api)?;
//! let products = client.list_products().await?;
//! ```

pub mod auth;
pub mod carts;
pub mod client;
pub mod config;
pub mod error;
pub mod products;

pub use auth::token_subject;
pub use client::ApiClient;
pub use config::{ApiSettings, ClientConfig, SessionSettings, StorageSettings, DEFAULT_BASE_URL};
pub use error::{ClientError, ClientResult, ErrorKind};
