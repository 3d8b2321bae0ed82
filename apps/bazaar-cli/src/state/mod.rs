//! # State Module
//!
//! Application state for the Bazaar client.
//!
//! Each store owns one concern and its own lock, and commands ask the
//! [`Stores`] registry for exactly what they need.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     Stores (registry)                           │   │
//! │  │  register_session(..)  register_cart(..)                        │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                              │                                          │
//! │          ┌──────────────────┼──────────────────┐                       │
//! │          ▼                  ▼                  ▼                        │
//! │  ┌──────────────┐  ┌──────────────┐  ┌──────────────────┐              │
//! │  │ SessionStore │  │  CartStore   │  │   ConfigState    │              │
//! │  │              │  │              │  │                  │              │
//! │  │  RwLock<     │  │  Mutex<      │  │  api_url         │              │
//! │  │   Option<    │  │    Cart      │  │  profile_user_id │              │
//! │  │   Session>>  │  │  >           │  │  mirror_remote   │              │
//! │  └──────┬───────┘  └──────┬───────┘  └──────────────────┘              │
//! │         └────────┬────────┘                                             │
//! │                  ▼                                                      │
//! │          Arc<dyn Storage>  (token / user / cart keys)                   │
//! │                                                                         │
//! │  THREAD SAFETY:                                                        │
//! │  • Store locks are held across the storage write                      │
//! │  • Readers get cloned snapshots                                        │
//! │  • ConfigState: Read-only after initialization                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod cart;
mod config;
mod registry;
mod session;

pub use cart::CartStore;
pub use config::ConfigState;
pub use registry::Stores;
pub use session::SessionStore;
