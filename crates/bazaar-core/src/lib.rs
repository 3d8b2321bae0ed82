//! # bazaar-core: Pure Domain Logic for the Bazaar Storefront
//!
//! This crate holds the storefront's domain model and every rule that can be
//! expressed without touching storage or the network.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Bazaar Storefront Architecture                     │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 Presentation (CLI / UI layer)                   │   │
//! │  │   Dashboard ──► Product Details ──► Bag ──► Login ──► Profile   │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │             SessionStore / CartStore (apps/bazaar-cli)          │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ bazaar-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │   cart    │  │    bag    │  │   │
//! │  │   │  Product  │  │   Money   │  │   Cart    │  │ flatten / │  │   │
//! │  │   │  Session  │  │  (cents)  │  │ CartItem  │  │   join    │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO STORAGE • NO NETWORK • PURE FUNCTIONS            │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Product, RemoteCart, UserSession, etc.)
//! - [`money`] - Money type with integer arithmetic
//! - [`cart`] - The local shopping cart and its invariants
//! - [`bag`] - Remote cart reconciliation (flatten, distinct ids, join)
//! - [`error`] - Domain error types
//! - [`validation`] - Input validation
//!
//! ## Example Usage
//!
//! ```rust
//! use bazaar_core::cart::Cart;
//! use bazaar_core::money::Money;
//! use bazaar_core::types::CartItem;
//!
//! let mut cart = Cart::new();
//! let item = CartItem::new(1, "Backpack", Money::from_cents(10995), "");
//!
//! cart.add_item(item.clone());
//! cart.add_item(item);
//!
//! assert_eq!(cart.count(), 2);
//! assert_eq!(cart.total().cents(), 21990);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod bag;
pub mod cart;
pub mod error;
pub mod money;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use bag::{Bag, BagEntry, BagRow};
pub use cart::Cart;
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Storage key holding the session token.
pub const TOKEN_KEY: &str = "token";

/// Storage key holding the serialized [`UserSession`].
pub const USER_KEY: &str = "user";

/// Storage key holding the serialized cart (ordered array of [`CartItem`]).
pub const CART_KEY: &str = "cart";

/// Shown when a product has no description.
pub const PLACEHOLDER_DESCRIPTION: &str = "No description available";

/// Number of stars in a product rating display.
pub const MAX_STARS: u8 = 5;
