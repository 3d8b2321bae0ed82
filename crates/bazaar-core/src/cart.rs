//! # Cart
//!
//! The local shopping cart. This is the authoritative representation of what
//! the user intends to buy; remote cart records are a separate read model.
//!
//! ## Cart Operations
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Operation            Effect on items                                   │
//! │  ─────────            ───────────────                                   │
//! │  add_item(item)       id present  → items[i].quantity += 1 (in place)  │
//! │                       id absent   → push item with quantity 1          │
//! │                                                                         │
//! │  remove(id)           drop every entry with that id (not a decrement)  │
//! │                                                                         │
//! │  clear()              items = []                                        │
//! │                                                                         │
//! │  count()              Σ quantity     (derived, never stored)            │
//! │  total()              Σ price × qty  (derived, never stored)            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Serialization
//! A cart serializes as the bare ordered array of [`CartItem`], which is the
//! format persisted under the `cart` storage key.

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::{CartItem, ProductId, RemoteCartLine};
use crate::CART_KEY;

/// The shopping cart.
///
/// ## Invariants
/// - Items are unique by `id` (adding the same product increases quantity)
/// - Every quantity is at least 1
/// - Insertion order is preserved across mutations and persistence
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cart {
    items: Vec<CartItem>,
}

impl Cart {
    /// Creates a new empty cart.
    pub fn new() -> Self {
        Cart { items: Vec::new() }
    }

    /// Adds a product line or bumps its quantity by one.
    ///
    /// The incoming item's own quantity is ignored: a new entry always
    /// starts at 1.
    pub fn add_item(&mut self, item: CartItem) {
        if let Some(existing) = self.items.iter_mut().find(|i| i.id == item.id) {
            existing.quantity = existing.quantity.saturating_add(1);
            return;
        }

        self.items.push(CartItem { quantity: 1, ..item });
    }

    /// Removes every entry with the given id, returning how many were dropped.
    pub fn remove(&mut self, id: ProductId) -> usize {
        let before = self.items.len();
        self.items.retain(|i| i.id != id);
        before - self.items.len()
    }

    /// Empties the cart.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Returns the items in insertion order.
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    /// Returns the entry for a product, if present.
    pub fn get(&self, id: ProductId) -> Option<&CartItem> {
        self.items.iter().find(|i| i.id == id)
    }

    /// Total quantity across all entries.
    pub fn count(&self) -> u64 {
        self.items.iter().map(|i| u64::from(i.quantity)).sum()
    }

    /// Sum of price × quantity.
    pub fn total(&self) -> Money {
        self.items.iter().map(CartItem::line_total).sum()
    }

    /// Number of distinct products.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Lines for a remote cart record mirroring this cart.
    pub fn remote_lines(&self) -> Vec<RemoteCartLine> {
        self.items
            .iter()
            .map(|i| RemoteCartLine {
                product_id: i.id,
                quantity: i.quantity,
            })
            .collect()
    }

    /// Serializes the cart to its persisted JSON form.
    pub fn to_json(&self) -> CoreResult<String> {
        serde_json::to_string(self).map_err(|e| CoreError::corrupt(CART_KEY, e))
    }

    /// Parses a persisted cart.
    ///
    /// Duplicate ids are folded into the first entry and zero quantities are
    /// dropped so a hand-edited record cannot break the invariants.
    pub fn from_json(json: &str) -> CoreResult<Self> {
        let raw: Vec<CartItem> =
            serde_json::from_str(json).map_err(|e| CoreError::corrupt(CART_KEY, e))?;

        let mut cart = Cart::new();
        for item in raw.into_iter().filter(|i| i.quantity > 0) {
            match cart.items.iter_mut().find(|i| i.id == item.id) {
                Some(existing) => {
                    existing.quantity = existing.quantity.saturating_add(item.quantity)
                }
                None => cart.items.push(item),
            }
        }
        Ok(cart)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
