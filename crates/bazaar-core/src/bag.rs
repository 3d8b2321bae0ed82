//! # Bag Reconciliation
//!
//! Pure half of the bag view: turns remote cart records plus fetched product
//! details into display rows. The network fan-out lives in the app crate.
//!
//! ## Pipeline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Vec<RemoteCart>                                                        │
//! │       │                                                                 │
//! │       ▼  flatten()              stamp each line with its cart id        │
//! │  Vec<BagEntry>                                                          │
//! │       │                                                                 │
//! │       ▼  distinct_product_ids() first-seen order, each id once          │
//! │  Vec<ProductId> ──► (fan-out fetch in the app, join barrier)            │
//! │       │                                                                 │
//! │       ▼  Bag::join()            missing details stay as `None`          │
//! │  Bag { rows: Vec<BagRow> }                                              │
//! │       │                                                                 │
//! │       ▼  remove_cart_record(7)  drops EVERY row of record 7             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::money::Money;
use crate::types::{CartRecordId, Product, ProductId, RemoteCart};
use crate::PLACEHOLDER_DESCRIPTION;

/// One remote cart line, stamped with the record it came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BagEntry {
    pub cart_id: CartRecordId,
    pub product_id: ProductId,
    pub quantity: u32,
}

/// Flattens every record's lines into one sequence, keeping record order.
pub fn flatten(carts: &[RemoteCart]) -> Vec<BagEntry> {
    carts
        .iter()
        .flat_map(|cart| {
            cart.products.iter().map(move |line| BagEntry {
                cart_id: cart.id,
                product_id: line.product_id,
                quantity: line.quantity,
            })
        })
        .collect()
}

/// Distinct product ids across the entries, in first-seen order.
pub fn distinct_product_ids(entries: &[BagEntry]) -> Vec<ProductId> {
    let mut seen = HashSet::new();
    entries
        .iter()
        .map(|e| e.product_id)
        .filter(|id| seen.insert(*id))
        .collect()
}

/// A display-ready bag row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BagRow {
    pub cart_id: CartRecordId,
    pub product_id: ProductId,
    pub quantity: u32,
    /// `None` when the detail fetch for this product failed.
    pub product: Option<Product>,
}

impl BagRow {
    pub fn title(&self) -> Option<&str> {
        self.product.as_ref().map(|p| p.title.as_str())
    }

    pub fn price(&self) -> Option<Money> {
        self.product.as_ref().map(|p| p.price)
    }

    pub fn description(&self) -> &str {
        self.product
            .as_ref()
            .map(Product::description_or_default)
            .unwrap_or(PLACEHOLDER_DESCRIPTION)
    }

    /// Price × quantity, zero when the price is unknown.
    pub fn line_total(&self) -> Money {
        self.price()
            .unwrap_or_default()
            .multiply_quantity(self.quantity)
    }
}

/// The merged bag view.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Bag {
    rows: Vec<BagRow>,
}

impl Bag {
    /// Joins entries with fetched details by product id.
    pub fn join(entries: Vec<BagEntry>, details: &HashMap<ProductId, Product>) -> Self {
        let rows = entries
            .into_iter()
            .map(|entry| BagRow {
                cart_id: entry.cart_id,
                product_id: entry.product_id,
                quantity: entry.quantity,
                product: details.get(&entry.product_id).cloned(),
            })
            .collect();
        Bag { rows }
    }

    pub fn rows(&self) -> &[BagRow] {
        &self.rows
    }

    /// Removes every row belonging to a remote record, returning the count.
    pub fn remove_cart_record(&mut self, cart_id: CartRecordId) -> usize {
        let before = self.rows.len();
        self.rows.retain(|r| r.cart_id != cart_id);
        before - self.rows.len()
    }

    /// Σ price × quantity, unknown prices counting as zero.
    pub fn total(&self) -> Money {
        self.rows.iter().map(BagRow::line_total).sum()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::RemoteCartLine;

    fn record(id: CartRecordId, lines: &[(ProductId, u32)]) -> RemoteCart {
        RemoteCart {
            id,
            user_id: 1,
            date: "2020-03-02T00:00:00.000Z".into(),
            products: lines
                .iter()
                .map(|&(product_id, quantity)| RemoteCartLine {
                    product_id,
                    quantity,
                })
                .collect(),
        }
    }

    fn product(id: ProductId, cents: i64) -> Product {
        Product {
            id,
            title: format!("Product {}", id),
            price: Money::from_cents(cents),
            description: None,
            category: None,
            image: None,
            rating: None,
        }
    }

    #[test]
    fn test_flatten_stamps_cart_ids() {
        let carts = vec![record(1, &[(10, 1), (11, 2)]), record(2, &[(10, 5)])];
        let entries = flatten(&carts);

        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0].cart_id, 1);
        assert_eq!(entries[2], BagEntry {
            cart_id: 2,
            product_id: 10,
            quantity: 5
        });
    }

    #[test]
    fn test_distinct_ids_first_seen_order() {
        let carts = vec![record(1, &[(3, 1), (1, 1)]), record(2, &[(3, 1), (2, 1)])];
        let ids = distinct_product_ids(&flatten(&carts));
        assert_eq!(ids, vec![3, 1, 2]);
    }

    #[test]
    fn test_join_keeps_rows_without_details() {
        let carts = vec![record(1, &[(1, 2), (2, 1)])];
        let mut details = HashMap::new();
        details.insert(1, product(1, 1000));

        let bag = Bag::join(flatten(&carts), &details);

        assert_eq!(bag.len(), 2);
        assert_eq!(bag.rows()[0].title(), Some("Product 1"));
        assert!(bag.rows()[1].product.is_none());
        assert_eq!(bag.rows()[1].description(), PLACEHOLDER_DESCRIPTION);
        assert_eq!(bag.total().cents(), 2000);
    }

    #[test]
    fn test_remove_cart_record_drops_all_its_rows() {
        let carts = vec![
            record(7, &[(1, 1), (2, 1), (3, 1)]),
            record(8, &[(1, 1)]),
        ];
        let mut bag = Bag::join(flatten(&carts), &HashMap::new());

        assert_eq!(bag.rows()[1].cart_id, 7);
        assert_eq!(bag.remove_cart_record(7), 3);
        assert_eq!(bag.len(), 1);
        assert!(bag.rows().iter().all(|r| r.cart_id != 7));
        assert_eq!(bag.remove_cart_record(7), 0);
    }
}
