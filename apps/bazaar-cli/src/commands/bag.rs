//! # Bag Commands
//!
//! The bag is a read model of the remote cart records, joined with product
//! details.
//!
//! ## Reconciliation
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  GET /carts                                                             │
//! │     [{id:7, products:[{1,2},{3,1}]}, {id:9, products:[{1,1}]}]          │
//! │       │                                                                 │
//! │       ▼ flatten (stamp owning record id)                                │
//! │     (7,1,2) (7,3,1) (9,1,1)                                             │
//! │       │                                                                 │
//! │       ▼ distinct product ids, first-seen order                          │
//! │     [1, 3]                                                              │
//! │       │                                                                 │
//! │       ▼ GET /products/{id} for each, concurrently (join_all)            │
//! │     failures logged, rows keep absent product fields                    │
//! │       │                                                                 │
//! │       ▼ join by product id                                              │
//! │     Bag { rows, total }                                                 │
//! │                                                                         │
//! │  remove_cart_record(7): DELETE /carts/7, then drop every row of 7      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::HashMap;

use futures_util::future::join_all;
use serde::Serialize;
use tracing::{debug, info, warn};

use bazaar_core::bag::{distinct_product_ids, flatten};
use bazaar_core::{Bag, BagRow, CartRecordId, CoreError, Money};

use crate::commands::session::require_session;
use crate::error::AppResult;
use crate::state::Stores;

/// Shown after a remote record is deleted.
pub const REMOVED_MESSAGE: &str = "Item successfully removed from the cart!";

/// Shown when the bag has no rows.
pub const EMPTY_BAG_MESSAGE: &str = "Your bag is empty. Start shopping now!";

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BagResponse {
    pub rows: Vec<BagRow>,
    pub total: Money,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<&'static str>,
}

impl From<&Bag> for BagResponse {
    fn from(bag: &Bag) -> Self {
        BagResponse {
            rows: bag.rows().to_vec(),
            total: bag.total(),
            message: bag.is_empty().then_some(EMPTY_BAG_MESSAGE),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoveRecordResponse {
    pub cart_id: CartRecordId,
    pub rows_removed: usize,
    pub message: &'static str,
    pub bag: BagResponse,
}

/// Loads the remote records and joins them with product details.
pub async fn load_bag(stores: &Stores) -> AppResult<Bag> {
    let api = stores.api();

    let entries = flatten(&api.list_carts().await?);
    let ids = distinct_product_ids(&entries);
    debug!(rows = entries.len(), products = ids.len(), "Fetching bag products");

    let fetched = join_all(ids.iter().map(|id| api.get_product(*id))).await;

    let mut details = HashMap::with_capacity(ids.len());
    for (id, result) in ids.into_iter().zip(fetched) {
        match result {
            Ok(Some(product)) => {
                details.insert(id, product);
            }
            Ok(None) => warn!(product_id = id, "Bag product missing"),
            Err(e) => warn!(product_id = id, error = %e, "Bag product fetch failed"),
        }
    }

    Ok(Bag::join(entries, &details))
}

pub async fn bag_view(stores: &Stores) -> AppResult<BagResponse> {
    debug!("bag_view command");
    require_session(stores).await?;

    let bag = load_bag(stores).await?;
    Ok(BagResponse::from(&bag))
}

/// Deletes a whole remote record and every bag row it owns.
///
/// A failed delete leaves the bag untouched and returns the error.
pub async fn remove_cart_record(stores: &Stores, cart_id: CartRecordId) -> AppResult<RemoveRecordResponse> {
    debug!(cart_id, "remove_cart_record command");
    require_session(stores).await?;

    let mut bag = load_bag(stores).await?;
    if !bag.rows().iter().any(|r| r.cart_id == cart_id) {
        return Err(CoreError::CartRecordNotFound(cart_id).into());
    }

    stores.api().delete_cart(cart_id).await?;
    let rows_removed = bag.remove_cart_record(cart_id);
    info!(cart_id, rows_removed, "Cart record removed");

    Ok(RemoveRecordResponse {
        cart_id,
        rows_removed,
        message: REMOVED_MESSAGE,
        bag: BagResponse::from(&bag),
    })
}
