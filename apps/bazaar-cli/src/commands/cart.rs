//! # Cart Commands
//!
//! Local cart manipulation and checkout to the remote cart collection.
//!
//! ## Cart Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Lifecycle                                       │
//! │                                                                         │
//! │  ┌──────────┐     ┌──────────┐     ┌──────────────────────┐            │
//! │  │  Empty   │────►│ In Cart  │────►│ Remote cart record   │            │
//! │  │  Cart    │     │          │     │ (POST /carts)        │            │
//! │  └──────────┘     └──────────┘     └──────────────────────┘            │
//! │                        │                  submit_cart                   │
//! │              add_product_to_cart          (local cart kept)             │
//! │              remove_from_cart                                           │
//! │                        │                                                │
//! │                        ▼                                                │
//! │                   clear_cart ──────────────────────►                   │
//! │                                                      (back to empty)   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;
use tracing::{debug, info, warn};

use bazaar_core::{Cart, CartItem, Money, NewRemoteCart, ProductId, RemoteCart};

use crate::commands::session::require_session;
use crate::error::AppResult;
use crate::state::Stores;

/// Cart response including items and derived totals.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartResponse {
    pub items: Vec<CartItem>,
    pub count: u64,
    pub total: Money,
}

impl From<&Cart> for CartResponse {
    fn from(cart: &Cart) -> Self {
        CartResponse {
            items: cart.items().to_vec(),
            count: cart.count(),
            total: cart.total(),
        }
    }
}

/// Outcome of a checkout attempt.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitResponse {
    pub submitted: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub record: Option<RemoteCart>,
    pub cart: CartResponse,
}

pub async fn get_cart(stores: &Stores) -> AppResult<CartResponse> {
    debug!("get_cart command");
    let cart = stores.cart()?.snapshot().await;
    Ok(CartResponse::from(&cart))
}

/// Removes every line for a product.
pub async fn remove_from_cart(stores: &Stores, product_id: ProductId) -> AppResult<CartResponse> {
    debug!(product_id, "remove_from_cart command");
    let cart = stores.cart()?.remove_from_cart(product_id).await?;
    Ok(CartResponse::from(&cart))
}

pub async fn clear_cart(stores: &Stores) -> AppResult<CartResponse> {
    debug!("clear_cart command");
    stores.cart()?.clear_cart().await?;
    Ok(CartResponse::from(&Cart::new()))
}

/// Posts the whole local cart as one remote record.
///
/// ## Behavior
/// - An empty cart is not posted
/// - A failed post is logged and reported as `submitted: false`
/// - The local cart is never modified
pub async fn submit_cart(stores: &Stores) -> AppResult<SubmitResponse> {
    debug!("submit_cart command");
    require_session(stores).await?;

    let cart = stores.cart()?.snapshot().await;
    if cart.is_empty() {
        return Ok(SubmitResponse {
            submitted: false,
            record: None,
            cart: CartResponse::from(&cart),
        });
    }

    let user_id = stores
        .session()?
        .user_id()
        .await
        .unwrap_or(stores.config().profile_user_id);
    let request = NewRemoteCart::new(user_id, cart.remote_lines());

    let record = match stores.api().create_cart(&request).await {
        Ok(record) => {
            info!(cart_id = record.id, lines = record.products.len(), "Cart submitted");
            Some(record)
        }
        Err(e) => {
            warn!(error = %e, "Cart submit failed");
            None
        }
    };

    Ok(SubmitResponse {
        submitted: record.is_some(),
        record,
        cart: CartResponse::from(&cart),
    })
}
