//! # Product Commands
//!
//! Dashboard listing, product details and add-to-bag.
//!
//! ## Details Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  product <raw id>                                                       │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  parse_product_id ── "abc" / "0" ──► NOT_FOUND (navigate /not-found)    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  GET /products/{id} ── empty body ──► NOT_FOUND                         │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ProductView { stars, rating label, description or placeholder }        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;
use tracing::{debug, info, warn};

use bazaar_core::validation::parse_product_id;
use bazaar_core::{CartItem, NewRemoteCart, Product, ProductId, MAX_STARS};

use crate::commands::cart::CartResponse;
use crate::commands::session::require_session;
use crate::error::{AppError, AppResult};
use crate::state::Stores;

/// Shown after a product lands in the bag.
pub const ADDED_TO_BAG_MESSAGE: &str = "Added to bag successfully!";

/// Product detail view.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductView {
    pub product: Product,
    pub description: String,
    pub filled_stars: u8,
    pub max_stars: u8,
    pub rating_label: String,
}

impl From<Product> for ProductView {
    fn from(product: Product) -> Self {
        ProductView {
            description: product.description_or_default().to_string(),
            filled_stars: product.filled_stars(),
            max_stars: MAX_STARS,
            rating_label: product.rating_label(),
            product,
        }
    }
}

/// Cart after an add, plus the confirmation message.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddToBagResponse {
    pub message: &'static str,
    pub cart: CartResponse,
}

/// Lists the catalogue for the dashboard.
pub async fn list_products(stores: &Stores) -> AppResult<Vec<Product>> {
    debug!("list_products command");
    require_session(stores).await?;

    let products = stores.api().list_products().await?;
    info!(count = products.len(), "Products listed");
    Ok(products)
}

/// Shows one product. Invalid ids and unknown products are NOT_FOUND.
pub async fn product_details(stores: &Stores, raw_id: &str) -> AppResult<ProductView> {
    debug!(raw_id = %raw_id, "product_details command");
    require_session(stores).await?;

    let id = parse_route_id(raw_id)?;
    let product = fetch_product(stores, id).await?;
    Ok(product.into())
}

/// Adds one unit of a product to the local cart.
///
/// With `mirror_remote` enabled the add is also posted as a single-line
/// remote record. That post is best-effort.
pub async fn add_product_to_cart(stores: &Stores, raw_id: &str) -> AppResult<AddToBagResponse> {
    debug!(raw_id = %raw_id, "add_product_to_cart command");
    require_session(stores).await?;

    let id = parse_route_id(raw_id)?;
    let product = fetch_product(stores, id).await?;
    let cart = stores
        .cart()?
        .add_to_cart(CartItem::from_product(&product))
        .await?;

    if stores.config().mirror_remote {
        mirror_add(stores, id).await;
    }

    Ok(AddToBagResponse {
        message: ADDED_TO_BAG_MESSAGE,
        cart: CartResponse::from(&cart),
    })
}

/// Posts `{productId, quantity: 1}` as a new remote cart record.
pub async fn mirror_add(stores: &Stores, product_id: ProductId) {
    let user_id = match stores.session() {
        Ok(session) => session.user_id().await,
        Err(_) => None,
    };
    let Some(user_id) = user_id else {
        debug!(product_id, "No session, skipping remote mirror");
        return;
    };

    let record = NewRemoteCart::single(user_id, product_id, 1);
    if let Err(e) = stores.api().create_cart(&record).await {
        warn!(product_id, error = %e, "Remote cart mirror failed");
    }
}

fn parse_route_id(raw_id: &str) -> AppResult<ProductId> {
    parse_product_id(raw_id).map_err(|e| {
        debug!(raw_id = %raw_id, error = %e, "Invalid product id");
        AppError::not_found("Product", raw_id)
    })
}

async fn fetch_product(stores: &Stores, id: ProductId) -> AppResult<Product> {
    match stores.api().get_product(id).await {
        Ok(Some(product)) => Ok(product),
        Ok(None) => Err(AppError::not_found("Product", id)),
        Err(e) if e.status() == Some(404) => Err(AppError::not_found("Product", id)),
        Err(e) => Err(e.into()),
    }
}
