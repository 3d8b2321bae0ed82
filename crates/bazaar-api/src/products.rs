//! Product catalogue endpoints.

use tracing::debug;

use bazaar_core::{Product, ProductId};

use crate::client::ApiClient;
use crate::error::ClientResult;

impl ApiClient {
    /// GET `/products`. An empty body yields an empty list.
    pub async fn list_products(&self) -> ClientResult<Vec<Product>> {
        let products: Option<Vec<Product>> = self.get_json("/products").await?;
        let products = products.unwrap_or_default();
        debug!(count = products.len(), "Fetched product list");
        Ok(products)
    }

    /// GET `/products/{id}`. `None` when the API has no such product.
    pub async fn get_product(&self, id: ProductId) -> ClientResult<Option<Product>> {
        self.get_json(&format!("/products/{}", id)).await
    }
}
