//! Remote cart record endpoints.

use serde_json::Value;
use tracing::{debug, info};

use bazaar_core::{CartRecordId, NewRemoteCart, RemoteCart};

use crate::client::ApiClient;
use crate::error::ClientResult;

impl ApiClient {
    /// GET `/carts`.
    pub async fn list_carts(&self) -> ClientResult<Vec<RemoteCart>> {
        let carts: Option<Vec<RemoteCart>> = self.get_json("/carts").await?;
        let carts = carts.unwrap_or_default();
        debug!(count = carts.len(), "Fetched remote cart records");
        Ok(carts)
    }

    /// POST `/carts`, returning the created record.
    pub async fn create_cart(&self, cart: &NewRemoteCart) -> ClientResult<RemoteCart> {
        let created: RemoteCart = self.post_json("/carts", cart).await?;
        info!(cart_id = created.id, lines = created.products.len(), "Created remote cart record");
        Ok(created)
    }

    /// DELETE `/carts/{id}`. The response is whatever the API echoes back.
    pub async fn delete_cart(&self, id: CartRecordId) -> ClientResult<Value> {
        let echoed = self.delete(&format!("/carts/{}", id)).await?;
        info!(cart_id = id, "Deleted remote cart record");
        Ok(echoed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bazaar_core::RemoteCartLine;
    use wiremock::matchers::{body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_list_carts() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/carts"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                { "id": 7, "userId": 1, "date": "2020-03-02T00:00:00.000Z",
                  "products": [{ "productId": 1, "quantity": 4 }, { "productId": 2, "quantity": 1 }] }
            ])))
            .mount(&server)
            .await;

        let client = ApiClient::with_base_url(server.uri()).unwrap();
        let carts = client.list_carts().await.unwrap();

        assert_eq!(carts.len(), 1);
        assert_eq!(carts[0].id, 7);
        assert_eq!(carts[0].products.len(), 2);
    }

    #[tokio::test]
    async fn test_create_cart_posts_camel_case() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/carts"))
            .and(body_partial_json(serde_json::json!({
                "userId": 1,
                "products": [{ "productId": 5, "quantity": 1 }]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "id": 11, "userId": 1, "date": "2024-05-01T10:00:00.000Z",
                "products": [{ "productId": 5, "quantity": 1 }]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = ApiClient::with_base_url(server.uri()).unwrap();
        let created = client
            .create_cart(&NewRemoteCart::new(
                1,
                vec![RemoteCartLine {
                    product_id: 5,
                    quantity: 1,
                }],
            ))
            .await
            .unwrap();

        assert_eq!(created.id, 11);
    }

    #[tokio::test]
    async fn test_delete_cart_failure_propagates() {
        let server = MockServer::start().await;

        Mock::given(method("DELETE"))
            .and(path("/carts/7"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let client = ApiClient::with_base_url(server.uri()).unwrap();
        let err = client.delete_cart(7).await.unwrap_err();
        assert_eq!(err.status(), Some(500));
    }
}
