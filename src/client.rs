//! HTTP client for the registry API.

use reqwest::{Client, Response, StatusCode};
use serde::Deserialize;
use tracing::debug;

use crate::domain::{Product, ProductDraft, ProductId};
use crate::error::{Error, Result};
use crate::store::ProductStore;

/// Console-side client for a running registry server.
///
/// Implements [`ProductStore`] over HTTP, so the console drives a remote
/// registry through the same trait the server runs against SQLite.
pub struct HttpRegistryClient {
    client: Client,
    base_url: String,
}

impl HttpRegistryClient {
    /// Create a client for the registry at `api_url`.
    #[must_use]
    pub fn new(api_url: impl Into<String>) -> Self {
        let mut base_url = api_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self {
            client: Client::new(),
            base_url,
        }
    }

    fn products_url(&self) -> String {
        format!("{}/products", self.base_url)
    }

    fn product_url(&self, id: ProductId) -> String {
        format!("{}/products/{}", self.base_url, id)
    }
}

/// Error payload returned by the registry on every non-success status.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

/// Turn a non-success response into [`Error::Api`], pulling the message out
/// of the `{"error": ...}` body when there is one.
async fn api_error(response: Response) -> Error {
    let status = response.status();
    let message = match response.json::<ErrorBody>().await {
        Ok(body) => body.error,
        Err(_) => status
            .canonical_reason()
            .unwrap_or("unknown error")
            .to_string(),
    };
    Error::Api {
        status: status.as_u16(),
        message,
    }
}

impl ProductStore for HttpRegistryClient {
    async fn list(&self) -> Result<Vec<Product>> {
        let url = self.products_url();
        debug!(url = %url, "fetching product list");

        let response = self.client.get(&url).send().await?;
        if !response.status().is_success() {
            return Err(api_error(response).await);
        }

        let products: Vec<Product> = response.json().await?;
        debug!(count = products.len(), "fetched products");
        Ok(products)
    }

    async fn create(&self, draft: &ProductDraft) -> Result<Product> {
        let response = self
            .client
            .post(self.products_url())
            .json(draft)
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(api_error(response).await);
        }

        let product: Product = response.json().await?;
        debug!(id = %product.id, name = %product.name, "created product");
        Ok(product)
    }

    async fn adjust_quantity(&self, id: ProductId, delta: i64) -> Result<Option<Product>> {
        let response = self
            .client
            .patch(self.product_url(id))
            .json(&serde_json::json!({ "delta": delta }))
            .send()
            .await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !response.status().is_success() {
            return Err(api_error(response).await);
        }

        let product: Product = response.json().await?;
        debug!(id = %id, delta, quantity = product.quantity, "adjusted quantity");
        Ok(Some(product))
    }

    async fn remove(&self, id: ProductId) -> Result<bool> {
        let response = self.client.delete(self.product_url(id)).send().await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(false);
        }
        if !response.status().is_success() {
            return Err(api_error(response).await);
        }

        debug!(id = %id, "removed product");
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_trims_trailing_slashes() {
        let client = HttpRegistryClient::new("http://127.0.0.1:3000/");
        assert_eq!(client.products_url(), "http://127.0.0.1:3000/products");
    }

    #[test]
    fn product_url_includes_the_id() {
        let client = HttpRegistryClient::new("http://127.0.0.1:3000");
        assert_eq!(
            client.product_url(ProductId::new(7)),
            "http://127.0.0.1:3000/products/7"
        );
    }
}
