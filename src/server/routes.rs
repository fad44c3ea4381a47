//! Request routing for the registry API.
//!
//! Four operations, all JSON:
//!
//! - `GET /products` - list every product
//! - `POST /products` - create a product from a draft body
//! - `PATCH /products/{id}` - apply a signed quantity adjustment
//! - `DELETE /products/{id}` - remove a product
//!
//! Validation failures and malformed bodies answer 400, unknown ids and
//! unknown routes answer 404, and storage failures answer 500. Every error
//! body is `{"error": <message>}`.

use std::io::Cursor;

use serde::{Deserialize, Serialize};
use tiny_http::{Header, Method, Response};

use crate::domain::ProductId;
use crate::error::Error;
use crate::store::ProductStore;

/// A computed reply, held apart from [`tiny_http::Response`] so handlers
/// can be exercised without a socket.
pub struct ApiReply {
    pub status: u16,
    pub body: Option<String>,
}

impl ApiReply {
    fn json<T: Serialize>(status: u16, value: &T) -> Self {
        match serde_json::to_string(value) {
            Ok(body) => Self {
                status,
                body: Some(body),
            },
            Err(e) => Self::error(500, &format!("response encoding failed: {e}")),
        }
    }

    fn error(status: u16, message: &str) -> Self {
        Self {
            status,
            body: Some(serde_json::json!({ "error": message }).to_string()),
        }
    }

    const fn no_content() -> Self {
        Self {
            status: 204,
            body: None,
        }
    }

    pub fn into_response(self) -> Response<Cursor<Vec<u8>>> {
        let has_body = self.body.is_some();
        let data = self.body.map_or_else(Vec::new, String::into_bytes);
        let response = Response::from_data(data).with_status_code(self.status);
        if !has_body {
            return response;
        }
        match Header::from_bytes(&b"Content-Type"[..], &b"application/json"[..]) {
            Ok(header) => response.with_header(header),
            Err(()) => response,
        }
    }
}

/// Dispatch one request against the store.
pub async fn handle<S: ProductStore>(
    store: &S,
    method: &Method,
    url: &str,
    body: &str,
) -> ApiReply {
    let path = url.split('?').next().unwrap_or(url);

    match (method, path) {
        (Method::Get, "/products") => list_products(store).await,
        (Method::Post, "/products") => create_product(store, body).await,
        (method, path) => {
            if let Some(id) = parse_id_path(path) {
                match method {
                    Method::Patch => return adjust_product(store, id, body).await,
                    Method::Delete => return remove_product(store, id).await,
                    _ => {}
                }
            }
            ApiReply::error(404, "not found")
        }
    }
}

/// Extract the product id from a `/products/{id}` path. Anything else,
/// including a non-numeric id segment, is an unknown route.
fn parse_id_path(path: &str) -> Option<ProductId> {
    let rest = path.strip_prefix("/products/")?;
    rest.parse::<i32>().ok().map(ProductId::new)
}

async fn list_products<S: ProductStore>(store: &S) -> ApiReply {
    match store.list().await {
        Ok(products) => ApiReply::json(200, &products),
        Err(e) => ApiReply::error(500, &e.to_string()),
    }
}

async fn create_product<S: ProductStore>(store: &S, body: &str) -> ApiReply {
    let draft = match serde_json::from_str(body) {
        Ok(draft) => draft,
        Err(e) => return ApiReply::error(400, &format!("invalid product body: {e}")),
    };

    match store.create(&draft).await {
        Ok(product) => ApiReply::json(200, &product),
        Err(Error::Validation(e)) => ApiReply::error(400, &e.to_string()),
        Err(e) => ApiReply::error(500, &e.to_string()),
    }
}

/// Body of a `PATCH /products/{id}` request.
#[derive(Debug, Deserialize)]
struct AdjustBody {
    delta: i64,
}

async fn adjust_product<S: ProductStore>(store: &S, id: ProductId, body: &str) -> ApiReply {
    let adjust: AdjustBody = match serde_json::from_str(body) {
        Ok(adjust) => adjust,
        Err(e) => return ApiReply::error(400, &format!("invalid adjustment body: {e}")),
    };

    match store.adjust_quantity(id, adjust.delta).await {
        Ok(Some(product)) => ApiReply::json(200, &product),
        Ok(None) => ApiReply::error(404, "product not found"),
        Err(e) => ApiReply::error(500, &e.to_string()),
    }
}

async fn remove_product<S: ProductStore>(store: &S, id: ProductId) -> ApiReply {
    match store.remove(id).await {
        Ok(true) => ApiReply::no_content(),
        Ok(false) => ApiReply::error(404, "product not found"),
        Err(e) => ApiReply::error(500, &e.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Product, ProductDraft};
    use crate::error::{Result, StorageError};
    use crate::store::MemoryStore;
    use rust_decimal_macros::dec;

    /// Store double whose every call fails.
    struct FailingStore;

    impl ProductStore for FailingStore {
        async fn list(&self) -> Result<Vec<Product>> {
            Err(StorageError::Database("registry offline".to_string()).into())
        }

        async fn create(&self, _draft: &ProductDraft) -> Result<Product> {
            Err(StorageError::Database("registry offline".to_string()).into())
        }

        async fn adjust_quantity(&self, _id: ProductId, _delta: i64) -> Result<Option<Product>> {
            Err(StorageError::Database("registry offline".to_string()).into())
        }

        async fn remove(&self, _id: ProductId) -> Result<bool> {
            Err(StorageError::Database("registry offline".to_string()).into())
        }
    }

    async fn seeded_store() -> (MemoryStore, Product) {
        let store = MemoryStore::new();
        let draft = ProductDraft::try_new(
            "Bread",
            Some("Sourdough loaf".to_string()),
            None,
            dec!(2.50),
            10,
        )
        .unwrap();
        let product = store.create(&draft).await.unwrap();
        (store, product)
    }

    fn body_json(reply: &ApiReply) -> serde_json::Value {
        serde_json::from_str(reply.body.as_deref().unwrap()).unwrap()
    }

    #[tokio::test]
    async fn get_products_returns_empty_array() {
        let store = MemoryStore::new();

        let reply = handle(&store, &Method::Get, "/products", "").await;

        assert_eq!(reply.status, 200);
        assert_eq!(body_json(&reply), serde_json::json!([]));
    }

    #[tokio::test]
    async fn get_products_lists_seeded_products() {
        let (store, product) = seeded_store().await;

        let reply = handle(&store, &Method::Get, "/products", "").await;

        assert_eq!(reply.status, 200);
        let listed: Vec<Product> = serde_json::from_str(reply.body.as_deref().unwrap()).unwrap();
        assert_eq!(listed, vec![product]);
    }

    #[tokio::test]
    async fn get_products_ignores_query_string() {
        let store = MemoryStore::new();

        let reply = handle(&store, &Method::Get, "/products?limit=5", "").await;

        assert_eq!(reply.status, 200);
    }

    #[tokio::test]
    async fn post_products_creates_and_returns_product() {
        let store = MemoryStore::new();
        let body = r#"{"name":"Milk","price":"1.20","quantity":6}"#;

        let reply = handle(&store, &Method::Post, "/products", body).await;

        assert_eq!(reply.status, 200);
        let created: Product = serde_json::from_str(reply.body.as_deref().unwrap()).unwrap();
        assert_eq!(created.name, "Milk");
        assert_eq!(created.price, dec!(1.20));
        assert_eq!(store.list().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn post_products_rejects_blank_name() {
        let store = MemoryStore::new();
        let body = r#"{"name":"   ","price":"1.20","quantity":6}"#;

        let reply = handle(&store, &Method::Post, "/products", body).await;

        assert_eq!(reply.status, 400);
        let error = body_json(&reply);
        assert!(error["error"].as_str().unwrap().contains("name"));
        assert!(store.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn post_products_rejects_malformed_json() {
        let store = MemoryStore::new();

        let reply = handle(&store, &Method::Post, "/products", "not json").await;

        assert_eq!(reply.status, 400);
        assert!(body_json(&reply)["error"].is_string());
    }

    #[tokio::test]
    async fn patch_product_applies_delta() {
        let (store, product) = seeded_store().await;
        let path = format!("/products/{}", product.id);

        let reply = handle(&store, &Method::Patch, &path, r#"{"delta":-4}"#).await;

        assert_eq!(reply.status, 200);
        let updated: Product = serde_json::from_str(reply.body.as_deref().unwrap()).unwrap();
        assert_eq!(updated.quantity, 6);
    }

    #[tokio::test]
    async fn patch_product_clamps_at_zero() {
        let (store, product) = seeded_store().await;
        let path = format!("/products/{}", product.id);

        let reply = handle(&store, &Method::Patch, &path, r#"{"delta":-20}"#).await;

        assert_eq!(reply.status, 200);
        let updated: Product = serde_json::from_str(reply.body.as_deref().unwrap()).unwrap();
        assert_eq!(updated.quantity, 0);
    }

    #[tokio::test]
    async fn patch_unknown_product_returns_404() {
        let store = MemoryStore::new();

        let reply = handle(&store, &Method::Patch, "/products/999", r#"{"delta":1}"#).await;

        assert_eq!(reply.status, 404);
    }

    #[tokio::test]
    async fn patch_rejects_body_without_delta() {
        let (store, product) = seeded_store().await;
        let path = format!("/products/{}", product.id);

        let reply = handle(&store, &Method::Patch, &path, "{}").await;

        assert_eq!(reply.status, 400);
        assert!(body_json(&reply)["error"]
            .as_str()
            .unwrap()
            .contains("delta"));
    }

    #[tokio::test]
    async fn delete_product_returns_no_content() {
        let (store, product) = seeded_store().await;
        let path = format!("/products/{}", product.id);

        let reply = handle(&store, &Method::Delete, &path, "").await;

        assert_eq!(reply.status, 204);
        assert!(reply.body.is_none());
        assert!(store.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn delete_unknown_product_returns_404() {
        let store = MemoryStore::new();

        let reply = handle(&store, &Method::Delete, "/products/999", "").await;

        assert_eq!(reply.status, 404);
    }

    #[tokio::test]
    async fn storage_failures_surface_as_500() {
        let reply = handle(&FailingStore, &Method::Get, "/products", "").await;
        assert_eq!(reply.status, 500);
        let error = body_json(&reply);
        assert_eq!(
            error["error"].as_str().unwrap(),
            "database error: registry offline"
        );

        let reply = handle(&FailingStore, &Method::Patch, "/products/1", r#"{"delta": -1}"#).await;
        assert_eq!(reply.status, 500);
    }

    #[tokio::test]
    async fn unknown_route_returns_404() {
        let store = MemoryStore::new();

        let reply = handle(&store, &Method::Get, "/inventory", "").await;
        assert_eq!(reply.status, 404);

        let reply = handle(&store, &Method::Get, "/products/abc", "").await;
        assert_eq!(reply.status, 404);

        let reply = handle(&store, &Method::Put, "/products/1", "").await;
        assert_eq!(reply.status, 404);
    }
}
