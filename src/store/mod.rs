//! Persistence layer with pluggable storage backends.

mod memory;
mod sqlite;

pub use memory::MemoryStore;
pub use sqlite::SqliteProductStore;

use std::future::Future;

use crate::domain::{Product, ProductDraft, ProductId};
use crate::error::Result;

/// Storage operations for the product registry.
///
/// The registry server runs this against SQLite, tests run it against the
/// in-memory backend, and the console's HTTP client implements the same
/// trait over the wire, so callers never care which side of the network
/// they are on.
pub trait ProductStore: Send + Sync {
    /// List every product in the registry. Order is unspecified.
    fn list(&self) -> impl Future<Output = Result<Vec<Product>>> + Send;

    /// Validate and persist a draft, returning the stored product with its
    /// registry-assigned id.
    fn create(&self, draft: &ProductDraft) -> impl Future<Output = Result<Product>> + Send;

    /// Apply a signed quantity adjustment, clamping at zero. Returns the
    /// updated product, or `None` when the id is unknown.
    fn adjust_quantity(
        &self,
        id: ProductId,
        delta: i64,
    ) -> impl Future<Output = Result<Option<Product>>> + Send;

    /// Delete a product. Returns `false` when the id is unknown.
    fn remove(&self, id: ProductId) -> impl Future<Output = Result<bool>> + Send;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::error::ValidationError;
    use crate::error::Error;
    use crate::testkit::domain::draft;
    use rust_decimal_macros::dec;

    #[tokio::test]
    async fn memory_store_create_assigns_increasing_ids() {
        let store = MemoryStore::new();

        let first = store.create(&draft("Bread", 10)).await.unwrap();
        let second = store.create(&draft("Milk", 10)).await.unwrap();

        assert_ne!(first.id, second.id);
        assert_eq!(first.name, "Bread");
        assert_eq!(first.price, dec!(2.50));
    }

    #[tokio::test]
    async fn memory_store_rejects_invalid_draft() {
        let store = MemoryStore::new();

        let result = store.create(&draft("", 10)).await;

        assert!(matches!(
            result,
            Err(Error::Validation(ValidationError::MissingField { field: "name" }))
        ));
        assert!(store.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn memory_store_adjust_clamps_at_zero() {
        let store = MemoryStore::new();
        let product = store.create(&draft("Bread", 10)).await.unwrap();

        let updated = store
            .adjust_quantity(product.id, -20)
            .await
            .unwrap()
            .unwrap();

        assert_eq!(updated.quantity, 0);
    }

    #[tokio::test]
    async fn memory_store_adjust_unknown_id_returns_none() {
        let store = MemoryStore::new();

        let result = store.adjust_quantity(ProductId::new(999), 1).await.unwrap();

        assert!(result.is_none());
    }

    #[tokio::test]
    async fn memory_store_remove_drops_product() {
        let store = MemoryStore::new();
        let product = store.create(&draft("Bread", 10)).await.unwrap();

        assert!(store.remove(product.id).await.unwrap());
        assert!(!store.remove(product.id).await.unwrap());
        assert!(store.list().await.unwrap().is_empty());
    }
}
