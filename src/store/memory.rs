//! In-memory store implementation for testing.

use std::collections::HashMap;
use std::sync::atomic::{AtomicI32, Ordering};

use parking_lot::RwLock;

use super::ProductStore;
use crate::domain::{clamped_quantity, Product, ProductDraft, ProductId};
use crate::error::Result;

/// In-memory product store for tests and ephemeral registries.
///
/// Assigns ids from a monotonic counter, so ids stay unique for the life of
/// the store even after removals.
#[derive(Debug, Default)]
pub struct MemoryStore {
    products: RwLock<HashMap<ProductId, Product>>,
    next_id: AtomicI32,
}

impl MemoryStore {
    /// Create a new empty memory store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl ProductStore for MemoryStore {
    async fn list(&self) -> Result<Vec<Product>> {
        Ok(self.products.read().values().cloned().collect())
    }

    async fn create(&self, draft: &ProductDraft) -> Result<Product> {
        draft.validate()?;

        let id = ProductId::new(self.next_id.fetch_add(1, Ordering::SeqCst) + 1);
        let product = Product {
            id,
            name: draft.name.clone(),
            description: draft.description.clone(),
            category: draft.category.clone(),
            price: draft.price,
            quantity: draft.quantity,
        };

        self.products.write().insert(id, product.clone());
        Ok(product)
    }

    async fn adjust_quantity(&self, id: ProductId, delta: i64) -> Result<Option<Product>> {
        let mut products = self.products.write();
        Ok(products.get_mut(&id).map(|product| {
            product.quantity = clamped_quantity(product.quantity, delta);
            product.clone()
        }))
    }

    async fn remove(&self, id: ProductId) -> Result<bool> {
        Ok(self.products.write().remove(&id).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn draft(name: &str, quantity: u32) -> ProductDraft {
        ProductDraft {
            name: name.to_string(),
            description: None,
            category: None,
            price: dec!(1.00),
            quantity,
        }
    }

    #[tokio::test]
    async fn ids_are_not_reused_after_remove() {
        let store = MemoryStore::new();

        let first = store.create(&draft("Bread", 5)).await.unwrap();
        assert!(store.remove(first.id).await.unwrap());

        let second = store.create(&draft("Milk", 5)).await.unwrap();
        assert_ne!(first.id, second.id);
    }

    #[tokio::test]
    async fn adjust_applies_positive_and_negative_deltas() {
        let store = MemoryStore::new();
        let product = store.create(&draft("Bread", 10)).await.unwrap();

        let up = store.adjust_quantity(product.id, 5).await.unwrap().unwrap();
        assert_eq!(up.quantity, 15);

        let down = store.adjust_quantity(product.id, -7).await.unwrap().unwrap();
        assert_eq!(down.quantity, 8);
    }

    #[tokio::test]
    async fn list_returns_all_products() {
        let store = MemoryStore::new();
        store.create(&draft("Bread", 1)).await.unwrap();
        store.create(&draft("Milk", 2)).await.unwrap();

        let all = store.list().await.unwrap();
        assert_eq!(all.len(), 2);
    }
}
