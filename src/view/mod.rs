//! Console-side inventory state.
//!
//! - [`InventoryView`] - Snapshot of the registry owned by one console session
//! - [`ProductForm`] - Raw prompt input, coerced into a draft before submission
//!
//! The view never mutates its snapshot on its own: every change goes to the
//! registry first and the snapshot is patched from what the registry
//! returned, so the console always shows durable truth.

mod form;

pub use form::ProductForm;

use crate::domain::{Product, ProductId};
use crate::error::{Error, Result};
use crate::store::ProductStore;

/// Registry snapshot scoped to one console session.
///
/// Generic over the store, so a console session can run against the HTTP
/// client or directly against a local backend.
pub struct InventoryView<S> {
    store: S,
    products: Vec<Product>,
}

impl<S: ProductStore> InventoryView<S> {
    /// Create a view with an empty snapshot.
    pub fn new(store: S) -> Self {
        Self {
            store,
            products: Vec::new(),
        }
    }

    /// Replace the snapshot with the registry's current product list.
    ///
    /// # Errors
    ///
    /// Returns an error if the registry cannot be reached; the previous
    /// snapshot is kept unchanged in that case.
    pub async fn load_snapshot(&mut self) -> Result<()> {
        self.products = self.store.list().await?;
        Ok(())
    }

    /// Products in the current snapshot.
    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Find a snapshot product by id.
    #[must_use]
    pub fn find(&self, id: ProductId) -> Option<&Product> {
        self.products.iter().find(|product| product.id == id)
    }

    /// Snapshot products at or below the low-stock threshold.
    #[must_use]
    pub fn low_stock(&self, threshold: u32) -> Vec<&Product> {
        self.products
            .iter()
            .filter(|product| product.is_low_stock(threshold))
            .collect()
    }

    /// Coerce and validate a form, then create the product and append it to
    /// the snapshot.
    ///
    /// # Errors
    ///
    /// Returns a validation error without contacting the registry when the
    /// form does not coerce, and the registry's error when creation fails.
    pub async fn submit_new_product(&mut self, form: ProductForm) -> Result<Product> {
        let draft = form.into_draft()?;
        let product = self.store.create(&draft).await?;
        self.products.push(product.clone());
        Ok(product)
    }

    /// Apply a signed quantity adjustment through the registry and refresh
    /// the cached row from the result.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ProductNotFound`] when the registry does not know
    /// the id.
    pub async fn adjust_quantity(&mut self, id: ProductId, delta: i64) -> Result<Product> {
        let updated = self
            .store
            .adjust_quantity(id, delta)
            .await?
            .ok_or(Error::ProductNotFound(id))?;

        if let Some(cached) = self.products.iter_mut().find(|product| product.id == id) {
            *cached = updated.clone();
        }
        Ok(updated)
    }

    /// Remove a product from the registry and drop it from the snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ProductNotFound`] when the registry does not know
    /// the id.
    pub async fn remove(&mut self, id: ProductId) -> Result<()> {
        if self.store.remove(id).await? {
            self.products.retain(|product| product.id != id);
            Ok(())
        } else {
            Err(Error::ProductNotFound(id))
        }
    }
}
