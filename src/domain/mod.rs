//! Inventory domain logic.

pub mod error;
pub mod id;
pub mod product;

// Core domain types
pub use error::ValidationError;
pub use id::ProductId;
pub use product::{clamped_quantity, Product, ProductDraft};
