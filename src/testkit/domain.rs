//! Builders for domain values used across tests.
//!
//! Provides concise factory functions for [`ProductDraft`], [`Product`],
//! and [`ProductForm`] so tests focus on assertions rather than
//! construction boilerplate.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::domain::{Product, ProductDraft, ProductId};
use crate::view::ProductForm;

/// Draft with the given name and quantity, priced at 2.50.
pub fn draft(name: &str, quantity: u32) -> ProductDraft {
    priced_draft(name, dec!(2.50), quantity)
}

/// Draft with an explicit price.
pub fn priced_draft(name: &str, price: Decimal, quantity: u32) -> ProductDraft {
    ProductDraft {
        name: name.to_string(),
        description: None,
        category: Some("Bakery".to_string()),
        price,
        quantity,
    }
}

/// The canonical valid creation payload.
pub fn bread_draft() -> ProductDraft {
    ProductDraft {
        name: "Bread".to_string(),
        description: Some("Sourdough loaf".to_string()),
        category: Some("Bakery".to_string()),
        price: dec!(2.50),
        quantity: 10,
    }
}

/// A stored product with the given id, name, and quantity.
pub fn product(id: i32, name: &str, quantity: u32) -> Product {
    Product {
        id: ProductId::new(id),
        name: name.to_string(),
        description: None,
        category: Some("Bakery".to_string()),
        price: dec!(2.50),
        quantity,
    }
}

/// Filled-in console form matching [`bread_draft`].
pub fn bread_form() -> ProductForm {
    ProductForm {
        name: "Bread".to_string(),
        description: "Sourdough loaf".to_string(),
        category: "Bakery".to_string(),
        price: "2.50".to_string(),
        quantity: "10".to_string(),
    }
}
