//! Product-related domain types.
//!
//! - [`Product`] - A stocked item as recorded by the registry
//! - [`ProductDraft`] - A validated payload for creating a product
//!
//! Quantities are unsigned and every adjustment clamps at zero via
//! [`clamped_quantity`]; prices are exact decimals and travel as strings
//! on the wire so no precision is lost in transit.
//!
//! # Examples
//!
//! Creating a draft and checking stock levels:
//!
//! ```
//! use larder::domain::product::{clamped_quantity, ProductDraft};
//! use rust_decimal_macros::dec;
//!
//! let draft = ProductDraft::try_new(
//!     "Bread",
//!     Some("Sourdough loaf".to_string()),
//!     Some("Bakery".to_string()),
//!     dec!(2.50),
//!     10,
//! )
//! .unwrap();
//!
//! assert_eq!(draft.name, "Bread");
//! assert_eq!(clamped_quantity(10, -20), 0);
//! ```

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::error::ValidationError;
use super::id::ProductId;

/// A stocked item as recorded by the registry.
///
/// This is both the domain record and the wire object: the registry returns
/// it from every read and mutation, and consoles cache it in their snapshot.
/// The id is assigned by the registry on creation and never changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Registry-assigned identifier, unique across all products ever created.
    pub id: ProductId,
    /// Display name, always non-empty.
    pub name: String,
    /// Optional free-form description.
    pub description: Option<String>,
    /// Optional category label.
    pub category: Option<String>,
    /// Unit price, exact decimal, never negative.
    pub price: Decimal,
    /// Units on hand, never negative.
    pub quantity: u32,
}

impl Product {
    /// Returns true when the on-hand quantity is at or below `threshold`.
    #[must_use]
    pub const fn is_low_stock(&self, threshold: u32) -> bool {
        self.quantity <= threshold
    }
}

/// A creation payload, validated before it reaches storage.
///
/// Drafts arrive from two directions: console form coercion builds them
/// from prompt input, and the registry deserializes them from POST bodies.
/// Both paths run the same [`validate`](Self::validate) checks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductDraft {
    /// Display name, required and non-blank.
    pub name: String,
    /// Optional free-form description.
    #[serde(default)]
    pub description: Option<String>,
    /// Optional category label.
    #[serde(default)]
    pub category: Option<String>,
    /// Unit price; accepted as a JSON string or number, must not be negative.
    pub price: Decimal,
    /// Initial units on hand.
    pub quantity: u32,
}

impl ProductDraft {
    /// Create a new draft with validation.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if the name is blank or the price is
    /// negative.
    pub fn try_new(
        name: impl Into<String>,
        description: Option<String>,
        category: Option<String>,
        price: Decimal,
        quantity: u32,
    ) -> Result<Self, ValidationError> {
        let draft = Self {
            name: name.into(),
            description,
            category,
            price,
            quantity,
        };
        draft.validate()?;
        Ok(draft)
    }

    /// Check the draft against the product validation rules.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if the name is blank or the price is
    /// negative.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::MissingField { field: "name" });
        }

        if self.price < Decimal::ZERO {
            return Err(ValidationError::NegativePrice { price: self.price });
        }

        Ok(())
    }
}

/// Apply a signed adjustment to an on-hand quantity, clamping at zero.
///
/// Stock can never go negative: the result is `max(current + delta, 0)`,
/// so adjusting 10 by -20 yields 0.
#[must_use]
pub fn clamped_quantity(current: u32, delta: i64) -> u32 {
    let adjusted = i64::from(current).saturating_add(delta);
    // A delta cannot push the count past u32 range in practice, but the
    // conversion must still be total.
    adjusted.clamp(0, i64::from(u32::MAX)) as u32
}
