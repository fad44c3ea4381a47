//! Validation errors for product records.
//!
//! This module defines errors that occur when product rules are violated.
//! These errors are returned by `try_new` constructors, by console form
//! coercion, and by registry-side checks on incoming drafts.
//!
//! # Examples
//!
//! Handling validation errors:
//!
//! ```
//! use larder::domain::error::ValidationError;
//! use larder::domain::product::ProductDraft;
//! use rust_decimal_macros::dec;
//!
//! // A blank name will fail validation
//! let result = ProductDraft::try_new("   ", None, None, dec!(2.50), 10);
//!
//! assert!(matches!(
//!     result,
//!     Err(ValidationError::MissingField { field: "name" })
//! ));
//! ```

use thiserror::Error;

/// Errors that occur when product validation rules are violated.
///
/// A draft that fails validation never reaches the registry: the console
/// rejects it before making any call, and the registry rejects it again
/// before touching storage.
#[derive(Error, Debug, Clone)]
pub enum ValidationError {
    /// A required field was empty or absent.
    #[error("missing required field: {field}")]
    MissingField {
        /// Name of the missing field.
        field: &'static str,
    },

    /// A field value could not be interpreted.
    #[error("invalid value for {field}: {reason}")]
    InvalidValue {
        /// Name of the offending field.
        field: &'static str,
        /// What was wrong with the input.
        reason: String,
    },

    /// Prices cannot be negative.
    #[error("price must not be negative, got {price}")]
    NegativePrice {
        /// The invalid price that was provided.
        price: rust_decimal::Decimal,
    },
}
