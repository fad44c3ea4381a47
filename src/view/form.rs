//! Form coercion for console input.

use rust_decimal::Decimal;

use crate::domain::{ProductDraft, ValidationError};

/// Raw console input for a new product.
///
/// Every field arrives as text, exactly as typed at the prompt. Coercion
/// into a [`ProductDraft`] happens in [`into_draft`](Self::into_draft) so
/// a bad entry is reported before anything touches the registry.
#[derive(Debug, Clone, Default)]
pub struct ProductForm {
    pub name: String,
    pub description: String,
    pub category: String,
    pub price: String,
    pub quantity: String,
}

impl ProductForm {
    /// Coerce the form into a validated draft.
    ///
    /// # Errors
    ///
    /// Returns `MissingField` when name, price, or quantity is blank,
    /// `InvalidValue` when price or quantity does not parse, and the
    /// draft's own errors for anything [`ProductDraft::validate`] rejects.
    pub fn into_draft(self) -> Result<ProductDraft, ValidationError> {
        let name = required_field(&self.name, "name")?;
        let price_text = required_field(&self.price, "price")?;
        let quantity_text = required_field(&self.quantity, "quantity")?;

        let price = price_text
            .parse::<Decimal>()
            .map_err(|_| ValidationError::InvalidValue {
                field: "price",
                reason: format!("{price_text:?} is not a decimal number"),
            })?;

        let quantity = quantity_text
            .parse::<u32>()
            .map_err(|_| ValidationError::InvalidValue {
                field: "quantity",
                reason: format!("{quantity_text:?} is not a whole number"),
            })?;

        ProductDraft::try_new(
            name,
            normalize_optional(&self.description),
            normalize_optional(&self.category),
            price,
            quantity,
        )
    }
}

fn required_field<'a>(value: &'a str, field: &'static str) -> Result<&'a str, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::MissingField { field });
    }
    Ok(trimmed)
}

fn normalize_optional(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
