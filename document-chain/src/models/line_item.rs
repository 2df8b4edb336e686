//! Line item model for document-chain.

use chain_core::error::ChainError;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Line item on a chain document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    pub description: String,
    pub quantity: Decimal,
    #[serde(default)]
    pub unit: String,
    pub unit_price: Decimal,
}

impl LineItem {
    /// A line item only counts toward the subtotal with a positive
    /// quantity. A zero unit price stays billable (free-of-charge lines).
    pub fn is_billable(&self) -> bool {
        self.quantity > Decimal::ZERO
    }

    /// Extended amount for this line.
    pub fn amount(&self) -> Decimal {
        self.quantity * self.unit_price
    }
}

/// Boundary validation: the tax calculator itself does not reject negative
/// inputs, so callers run this before computing anything.
pub fn validate_items(items: &[LineItem]) -> Result<(), ChainError> {
    for item in items {
        if item.quantity < Decimal::ZERO {
            return Err(ChainError::Validation(format!(
                "negative quantity on line item '{}'",
                item.description
            )));
        }
        if item.unit_price < Decimal::ZERO {
            return Err(ChainError::Validation(format!(
                "negative unit price on line item '{}'",
                item.description
            )));
        }
    }
    Ok(())
}
