//! Tax configuration model for document-chain.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One tax component (VAT or withholding).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct TaxComponent {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default)]
    pub rate: Decimal,
}

impl TaxComponent {
    pub fn enabled(rate: Decimal) -> Self {
        Self { enabled: true, rate }
    }
}

/// Tax configuration carried by a document. Rates are fractions
/// (0.07 = 7%).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct TaxConfig {
    #[serde(default)]
    pub vat: TaxComponent,
    #[serde(default)]
    pub withholding: TaxComponent,
    #[serde(default)]
    pub gross_up: bool,
}

/// Flat tax shape (`tax_rate`/`tax_type`) still present in documents from
/// older deployments. Migrated to [`TaxConfig`] exactly once at the
/// storage boundary, never inside business logic.
#[derive(Debug, Clone, Deserialize)]
pub struct LegacyTax {
    pub tax_rate: Decimal,
    pub tax_type: String,
}

impl From<LegacyTax> for TaxConfig {
    fn from(legacy: LegacyTax) -> Self {
        match legacy.tax_type.as_str() {
            "vat" => TaxConfig {
                vat: TaxComponent::enabled(legacy.tax_rate),
                ..TaxConfig::default()
            },
            "withholding" => TaxConfig {
                withholding: TaxComponent::enabled(legacy.tax_rate),
                ..TaxConfig::default()
            },
            _ => TaxConfig::default(),
        }
    }
}
