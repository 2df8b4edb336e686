//! Tax breakdown calculator.
//!
//! Pure functions turning a line-item subtotal plus a tax configuration
//! into a VAT/withholding/gross-up breakdown. Nothing here touches
//! storage; validation of non-negative inputs happens at the boundary
//! (see [`crate::models::validate_items`]).

use chain_core::error::ChainError;
use rust_decimal::{Decimal, RoundingStrategy};

use crate::models::{Document, LineItem, TaxConfig};

/// Money rounding: two decimal places, half-up on the cent.
pub fn round_money(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Computed tax breakdown for one document.
#[derive(Debug, Clone, PartialEq)]
pub struct TaxBreakdown {
    /// Billed line-item total. In gross-up mode this is the computed gross
    /// amount, not the caller's input.
    pub subtotal: Decimal,
    pub vat_amount: Decimal,
    pub withholding_amount: Decimal,
    pub total: Decimal,
    /// Billed minus net: the extra charged to cover tax effects. Only
    /// present in gross-up mode.
    pub gross_up_amount: Option<Decimal>,
}

/// Sum of the billable line items (positive quantity only).
pub fn items_subtotal(items: &[LineItem]) -> Decimal {
    items
        .iter()
        .filter(|item| item.is_billable())
        .map(LineItem::amount)
        .sum()
}

/// Breakdown for a document's items under its own tax configuration.
pub fn breakdown_for_document(doc: &Document) -> Result<TaxBreakdown, ChainError> {
    calculate_tax_breakdown(items_subtotal(&doc.items), &doc.tax_config)
}

/// Compute the tax breakdown for `items_subtotal`.
///
/// Normal mode treats the input as the billed amount. Gross-up mode treats
/// it as the net the issuer wants to receive and solves for the billed
/// amount whose tax effects land back on that net.
pub fn calculate_tax_breakdown(
    items_subtotal: Decimal,
    config: &TaxConfig,
) -> Result<TaxBreakdown, ChainError> {
    let vat_rate = if config.vat.enabled {
        config.vat.rate
    } else {
        Decimal::ZERO
    };
    let wht_rate = if config.withholding.enabled {
        config.withholding.rate
    } else {
        Decimal::ZERO
    };

    if vat_rate < Decimal::ZERO || wht_rate < Decimal::ZERO {
        return Err(ChainError::InvalidTaxConfiguration(format!(
            "tax rates must be non-negative (vat={}, withholding={})",
            vat_rate, wht_rate
        )));
    }

    if !config.gross_up {
        let subtotal = round_money(items_subtotal);
        let vat_amount = round_money(items_subtotal * vat_rate);
        let withholding_amount = round_money(items_subtotal * wht_rate);
        let total = round_money(subtotal + vat_amount - withholding_amount);
        return Ok(TaxBreakdown {
            subtotal,
            vat_amount,
            withholding_amount,
            total,
            gross_up_amount: None,
        });
    }

    // With disabled rates at zero, one denominator covers every enablement
    // combination: both taxes, withholding only, VAT only, neither.
    let net = items_subtotal;
    let denominator = Decimal::ONE + vat_rate - wht_rate;
    if denominator <= Decimal::ZERO {
        return Err(ChainError::InvalidTaxConfiguration(format!(
            "gross-up is undefined for rates vat={}, withholding={}",
            vat_rate, wht_rate
        )));
    }

    let gross = net / denominator;
    let subtotal = round_money(gross);
    let vat_amount = round_money(gross * vat_rate);
    let withholding_amount = round_money(gross * wht_rate);
    let total = round_money(net);

    Ok(TaxBreakdown {
        subtotal,
        vat_amount,
        withholding_amount,
        total,
        gross_up_amount: Some(round_money(subtotal - total)),
    })
}
