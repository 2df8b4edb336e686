//! Payment models for document-chain.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Payment method recorded on a receipt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    #[default]
    BankTransfer,
    Cash,
    CreditCard,
    Cheque,
}

impl PaymentMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::BankTransfer => "bank_transfer",
            PaymentMethod::Cash => "cash",
            PaymentMethod::CreditCard => "credit_card",
            PaymentMethod::Cheque => "cheque",
        }
    }
}

/// Split of one chain total across multiple receipts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Installment {
    pub total_installments: u32,
    pub current_installment: u32,
    /// Amount still owed on the chain; drives the next receipt's paid
    /// amount while positive.
    pub remaining_amount: Decimal,
}

/// Reduction applied to a receipt draft's paid amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", content = "value", rename_all = "snake_case")]
pub enum PartialPayment {
    /// Fraction of the total withheld from this receipt (0.25 = 25%).
    Percentage(Decimal),
    /// Fixed amount withheld from this receipt.
    Fixed(Decimal),
}

impl PartialPayment {
    /// Amount payable after the reduction, floored at zero.
    pub fn deduct_from(&self, total: Decimal) -> Decimal {
        let deduction = match self {
            PartialPayment::Percentage(fraction) => total * *fraction,
            PartialPayment::Fixed(amount) => *amount,
        };
        (total - deduction).max(Decimal::ZERO)
    }
}
