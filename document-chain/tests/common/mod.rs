//! Common builders for document-chain tests.

#![allow(dead_code)]

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use document_chain::models::{
    Document, DocumentNumber, DocumentStatus, DocumentType, LineItem, TaxComponent, TaxConfig,
};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Fixed clock for deterministic assertions.
pub fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 14, 9, 30, 0).unwrap()
}

/// VAT 7% plus withholding 3%, the usual Thai freelancer setup.
pub fn thai_tax() -> TaxConfig {
    TaxConfig {
        vat: TaxComponent::enabled(dec!(0.07)),
        withholding: TaxComponent::enabled(dec!(0.03)),
        gross_up: false,
    }
}

pub fn design_job(unit_price: Decimal) -> LineItem {
    LineItem {
        description: "Logo design".to_string(),
        quantity: dec!(1),
        unit: "job".to_string(),
        unit_price,
    }
}

/// Approved quotation for a 5,000 job under [`thai_tax`].
pub fn quotation(number: &str) -> Document {
    let mut doc = Document::new(DocumentType::Quotation, "THB", now());
    doc.document_number = DocumentNumber::Assigned(number.to_string());
    doc.status = DocumentStatus::Approved;
    doc.customer_name = Some("Siam Coffee Co.".to_string());
    doc.items = vec![design_job(dec!(5000))];
    doc.tax_config = thai_tax();
    doc.valid_until = NaiveDate::from_ymd_opt(2026, 4, 30);
    doc
}

/// Invoice with the same content as [`quotation`].
pub fn invoice(number: &str) -> Document {
    let mut doc = Document::new(DocumentType::Invoice, "THB", now());
    doc.document_number = DocumentNumber::Assigned(number.to_string());
    doc.customer_name = Some("Siam Coffee Co.".to_string());
    doc.items = vec![design_job(dec!(5000))];
    doc.tax_config = thai_tax();
    doc.due_date = NaiveDate::from_ymd_opt(2026, 4, 14);
    doc
}
