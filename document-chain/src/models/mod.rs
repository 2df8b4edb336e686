//! Domain models for document-chain.

mod document;
mod line_item;
mod payment;
mod tax;

pub use document::{
    DeletedLink, DeletedLinks, Document, DocumentNumber, DocumentStatus, DocumentType, LinkRef,
    LinkedDocuments,
};
pub use line_item::{validate_items, LineItem};
pub use payment::{Installment, PartialPayment, PaymentMethod};
pub use tax::{LegacyTax, TaxComponent, TaxConfig};
