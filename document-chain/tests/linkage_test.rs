//! Chain linkage tests: workflow gates, duplicate links, recreate
//! semantics, and draft defaults.

mod common;

use common::{invoice, now, quotation};
use chrono::NaiveDate;
use document_chain::models::{
    DeletedLink, DocumentStatus, DocumentType, Installment, LinkRef, PartialPayment, PaymentMethod,
};
use document_chain::services::linkage::create_linked_document;
use document_chain::ChainError;
use rust_decimal_macros::dec;
use uuid::Uuid;

#[test]
fn quotation_to_invoice_mints_chain_and_copies_content() {
    let source = quotation("QT-001");

    let outcome = create_linked_document(&source, DocumentType::Invoice, now()).unwrap();

    assert_eq!(outcome.draft.doc_type, DocumentType::Invoice);
    assert_eq!(outcome.draft.status, DocumentStatus::Pending);
    assert!(outcome.draft.document_number.is_auto());
    assert_eq!(outcome.draft.source_document_id, Some(source.id));
    assert_eq!(
        outcome.draft.source_document_number.as_deref(),
        Some("QT-001")
    );
    assert_eq!(outcome.draft.items, source.items);
    assert_eq!(outcome.draft.tax_config, source.tax_config);
    assert_eq!(outcome.draft.customer_name, source.customer_name);

    // Fresh chain id, shared by both sides.
    let chain_id = outcome.draft.chain_id.expect("draft carries a chain id");
    assert_eq!(outcome.source.chain_id, Some(chain_id));
    assert_eq!(
        outcome.source.linked_documents.invoice_id,
        Some(LinkRef::Linked(outcome.draft.id))
    );
}

#[test]
fn invoice_due_date_defaults_from_quotation_validity() {
    let source = quotation("QT-001");

    let outcome = create_linked_document(&source, DocumentType::Invoice, now()).unwrap();

    assert_eq!(outcome.draft.due_date, NaiveDate::from_ymd_opt(2026, 4, 30));
}

#[test]
fn existing_chain_id_is_reused() {
    let mut source = quotation("QT-001");
    let chain_id = Uuid::new_v4();
    source.chain_id = Some(chain_id);

    let outcome = create_linked_document(&source, DocumentType::Invoice, now()).unwrap();

    assert_eq!(outcome.draft.chain_id, Some(chain_id));
    assert_eq!(outcome.source.chain_id, Some(chain_id));
}

#[test]
fn cancelled_or_revised_quotation_cannot_be_invoiced() {
    for status in [DocumentStatus::Cancelled, DocumentStatus::Revised] {
        let mut source = quotation("QT-001");
        source.status = status;

        let err = create_linked_document(&source, DocumentType::Invoice, now()).unwrap_err();
        assert!(matches!(err, ChainError::PreconditionNotMet(_)));
    }
}

#[test]
fn receipt_requires_a_paid_invoice() {
    let source = invoice("INV-001");
    assert_eq!(source.status, DocumentStatus::Pending);

    let err = create_linked_document(&source, DocumentType::Receipt, now()).unwrap_err();
    assert!(matches!(err, ChainError::PreconditionNotMet(_)));
}

#[test]
fn wrong_source_types_are_workflow_errors() {
    let err = create_linked_document(&invoice("INV-001"), DocumentType::Invoice, now()).unwrap_err();
    assert!(matches!(err, ChainError::InvalidWorkflowTransition(_)));

    let err =
        create_linked_document(&quotation("QT-001"), DocumentType::Receipt, now()).unwrap_err();
    assert!(matches!(err, ChainError::InvalidWorkflowTransition(_)));

    let err =
        create_linked_document(&invoice("INV-001"), DocumentType::Quotation, now()).unwrap_err();
    assert!(matches!(err, ChainError::InvalidWorkflowTransition(_)));
}

#[test]
fn receipt_draft_gets_payment_defaults() {
    let mut source = invoice("INV-001");
    source.status = DocumentStatus::Paid;

    let outcome = create_linked_document(&source, DocumentType::Receipt, now()).unwrap();

    assert_eq!(outcome.draft.payment_date, Some(now().date_naive()));
    assert_eq!(outcome.draft.payment_method, Some(PaymentMethod::BankTransfer));
    // 5000 + 350 VAT - 150 WHT
    assert_eq!(outcome.draft.paid_amount, Some(dec!(5200.00)));
}

#[test]
fn installment_remainder_drives_paid_amount() {
    let mut source = invoice("INV-001");
    source.status = DocumentStatus::Paid;
    source.installment = Some(Installment {
        total_installments: 2,
        current_installment: 2,
        remaining_amount: dec!(2600),
    });

    let outcome = create_linked_document(&source, DocumentType::Receipt, now()).unwrap();

    assert_eq!(outcome.draft.paid_amount, Some(dec!(2600.00)));
}

#[test]
fn partial_payment_reduces_paid_amount() {
    let mut source = invoice("INV-001");
    source.status = DocumentStatus::Paid;
    source.partial_payment = Some(PartialPayment::Percentage(dec!(0.5)));

    let outcome = create_linked_document(&source, DocumentType::Receipt, now()).unwrap();
    assert_eq!(outcome.draft.paid_amount, Some(dec!(2600.00)));

    source.partial_payment = Some(PartialPayment::Fixed(dec!(200)));
    let outcome = create_linked_document(&source, DocumentType::Receipt, now()).unwrap();
    assert_eq!(outcome.draft.paid_amount, Some(dec!(5000.00)));
}

#[test]
fn real_existing_link_is_a_duplicate() {
    let mut source = quotation("QT-001");
    source
        .linked_documents
        .set(DocumentType::Invoice, LinkRef::Linked(Uuid::new_v4()));

    let err = create_linked_document(&source, DocumentType::Invoice, now()).unwrap_err();
    assert!(matches!(err, ChainError::DuplicateLink(_)));
}

#[test]
fn stale_pending_placeholder_is_replaced() {
    let mut source = quotation("QT-001");
    source
        .linked_documents
        .set(DocumentType::Invoice, LinkRef::Pending);

    let outcome = create_linked_document(&source, DocumentType::Invoice, now()).unwrap();

    assert_eq!(
        outcome.source.linked_documents.invoice_id,
        Some(LinkRef::Linked(outcome.draft.id))
    );
}

#[test]
fn recreate_after_delete_clears_the_deleted_record() {
    let mut source = quotation("QT-001");
    source.chain_id = Some(Uuid::new_v4());
    source.deleted_linked_documents.set(
        DocumentType::Invoice,
        DeletedLink {
            id: Uuid::new_v4(),
            document_number: "INV-001".to_string(),
            deleted_at: now(),
        },
    );

    let outcome = create_linked_document(&source, DocumentType::Invoice, now()).unwrap();

    assert!(outcome.source.deleted_linked_documents.invoice.is_none());
    assert_eq!(
        outcome.source.linked_documents.invoice_id,
        Some(LinkRef::Linked(outcome.draft.id))
    );
}

#[test]
fn failures_produce_no_partial_state() {
    let mut source = quotation("QT-001");
    source
        .linked_documents
        .set(DocumentType::Invoice, LinkRef::Linked(Uuid::new_v4()));
    let before = source.clone();

    let _ = create_linked_document(&source, DocumentType::Invoice, now()).unwrap_err();

    assert_eq!(source, before);
}
