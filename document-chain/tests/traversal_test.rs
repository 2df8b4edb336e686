//! Chain traversal tests: reconstruction, canonical ordering, and
//! integrity checks.

mod common;

use common::{invoice, now, quotation};
use chrono::Duration;
use document_chain::models::{Document, DocumentType, LinkRef};
use document_chain::services::linkage::create_linked_document;
use document_chain::services::traversal::{build_chain, verify_chain};
use document_chain::ChainError;
use uuid::Uuid;

/// Quotation -> invoice -> receipt with all links recorded.
fn full_chain() -> Vec<Document> {
    let quotation = quotation("QT-001");

    let linked = create_linked_document(&quotation, DocumentType::Invoice, now()).unwrap();
    let mut invoice = linked.draft;
    let quotation = linked.source;
    invoice.status = document_chain::models::DocumentStatus::Paid;
    invoice.created_utc = now() + Duration::hours(1);

    let linked = create_linked_document(&invoice, DocumentType::Receipt, now()).unwrap();
    let mut receipt = linked.draft;
    let invoice = linked.source;
    receipt.created_utc = now() + Duration::hours(2);

    vec![receipt, invoice, quotation]
}

#[test]
fn chain_is_rebuilt_from_any_member() {
    let pool = full_chain();

    for start in &pool {
        let chain = build_chain(&pool, start).unwrap();
        assert_eq!(chain.documents.len(), 3, "from {}", start.doc_type.as_str());
        assert!(chain.chain_id.is_some());
    }
}

#[test]
fn members_are_ordered_quotation_invoice_receipt() {
    let pool = full_chain();

    let chain = build_chain(&pool, &pool[0]).unwrap();
    let types: Vec<DocumentType> = chain.documents.iter().map(|d| d.doc_type).collect();
    assert_eq!(
        types,
        vec![
            DocumentType::Quotation,
            DocumentType::Invoice,
            DocumentType::Receipt
        ]
    );
}

#[test]
fn reverse_scan_finds_children_without_forward_links() {
    let mut parent = quotation("QT-001");
    parent.chain_id = Some(Uuid::new_v4());

    // Child points back at the parent, but the parent never recorded it.
    let mut child = invoice("INV-001");
    child.source_document_id = Some(parent.id);

    let pool = vec![parent.clone(), child.clone()];
    let chain = build_chain(&pool, &parent).unwrap();

    assert_eq!(chain.documents.len(), 2);
    assert_eq!(chain.chain_id, parent.chain_id);
}

#[test]
fn shared_chain_id_connects_members_without_links() {
    let chain_id = Uuid::new_v4();
    let mut a = quotation("QT-001");
    a.chain_id = Some(chain_id);
    let mut b = invoice("INV-001");
    b.chain_id = Some(chain_id);

    let unrelated = quotation("QT-999");

    let pool = vec![a.clone(), b, unrelated];
    let chain = build_chain(&pool, &a).unwrap();

    assert_eq!(chain.documents.len(), 2);
}

#[test]
fn dangling_forward_link_is_ignored() {
    let mut source = quotation("QT-001");
    source.chain_id = Some(Uuid::new_v4());
    source
        .linked_documents
        .set(DocumentType::Invoice, LinkRef::Linked(Uuid::new_v4()));

    let pool = vec![source.clone()];
    let chain = build_chain(&pool, &source).unwrap();

    assert_eq!(chain.documents.len(), 1);
}

#[test]
fn pending_placeholders_are_not_followed() {
    let mut source = quotation("QT-001");
    source
        .linked_documents
        .set(DocumentType::Invoice, LinkRef::Pending);

    let pool = vec![source.clone()];
    let chain = build_chain(&pool, &source).unwrap();

    assert_eq!(chain.documents.len(), 1);
    assert_eq!(chain.chain_id, None);
}

#[test]
fn lone_document_has_no_chain_id() {
    let doc = quotation("QT-001");
    let chain = build_chain(&[doc.clone()], &doc).unwrap();

    assert_eq!(chain.chain_id, None);
    assert_eq!(chain.documents.len(), 1);
}

#[test]
fn start_document_missing_from_pool_is_still_included() {
    let doc = quotation("QT-001");
    let chain = build_chain(&[], &doc).unwrap();

    assert_eq!(chain.documents.len(), 1);
    assert_eq!(chain.documents[0].id, doc.id);
}

#[test]
#[should_panic(expected = "distinct chain ids")]
fn conflicting_chain_ids_violate_integrity() {
    let mut parent = quotation("QT-001");
    parent.chain_id = Some(Uuid::new_v4());

    let mut child = invoice("INV-001");
    child.chain_id = Some(Uuid::new_v4());
    child.source_document_id = Some(parent.id);

    let pool = vec![parent.clone(), child];
    // Panics under debug assertions; release builds return ChainIntegrity.
    let _ = build_chain(&pool, &parent);
}

#[test]
fn verify_chain_rejects_duplicate_types() {
    let chain_id = Uuid::new_v4();
    let mut first = invoice("INV-001");
    first.chain_id = Some(chain_id);
    let mut second = invoice("INV-002");
    second.chain_id = Some(chain_id);

    let err = verify_chain(&[first, second]).unwrap_err();
    assert!(matches!(err, ChainError::ChainIntegrity(_)));
}

#[test]
fn verify_chain_allows_revisions_alongside_originals() {
    let chain_id = Uuid::new_v4();
    let mut original = invoice("INV-001");
    original.chain_id = Some(chain_id);

    let mut revision = invoice("INV-001-R1");
    revision.chain_id = Some(chain_id);
    revision.is_revision = true;
    revision.revision_number = Some(1);
    revision.original_document_id = Some(original.id);

    verify_chain(&[original, revision]).unwrap();
}
