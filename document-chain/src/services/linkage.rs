//! Chain linkage engine: deriving a linked document from a source.
//!
//! Quotation to invoice, invoice to receipt. Preconditions are checked in
//! a fixed order and the first failure wins; no partial state is produced
//! on failure. The engine never writes storage: it returns the child draft
//! together with the updated source clone, and the caller persists both in
//! one atomic write.

use chain_core::error::ChainError;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use tracing::{info, instrument};
use uuid::Uuid;

use crate::models::{Document, DocumentStatus, DocumentType, LinkRef, PaymentMethod};
use crate::services::tax;

/// Result of a successful link creation.
#[derive(Debug, Clone)]
pub struct LinkOutcome {
    /// The new chain member, status `pending`, number `auto`.
    pub draft: Document,
    /// Source clone with the chain id assigned, the forward link set, and
    /// any stale pending placeholder or deleted-child record cleared.
    pub source: Document,
}

/// Create a draft document of `target` type linked from `source`.
#[instrument(skip(source), fields(source_id = %source.id, target = target.as_str()))]
pub fn create_linked_document(
    source: &Document,
    target: DocumentType,
    now: DateTime<Utc>,
) -> Result<LinkOutcome, ChainError> {
    match target {
        DocumentType::Invoice => {
            if source.doc_type != DocumentType::Quotation {
                return Err(ChainError::InvalidWorkflowTransition(format!(
                    "an invoice can only be generated from a quotation, not a {}",
                    source.doc_type.as_str()
                )));
            }
            if matches!(
                source.status,
                DocumentStatus::Cancelled | DocumentStatus::Revised
            ) {
                return Err(ChainError::PreconditionNotMet(format!(
                    "quotation {} is {} and can no longer be invoiced",
                    source.document_number,
                    source.status.as_str()
                )));
            }
        }
        DocumentType::Receipt => {
            if source.doc_type != DocumentType::Invoice {
                return Err(ChainError::InvalidWorkflowTransition(format!(
                    "a receipt can only be generated from an invoice, not a {}",
                    source.doc_type.as_str()
                )));
            }
            if source.status != DocumentStatus::Paid {
                return Err(ChainError::PreconditionNotMet(
                    "invoice must be paid before a receipt can be issued".to_string(),
                ));
            }
        }
        DocumentType::Quotation => {
            return Err(ChainError::InvalidWorkflowTransition(
                "a quotation cannot be generated from another document".to_string(),
            ));
        }
    }

    if let Some(LinkRef::Linked(existing)) = source.linked_documents.get(target) {
        return Err(ChainError::DuplicateLink(format!(
            "{} already has a linked {} ({})",
            source.document_number,
            target.as_str(),
            existing
        )));
    }

    // A stale pending placeholder or a deleted-child record is cleared so a
    // fresh link can take its place.
    let mut source = source.clone();
    source.linked_documents.clear(target);
    source.deleted_linked_documents.clear(target);

    let chain_id = source.chain_id.unwrap_or_else(Uuid::new_v4);
    source.chain_id = Some(chain_id);

    let mut draft = Document::new(target, source.currency.clone(), now);
    draft.chain_id = Some(chain_id);
    draft.source_document_id = Some(source.id);
    draft.source_document_number = source.document_number.as_assigned().map(str::to_string);
    draft.customer_id = source.customer_id;
    draft.customer_name = source.customer_name.clone();
    draft.items = source.items.clone();
    draft.tax_config = source.tax_config;
    draft.payment_terms = source.payment_terms.clone();
    draft.notes = source.notes.clone();
    draft.installment = source.installment;
    draft.partial_payment = source.partial_payment;

    if target == DocumentType::Invoice {
        draft.due_date = source.valid_until;
    } else {
        draft.payment_date = Some(now.date_naive());
        draft.payment_method = Some(PaymentMethod::BankTransfer);
        let owed = match source.installment {
            Some(installment) if installment.remaining_amount > Decimal::ZERO => {
                installment.remaining_amount
            }
            _ => tax::breakdown_for_document(&source)?.total,
        };
        let paid = match source.partial_payment {
            Some(partial) => partial.deduct_from(owed),
            None => owed,
        };
        draft.paid_amount = Some(tax::round_money(paid));
    }

    source.linked_documents.set(target, LinkRef::Linked(draft.id));

    info!(chain_id = %chain_id, draft_id = %draft.id, "Linked document draft created");

    Ok(LinkOutcome { draft, source })
}
