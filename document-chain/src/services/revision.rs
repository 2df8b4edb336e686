//! Revision numbering and retraction bookkeeping.
//!
//! Re-issuing a document produces a `-R1`, `-R2`, ... sibling that
//! supersedes the original; retracting the last active revision restores
//! the original's status.

use chain_core::error::ChainError;
use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::info;
use uuid::Uuid;

use crate::models::{
    DeletedLinks, Document, DocumentNumber, DocumentStatus, DocumentType, LinkedDocuments,
};

/// Fallback for documents migrated from older deployments, which carry no
/// `is_revision` flag, only the number suffix.
static REVISION_SUFFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"-R[1-9]\d*$").expect("revision suffix pattern compiles"));

/// Whether `doc` is a revision of another document. The explicit flag is
/// authoritative; the number suffix is only consulted for legacy data.
pub fn is_revision(doc: &Document) -> bool {
    if doc.is_revision || doc.revision_number.is_some_and(|n| n > 0) {
        return true;
    }
    doc.document_number
        .as_assigned()
        .is_some_and(|number| REVISION_SUFFIX.is_match(number))
}

/// Revision index of `number` relative to `base`, if it is one.
///
/// Exact string matching rather than a compiled pattern: document numbers
/// may contain regex metacharacters.
fn revision_index(number: &str, base: &str) -> Option<u32> {
    let suffix = number.strip_prefix(base)?.strip_prefix("-R")?;
    if suffix.is_empty() || suffix.starts_with('0') || !suffix.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    suffix.parse().ok()
}

/// Next free revision number for `base`, given every known document.
pub fn next_revision_number(all: &[Document], base: &str) -> u32 {
    all.iter()
        .filter_map(|doc| doc.document_number.as_assigned())
        .filter_map(|number| revision_index(number, base))
        .max()
        .map_or(1, |n| n + 1)
}

/// Document number carried by revision `n` of `base`.
pub fn revision_document_number(base: &str, n: u32) -> String {
    format!("{base}-R{n}")
}

/// The re-issued sibling plus the superseded original, to be persisted
/// together.
#[derive(Debug, Clone)]
pub struct RevisionOutcome {
    pub revision: Document,
    /// Original clone stamped `revised`.
    pub original: Document,
}

/// Produce the next `-R<N>` revision of `original`.
///
/// Revising a revision numbers against the root document, so `QT-001-R1`
/// re-issued becomes `QT-001-R2`, not `QT-001-R1-R1`.
pub fn create_revision(
    original: &Document,
    all: &[Document],
    now: DateTime<Utc>,
) -> Result<RevisionOutcome, ChainError> {
    let Some(assigned) = original.document_number.as_assigned() else {
        return Err(ChainError::PreconditionNotMet(format!(
            "document {} has no assigned number to revise",
            original.id
        )));
    };

    let root_number = original
        .original_document_number
        .clone()
        .unwrap_or_else(|| assigned.to_string());
    let root_id = original.original_document_id.unwrap_or(original.id);
    let n = next_revision_number(all, &root_number);

    let mut revision = original.clone();
    revision.id = Uuid::new_v4();
    revision.document_number =
        DocumentNumber::Assigned(revision_document_number(&root_number, n));
    revision.status = DocumentStatus::Pending;
    revision.is_revision = true;
    revision.revision_number = Some(n);
    revision.original_document_id = Some(root_id);
    revision.original_document_number = Some(root_number);
    // Children stay linked to the document they were generated from.
    revision.linked_documents = LinkedDocuments::default();
    revision.deleted_linked_documents = DeletedLinks::default();
    revision.archived_at = None;
    revision.created_utc = now;

    let mut superseded = original.clone();
    superseded.status = DocumentStatus::Revised;

    info!(
        original_id = %original.id,
        revision_number = n,
        document_number = %revision.document_number,
        "Revision created"
    );

    Ok(RevisionOutcome {
        revision,
        original: superseded,
    })
}

/// Status restoration when a revision is deleted.
///
/// Returns the status the original should be reset to, or `None` when the
/// original is not `revised` or another revision of it remains active.
pub fn retract_revision(
    revision: &Document,
    original: &Document,
    all: &[Document],
) -> Option<DocumentStatus> {
    if original.status != DocumentStatus::Revised {
        return None;
    }

    let another_remains = all.iter().any(|doc| {
        doc.id != revision.id
            && doc.id != original.id
            && doc.original_document_id == Some(original.id)
    });
    if another_remains {
        return None;
    }

    Some(match original.doc_type {
        DocumentType::Quotation => DocumentStatus::Approved,
        _ => DocumentStatus::Pending,
    })
}
