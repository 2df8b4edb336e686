//! Archival and deletion lifecycle.
//!
//! Deleting a chain member must not leave the chain pointing at a removed
//! id: the source's forward link moves into its deleted-children record,
//! and deleting the last revision of a document restores the original's
//! status. The functions here compute those cascades; the caller applies
//! them to storage together with the removal itself.

use chrono::{DateTime, Utc};
use tracing::{info, warn};
use uuid::Uuid;

use crate::models::{DeletedLink, Document};
use crate::services::revision;

/// Cross-reference updates required by one document deletion.
#[derive(Debug, Clone, Default)]
pub struct DeletionCascade {
    /// Source clone with its forward link moved into the deleted record.
    pub source_update: Option<Document>,
    /// Original clone with its status restored after revision retraction.
    pub original_update: Option<Document>,
}

/// Cascade updates for deleting `id` from the pool.
///
/// Deleting an id that is no longer present is a no-op, so replaying a
/// delete never fails.
pub fn delete_document(id: Uuid, all: &[Document], now: DateTime<Utc>) -> DeletionCascade {
    let Some(doc) = all.iter().find(|d| d.id == id) else {
        return DeletionCascade::default();
    };

    let mut cascade = DeletionCascade::default();

    if doc.chain_id.is_some() {
        if let Some(source_id) = doc.source_document_id {
            match all.iter().find(|d| d.id == source_id) {
                Some(source) => {
                    let mut source = source.clone();
                    source.linked_documents.clear(doc.doc_type);
                    source.deleted_linked_documents.set(
                        doc.doc_type,
                        DeletedLink {
                            id: doc.id,
                            document_number: doc.document_number.to_string(),
                            deleted_at: now,
                        },
                    );
                    cascade.source_update = Some(source);
                }
                None => {
                    warn!(
                        document_id = %doc.id,
                        source_id = %source_id,
                        "Source document missing, skipping link cleanup"
                    );
                }
            }
        }
    }

    if revision::is_revision(doc) {
        if let Some(original_id) = doc.original_document_id {
            if let Some(original) = all.iter().find(|d| d.id == original_id) {
                if let Some(status) = revision::retract_revision(doc, original, all) {
                    let mut original = original.clone();
                    original.status = status;
                    cascade.original_update = Some(original);
                }
            }
        }
    }

    info!(document_id = %doc.id, "Deletion cascade prepared");
    cascade
}

/// Stamp every unarchived member of `chain_id`, returning the updated
/// clones for the caller to persist. Archived documents drop out of
/// active-document queries but remain deletable via [`delete_chain`].
pub fn archive_chain(chain_id: Uuid, all: &[Document], now: DateTime<Utc>) -> Vec<Document> {
    let mut archived = Vec::new();
    for doc in all {
        if doc.chain_id == Some(chain_id) && doc.archived_at.is_none() {
            let mut doc = doc.clone();
            doc.archived_at = Some(now);
            archived.push(doc);
        }
    }
    info!(chain_id = %chain_id, count = archived.len(), "Chain archived");
    archived
}

/// Result of a whole-chain deletion.
#[derive(Debug, Clone, Default)]
pub struct ChainDeletion {
    pub deleted_ids: Vec<Uuid>,
    /// Surviving documents updated by a member's cascade.
    pub updates: Vec<Document>,
}

/// Delete every member of `chain_id` through the single-document delete
/// path, applying each cascade against the shrinking pool.
pub fn delete_chain(chain_id: Uuid, all: &[Document], now: DateTime<Utc>) -> ChainDeletion {
    let mut pool: Vec<Document> = all.to_vec();
    let member_ids: Vec<Uuid> = pool
        .iter()
        .filter(|doc| doc.chain_id == Some(chain_id))
        .map(|doc| doc.id)
        .collect();

    let mut deletion = ChainDeletion::default();
    for id in member_ids {
        let cascade = delete_document(id, &pool, now);
        for update in [cascade.source_update, cascade.original_update]
            .into_iter()
            .flatten()
        {
            if let Some(slot) = pool.iter_mut().find(|doc| doc.id == update.id) {
                *slot = update;
            }
        }
        pool.retain(|doc| doc.id != id);
        deletion.deleted_ids.push(id);
    }

    deletion.updates = pool
        .into_iter()
        .filter(|survivor| {
            all.iter()
                .any(|original| original.id == survivor.id && original != survivor)
        })
        .collect();

    info!(
        chain_id = %chain_id,
        count = deletion.deleted_ids.len(),
        "Chain deleted"
    );
    deletion
}
