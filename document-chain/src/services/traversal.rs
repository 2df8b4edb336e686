//! Chain traversal and canonical ordering.

use std::collections::{HashMap, HashSet, VecDeque};

use chain_core::error::ChainError;
use uuid::Uuid;

use crate::models::{Document, DocumentType, LinkRef};
use crate::services::revision;

/// A fully reconstructed chain, canonically ordered.
#[derive(Debug, Clone)]
pub struct DocumentChain {
    /// First chain id found among the members, if any carries one.
    pub chain_id: Option<Uuid>,
    /// Members ordered quotation, invoice, receipt; ties broken by
    /// creation time, then id.
    pub documents: Vec<Document>,
}

/// Reconstruct the chain containing `start` from the supplied pool.
///
/// Follows parent back-references, recorded forward links, reverse source
/// lookups (children whose forward link was never written), and shared
/// chain ids. Revisits are suppressed, so the walk terminates on any
/// acyclic pool. The pool is re-scanned per node rather than indexed,
/// which is fine at single-freelancer scale.
pub fn build_chain(all: &[Document], start: &Document) -> Result<DocumentChain, ChainError> {
    let by_id: HashMap<Uuid, &Document> = all.iter().map(|doc| (doc.id, doc)).collect();

    let mut visited: HashSet<Uuid> = HashSet::new();
    let mut members: Vec<&Document> = Vec::new();
    let mut queue: VecDeque<&Document> = VecDeque::new();

    visited.insert(start.id);
    queue.push_back(start);

    while let Some(doc) = queue.pop_front() {
        members.push(doc);

        let mut neighbors: Vec<&Document> = Vec::new();

        if let Some(parent_id) = doc.source_document_id {
            if let Some(parent) = by_id.get(&parent_id).copied() {
                neighbors.push(parent);
            }
        }
        for link in [
            doc.linked_documents.invoice_id,
            doc.linked_documents.receipt_id,
        ]
        .into_iter()
        .flatten()
        {
            if let LinkRef::Linked(child_id) = link {
                if let Some(child) = by_id.get(&child_id).copied() {
                    neighbors.push(child);
                }
            }
        }
        for other in all {
            if other.source_document_id == Some(doc.id) {
                neighbors.push(other);
            }
        }
        if let Some(chain_id) = doc.chain_id {
            for other in all {
                if other.chain_id == Some(chain_id) {
                    neighbors.push(other);
                }
            }
        }

        for next in neighbors {
            if visited.insert(next.id) {
                queue.push_back(next);
            }
        }
    }

    let mut chain_ids: Vec<Uuid> = members.iter().filter_map(|doc| doc.chain_id).collect();
    chain_ids.sort_unstable();
    chain_ids.dedup();
    if chain_ids.len() > 1 {
        debug_assert!(
            false,
            "documents in one chain carry distinct chain ids: {:?}",
            chain_ids
        );
        return Err(ChainError::ChainIntegrity(format!(
            "traversal from {} reached {} distinct chain ids",
            start.id,
            chain_ids.len()
        )));
    }

    let mut documents: Vec<Document> = members.into_iter().cloned().collect();
    documents.sort_by(|a, b| {
        a.doc_type
            .precedence()
            .cmp(&b.doc_type.precedence())
            .then_with(|| a.created_utc.cmp(&b.created_utc))
            .then_with(|| a.id.cmp(&b.id))
    });

    let chain_id = documents.iter().find_map(|doc| doc.chain_id);

    Ok(DocumentChain { chain_id, documents })
}

/// Chain-uniqueness invariant: within one chain, at most one non-revision
/// document of each type.
pub fn verify_chain(documents: &[Document]) -> Result<(), ChainError> {
    let mut seen: HashMap<(Uuid, DocumentType), Uuid> = HashMap::new();
    for doc in documents {
        let Some(chain_id) = doc.chain_id else {
            continue;
        };
        if revision::is_revision(doc) {
            continue;
        }
        if let Some(existing) = seen.insert((chain_id, doc.doc_type), doc.id) {
            return Err(ChainError::ChainIntegrity(format!(
                "chain {} holds two non-revision {}s ({} and {})",
                chain_id,
                doc.doc_type.as_str(),
                existing,
                doc.id
            )));
        }
    }
    Ok(())
}
