//! Document storage: the collaborator contract plus an in-memory
//! reference implementation.
//!
//! The engines are pure; somebody has to hold the pool and apply their
//! results atomically. [`MemoryStore`] does that behind one lock, which is
//! enough for single-user deployments. A production store must provide
//! the same guarantee transactionally: the duplicate-link precondition is
//! re-checked on locked state here so two concurrent link attempts on one
//! source cannot both commit.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chain_core::error::ChainError;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use tracing::{info, instrument};
use uuid::Uuid;

use crate::models::{Document, DocumentNumber, DocumentType};
use crate::services::archive::{self, ChainDeletion};
use crate::services::linkage;
use crate::services::revision;
use crate::services::sequence::{MemorySequence, SequenceNumberGenerator};

/// Storage collaborator contract the engines are written against.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    async fn get_all(&self) -> Result<Vec<Document>, ChainError>;
    async fn get_by_id(&self, id: Uuid) -> Result<Option<Document>, ChainError>;
    async fn create(&self, doc: Document) -> Result<(), ChainError>;
    async fn update(&self, doc: Document) -> Result<(), ChainError>;
    async fn delete(&self, id: Uuid) -> Result<bool, ChainError>;
}

/// Single-process store backed by a `HashMap` behind one lock.
pub struct MemoryStore {
    documents: RwLock<HashMap<Uuid, Document>>,
    sequence: Arc<dyn SequenceNumberGenerator>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::with_sequence(Arc::new(MemorySequence::default()))
    }

    pub fn with_sequence(sequence: Arc<dyn SequenceNumberGenerator>) -> Self {
        Self {
            documents: RwLock::new(HashMap::new()),
            sequence,
        }
    }

    /// Documents not excluded by archival.
    pub async fn get_active(&self) -> Result<Vec<Document>, ChainError> {
        Ok(self
            .documents
            .read()
            .await
            .values()
            .filter(|doc| doc.archived_at.is_none())
            .cloned()
            .collect())
    }

    /// Create, number, and persist a child document linked from
    /// `source_id`.
    ///
    /// The linkage preconditions run on the locked state and the resulting
    /// writes land under the same guard, so two concurrent calls for the
    /// same source cannot both succeed.
    #[instrument(skip(self))]
    pub async fn link_child(
        &self,
        source_id: Uuid,
        target: DocumentType,
        now: DateTime<Utc>,
    ) -> Result<Document, ChainError> {
        let mut documents = self.documents.write().await;
        let source = documents
            .get(&source_id)
            .ok_or(ChainError::DocumentNotFound(source_id))?;

        let mut outcome = linkage::create_linked_document(source, target, now)?;

        if outcome.draft.document_number.is_auto() {
            let number = self.sequence.next_document_number(target).await?;
            self.sequence.increment_counter(target, &number).await?;
            outcome.draft.document_number = DocumentNumber::Assigned(number);
        }

        documents.insert(outcome.source.id, outcome.source);
        let draft = outcome.draft;
        documents.insert(draft.id, draft.clone());

        info!(draft_id = %draft.id, document_number = %draft.document_number, "Linked document persisted");
        Ok(draft)
    }

    /// Delete `id` and apply its cross-reference cascade atomically.
    /// Returns false when the document was already gone.
    #[instrument(skip(self))]
    pub async fn delete_cascading(&self, id: Uuid, now: DateTime<Utc>) -> Result<bool, ChainError> {
        let mut documents = self.documents.write().await;
        let pool: Vec<Document> = documents.values().cloned().collect();

        let cascade = archive::delete_document(id, &pool, now);
        let existed = documents.remove(&id).is_some();
        for update in [cascade.source_update, cascade.original_update]
            .into_iter()
            .flatten()
        {
            documents.insert(update.id, update);
        }
        Ok(existed)
    }

    /// Archive every member of `chain_id`; returns the archived ids.
    #[instrument(skip(self))]
    pub async fn archive_chain(
        &self,
        chain_id: Uuid,
        now: DateTime<Utc>,
    ) -> Result<Vec<Uuid>, ChainError> {
        let mut documents = self.documents.write().await;
        let pool: Vec<Document> = documents.values().cloned().collect();

        let archived = archive::archive_chain(chain_id, &pool, now);
        let ids = archived.iter().map(|doc| doc.id).collect();
        for doc in archived {
            documents.insert(doc.id, doc);
        }
        Ok(ids)
    }

    /// Delete every member of `chain_id` with per-member cascades.
    #[instrument(skip(self))]
    pub async fn delete_chain(
        &self,
        chain_id: Uuid,
        now: DateTime<Utc>,
    ) -> Result<ChainDeletion, ChainError> {
        let mut documents = self.documents.write().await;
        let pool: Vec<Document> = documents.values().cloned().collect();

        let deletion = archive::delete_chain(chain_id, &pool, now);
        for id in &deletion.deleted_ids {
            documents.remove(id);
        }
        for update in &deletion.updates {
            documents.insert(update.id, update.clone());
        }
        Ok(deletion)
    }

    /// Re-issue `original_id` as its next revision, persisting the
    /// revision and the superseded original together.
    #[instrument(skip(self))]
    pub async fn create_revision(
        &self,
        original_id: Uuid,
        now: DateTime<Utc>,
    ) -> Result<Document, ChainError> {
        let mut documents = self.documents.write().await;
        let pool: Vec<Document> = documents.values().cloned().collect();
        let original = documents
            .get(&original_id)
            .ok_or(ChainError::DocumentNotFound(original_id))?;

        let outcome = revision::create_revision(original, &pool, now)?;
        documents.insert(outcome.original.id, outcome.original);
        let created = outcome.revision;
        documents.insert(created.id, created.clone());
        Ok(created)
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn get_all(&self) -> Result<Vec<Document>, ChainError> {
        Ok(self.documents.read().await.values().cloned().collect())
    }

    async fn get_by_id(&self, id: Uuid) -> Result<Option<Document>, ChainError> {
        Ok(self.documents.read().await.get(&id).cloned())
    }

    async fn create(&self, doc: Document) -> Result<(), ChainError> {
        let mut documents = self.documents.write().await;
        if documents.contains_key(&doc.id) {
            return Err(ChainError::Conflict(format!(
                "document {} already exists",
                doc.id
            )));
        }
        documents.insert(doc.id, doc);
        Ok(())
    }

    async fn update(&self, doc: Document) -> Result<(), ChainError> {
        let mut documents = self.documents.write().await;
        if !documents.contains_key(&doc.id) {
            return Err(ChainError::DocumentNotFound(doc.id));
        }
        documents.insert(doc.id, doc);
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<bool, ChainError> {
        Ok(self.documents.write().await.remove(&id).is_some())
    }
}
