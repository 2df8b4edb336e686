//! Document number sequencing.

use std::collections::HashMap;

use async_trait::async_trait;
use chain_core::config::NumberingConfig;
use chain_core::error::ChainError;
use tokio::sync::RwLock;

use crate::models::DocumentType;

/// Collaborator contract: hands out the next human-facing number for a
/// document type, and records a number once the document carrying it has
/// been committed.
#[async_trait]
pub trait SequenceNumberGenerator: Send + Sync {
    async fn next_document_number(&self, doc_type: DocumentType) -> Result<String, ChainError>;

    async fn increment_counter(
        &self,
        doc_type: DocumentType,
        assigned: &str,
    ) -> Result<(), ChainError>;
}

/// In-memory sequence with `QT-001`-style formatting.
pub struct MemorySequence {
    numbering: NumberingConfig,
    counters: RwLock<HashMap<DocumentType, u32>>,
}

impl MemorySequence {
    pub fn new(numbering: NumberingConfig) -> Self {
        Self {
            numbering,
            counters: RwLock::new(HashMap::new()),
        }
    }

    fn prefix(&self, doc_type: DocumentType) -> &str {
        match doc_type {
            DocumentType::Quotation => &self.numbering.quotation_prefix,
            DocumentType::Invoice => &self.numbering.invoice_prefix,
            DocumentType::Receipt => &self.numbering.receipt_prefix,
        }
    }

    fn format(&self, doc_type: DocumentType, n: u32) -> String {
        format!(
            "{}-{:0width$}",
            self.prefix(doc_type),
            n,
            width = self.numbering.pad_width
        )
    }
}

impl Default for MemorySequence {
    fn default() -> Self {
        Self::new(NumberingConfig::default())
    }
}

#[async_trait]
impl SequenceNumberGenerator for MemorySequence {
    async fn next_document_number(&self, doc_type: DocumentType) -> Result<String, ChainError> {
        let counters = self.counters.read().await;
        let next = counters.get(&doc_type).copied().unwrap_or(0) + 1;
        Ok(self.format(doc_type, next))
    }

    async fn increment_counter(
        &self,
        doc_type: DocumentType,
        assigned: &str,
    ) -> Result<(), ChainError> {
        let n: u32 = assigned
            .rsplit('-')
            .next()
            .and_then(|suffix| suffix.parse().ok())
            .ok_or_else(|| {
                ChainError::Validation(format!("unparseable document number '{assigned}'"))
            })?;

        let mut counters = self.counters.write().await;
        let counter = counters.entry(doc_type).or_insert(0);
        if n > *counter {
            *counter = n;
        }
        Ok(())
    }
}
