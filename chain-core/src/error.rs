use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum ChainError {
    #[error("Invalid workflow transition: {0}")]
    InvalidWorkflowTransition(String),

    #[error("Precondition not met: {0}")]
    PreconditionNotMet(String),

    #[error("Duplicate link: {0}")]
    DuplicateLink(String),

    #[error("Invalid tax configuration: {0}")]
    InvalidTaxConfiguration(String),

    #[error("Document not found: {0}")]
    DocumentNotFound(Uuid),

    #[error("Chain integrity violation: {0}")]
    ChainIntegrity(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Storage error: {0}")]
    Storage(anyhow::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),
}
