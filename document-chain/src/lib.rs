//! document-chain: chain lifecycle and tax engine for freelancer billing.
//!
//! Quotations become invoices become receipts. This crate owns the rules of
//! that chain: linkage preconditions, traversal, revision numbering,
//! archival and deletion cascades, and the multi-component tax breakdown.
//! Every engine is a synchronous pure function over a document pool held by
//! the caller; persistence happens behind the storage collaborator traits
//! in [`services::store`] and [`services::sequence`].

pub mod models;
pub mod services;

pub use chain_core::error::ChainError;
