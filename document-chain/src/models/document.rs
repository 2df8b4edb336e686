//! Document model for document-chain.

use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{Installment, LineItem, PartialPayment, PaymentMethod, TaxConfig};

const AUTO_SENTINEL: &str = "auto";
const PENDING_SENTINEL: &str = "pending";

/// Document type. Chain order is fixed: quotation, then invoice, then
/// receipt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentType {
    Quotation,
    Invoice,
    Receipt,
}

impl DocumentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentType::Quotation => "quotation",
            DocumentType::Invoice => "invoice",
            DocumentType::Receipt => "receipt",
        }
    }

    pub fn from_string(s: &str) -> Option<Self> {
        match s {
            "quotation" => Some(DocumentType::Quotation),
            "invoice" => Some(DocumentType::Invoice),
            "receipt" => Some(DocumentType::Receipt),
            _ => None,
        }
    }

    /// Canonical position in a chain view.
    pub fn precedence(&self) -> u8 {
        match self {
            DocumentType::Quotation => 1,
            DocumentType::Invoice => 2,
            DocumentType::Receipt => 3,
        }
    }
}

/// Document status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum DocumentStatus {
    #[default]
    Pending,
    Approved,
    Paid,
    Hold,
    Cancelled,
    Revised,
}

impl DocumentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentStatus::Pending => "pending",
            DocumentStatus::Approved => "approved",
            DocumentStatus::Paid => "paid",
            DocumentStatus::Hold => "hold",
            DocumentStatus::Cancelled => "cancelled",
            DocumentStatus::Revised => "revised",
        }
    }

    pub fn from_string(s: &str) -> Self {
        match s {
            "approved" => DocumentStatus::Approved,
            "paid" => DocumentStatus::Paid,
            "hold" => DocumentStatus::Hold,
            "cancelled" => DocumentStatus::Cancelled,
            "revised" => DocumentStatus::Revised,
            _ => DocumentStatus::Pending,
        }
    }
}

/// Human-facing document number. `Auto` defers assignment to the sequence
/// generator at persist time; on the wire it is the string `"auto"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(from = "String", into = "String")]
pub enum DocumentNumber {
    #[default]
    Auto,
    Assigned(String),
}

impl DocumentNumber {
    pub fn as_assigned(&self) -> Option<&str> {
        match self {
            DocumentNumber::Assigned(number) => Some(number),
            DocumentNumber::Auto => None,
        }
    }

    pub fn is_auto(&self) -> bool {
        matches!(self, DocumentNumber::Auto)
    }
}

impl From<String> for DocumentNumber {
    fn from(s: String) -> Self {
        if s == AUTO_SENTINEL {
            DocumentNumber::Auto
        } else {
            DocumentNumber::Assigned(s)
        }
    }
}

impl From<DocumentNumber> for String {
    fn from(number: DocumentNumber) -> Self {
        match number {
            DocumentNumber::Auto => AUTO_SENTINEL.to_string(),
            DocumentNumber::Assigned(s) => s,
        }
    }
}

impl fmt::Display for DocumentNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocumentNumber::Auto => f.write_str(AUTO_SENTINEL),
            DocumentNumber::Assigned(s) => f.write_str(s),
        }
    }
}

/// Forward reference to a chain child. `Pending` marks a creation flow that
/// was started but not completed; on the wire it is the string `"pending"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum LinkRef {
    Pending,
    Linked(Uuid),
}

impl LinkRef {
    pub fn linked_id(&self) -> Option<Uuid> {
        match self {
            LinkRef::Linked(id) => Some(*id),
            LinkRef::Pending => None,
        }
    }
}

impl TryFrom<String> for LinkRef {
    type Error = uuid::Error;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        if s == PENDING_SENTINEL {
            Ok(LinkRef::Pending)
        } else {
            Ok(LinkRef::Linked(Uuid::parse_str(&s)?))
        }
    }
}

impl From<LinkRef> for String {
    fn from(link: LinkRef) -> Self {
        match link {
            LinkRef::Pending => PENDING_SENTINEL.to_string(),
            LinkRef::Linked(id) => id.to_string(),
        }
    }
}

/// Forward links recorded on a source document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct LinkedDocuments {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub invoice_id: Option<LinkRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub receipt_id: Option<LinkRef>,
}

impl LinkedDocuments {
    /// Forward link for the given child type. Quotations are never linked
    /// children, so that slot does not exist.
    pub fn get(&self, target: DocumentType) -> Option<LinkRef> {
        match target {
            DocumentType::Invoice => self.invoice_id,
            DocumentType::Receipt => self.receipt_id,
            DocumentType::Quotation => None,
        }
    }

    pub fn set(&mut self, target: DocumentType, link: LinkRef) {
        match target {
            DocumentType::Invoice => self.invoice_id = Some(link),
            DocumentType::Receipt => self.receipt_id = Some(link),
            DocumentType::Quotation => {}
        }
    }

    pub fn clear(&mut self, target: DocumentType) {
        match target {
            DocumentType::Invoice => self.invoice_id = None,
            DocumentType::Receipt => self.receipt_id = None,
            DocumentType::Quotation => {}
        }
    }
}

/// Record of a linked child that was created and later deleted. Its
/// presence distinguishes "created then removed" from "never created" when
/// deciding whether a recreation replaces or starts fresh.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeletedLink {
    pub id: Uuid,
    pub document_number: String,
    pub deleted_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct DeletedLinks {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub invoice: Option<DeletedLink>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub receipt: Option<DeletedLink>,
}

impl DeletedLinks {
    pub fn get(&self, target: DocumentType) -> Option<&DeletedLink> {
        match target {
            DocumentType::Invoice => self.invoice.as_ref(),
            DocumentType::Receipt => self.receipt.as_ref(),
            DocumentType::Quotation => None,
        }
    }

    pub fn set(&mut self, target: DocumentType, record: DeletedLink) {
        match target {
            DocumentType::Invoice => self.invoice = Some(record),
            DocumentType::Receipt => self.receipt = Some(record),
            DocumentType::Quotation => {}
        }
    }

    pub fn clear(&mut self, target: DocumentType) {
        match target {
            DocumentType::Invoice => self.invoice = None,
            DocumentType::Receipt => self.receipt = None,
            DocumentType::Quotation => {}
        }
    }
}

/// One quotation, invoice, or receipt in a document chain.
///
/// A single record shape serves all three types; type-specific fields stay
/// `None` where they do not apply (`valid_until` on receipts, say). Stored
/// documents from older deployments deserialize through the same shape,
/// with absent fields taking their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub id: Uuid,
    #[serde(rename = "type")]
    pub doc_type: DocumentType,
    #[serde(default)]
    pub document_number: DocumentNumber,
    #[serde(default)]
    pub status: DocumentStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_id: Option<Uuid>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_name: Option<String>,
    pub currency: String,
    #[serde(default)]
    pub items: Vec<LineItem>,
    #[serde(default)]
    pub tax_config: TaxConfig,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_terms: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub valid_until: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_method: Option<PaymentMethod>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paid_amount: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chain_id: Option<Uuid>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_document_id: Option<Uuid>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_document_number: Option<String>,
    #[serde(default)]
    pub linked_documents: LinkedDocuments,
    #[serde(default)]
    pub deleted_linked_documents: DeletedLinks,
    #[serde(default)]
    pub is_revision: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub revision_number: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_document_id: Option<Uuid>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_document_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub installment: Option<Installment>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub partial_payment: Option<PartialPayment>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub archived_at: Option<DateTime<Utc>>,
    pub created_utc: DateTime<Utc>,
}

impl Document {
    /// Fresh chain-root document with lifecycle defaults applied.
    pub fn new(doc_type: DocumentType, currency: impl Into<String>, created_utc: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            doc_type,
            document_number: DocumentNumber::Auto,
            status: DocumentStatus::Pending,
            customer_id: None,
            customer_name: None,
            currency: currency.into(),
            items: Vec::new(),
            tax_config: TaxConfig::default(),
            payment_terms: None,
            notes: None,
            valid_until: None,
            due_date: None,
            payment_date: None,
            payment_method: None,
            paid_amount: None,
            chain_id: None,
            source_document_id: None,
            source_document_number: None,
            linked_documents: LinkedDocuments::default(),
            deleted_linked_documents: DeletedLinks::default(),
            is_revision: false,
            revision_number: None,
            original_document_id: None,
            original_document_number: None,
            installment: None,
            partial_payment: None,
            archived_at: None,
            created_utc,
        }
    }
}
