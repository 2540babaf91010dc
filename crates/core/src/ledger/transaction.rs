//! Transaction aggregate.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use tally_shared::types::{AccountId, CostCenterId, TransactionId, UserId};
use uuid::Uuid;

use super::entry::TransactionEntry;

/// Transaction type classification.
///
/// Categorizes transactions for reporting and filtering purposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionType {
    /// General journal entry.
    Journal,
    /// Sales invoice.
    Invoice,
    /// Vendor bill.
    Bill,
    /// Payment (incoming or outgoing).
    Payment,
    /// Transfer between accounts.
    Transfer,
    /// Adjustment entry.
    Adjustment,
    /// Opening balance entry.
    OpeningBalance,
    /// Reversal of a previous transaction.
    Reversal,
}

/// Kind of business event a transaction originates from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceKind {
    /// Originates from a sales invoice.
    Invoice,
    /// Originates from a vendor bill.
    Bill,
    /// Originates from a recorded payment.
    Payment,
    /// Originates from an inventory stock movement.
    InventoryMovement,
}

/// Tagged link to the business event that produced a transaction.
///
/// Replaces an untyped `source_type`/`source_id` field pair with a closed
/// set of known source kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceRef {
    /// The kind of originating event.
    pub kind: SourceKind,
    /// Identifier of the originating record (owned by the source system).
    pub id: Uuid,
}

/// A financial transaction consisting of balanced entries.
///
/// Lock state machine: `unlocked --lock--> locked`,
/// `locked --unlock--> unlocked`. A transaction is mutable and deletable
/// only while unlocked; deletion is terminal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    /// Unique identifier.
    pub id: TransactionId,
    /// Human-readable reference number (unique, generated if not supplied).
    pub reference: String,
    /// Transaction description.
    pub description: String,
    /// Localized description, if maintained.
    pub description_localized: Option<String>,
    /// Transaction date.
    pub transaction_date: NaiveDate,
    /// Transaction classification.
    pub transaction_type: TransactionType,
    /// Link to the originating business event, if any.
    pub source: Option<SourceRef>,
    /// Total amount (informational header figure).
    pub total_amount: Decimal,
    /// Currency code (ISO 4217).
    pub currency: String,
    /// Exchange rate to the functional currency.
    pub exchange_rate: Decimal,
    /// Cost center this transaction is attributed to, if any.
    pub cost_center: Option<CostCenterId>,
    /// Free-form notes.
    pub notes: Option<String>,
    /// Free-form tags.
    pub tags: Vec<String>,
    /// Locked transactions are immutable for audit purposes.
    pub is_locked: bool,
    /// User who created the transaction.
    pub created_by: UserId,
    /// When the transaction was created.
    pub created_at: DateTime<Utc>,
    /// When the transaction was last updated.
    pub updated_at: DateTime<Utc>,
    /// Owned entries (cascade-deleted with the transaction).
    pub entries: Vec<TransactionEntry>,
}

impl Transaction {
    /// Returns true if the transaction can be modified or deleted.
    #[must_use]
    pub const fn is_editable(&self) -> bool {
        !self.is_locked
    }

    /// Locks the transaction. Returns false (no state change) if it was
    /// already locked.
    pub const fn lock(&mut self) -> bool {
        if self.is_locked {
            return false;
        }
        self.is_locked = true;
        true
    }

    /// Unlocks the transaction. Returns false (no state change) if it was
    /// already unlocked.
    pub const fn unlock(&mut self) -> bool {
        if !self.is_locked {
            return false;
        }
        self.is_locked = false;
        true
    }

    /// Returns the distinct accounts touched by this transaction's entries.
    #[must_use]
    pub fn touched_accounts(&self) -> BTreeSet<AccountId> {
        self.entries.iter().map(|e| e.account_id).collect()
    }
}
