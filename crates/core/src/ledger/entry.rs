//! Transaction entry domain types.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tally_shared::types::{AccountId, EntryId, TransactionId};

/// One debit-or-credit line item belonging to exactly one transaction.
///
/// An entry is owned by its transaction: it is created and replaced
/// atomically with it and never updated independently. A well-formed entry
/// has at most one of `debit`/`credit` non-zero; both amounts are always
/// non-negative.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionEntry {
    /// Unique identifier for this entry.
    pub id: EntryId,
    /// The transaction this entry belongs to.
    pub transaction_id: TransactionId,
    /// The account affected by this entry.
    pub account_id: AccountId,
    /// Debit amount (>= 0).
    pub debit: Decimal,
    /// Credit amount (>= 0).
    pub credit: Decimal,
    /// Optional description for this line item.
    pub description: Option<String>,
    /// Localized description, if maintained.
    pub description_localized: Option<String>,
    /// Opaque metadata carried through unmodified.
    pub metadata: Option<serde_json::Value>,
}

impl TransactionEntry {
    /// Returns the signed amount: positive for a net debit, negative for a
    /// net credit.
    #[must_use]
    pub fn signed_amount(&self) -> Decimal {
        self.debit - self.credit
    }
}
