//! Input types for transaction creation and update.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tally_shared::types::{AccountId, CostCenterId, UserId};

use super::transaction::{SourceRef, TransactionType};

/// Input for a single entry in a transaction request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntryInput {
    /// The account to post to.
    pub account_id: AccountId,
    /// Debit amount (>= 0).
    #[serde(default)]
    pub debit: Decimal,
    /// Credit amount (>= 0).
    #[serde(default)]
    pub credit: Decimal,
    /// Optional description for this line item.
    pub description: Option<String>,
    /// Localized description, if maintained.
    pub description_localized: Option<String>,
    /// Opaque metadata carried through unmodified.
    pub metadata: Option<serde_json::Value>,
}

impl EntryInput {
    /// Creates a debit entry input.
    #[must_use]
    pub fn debit(account_id: AccountId, amount: Decimal) -> Self {
        Self {
            account_id,
            debit: amount,
            credit: Decimal::ZERO,
            description: None,
            description_localized: None,
            metadata: None,
        }
    }

    /// Creates a credit entry input.
    #[must_use]
    pub fn credit(account_id: AccountId, amount: Decimal) -> Self {
        Self {
            account_id,
            debit: Decimal::ZERO,
            credit: amount,
            description: None,
            description_localized: None,
            metadata: None,
        }
    }
}

/// Input for creating a new transaction.
#[derive(Debug, Clone)]
pub struct CreateTransactionInput {
    /// Transaction description.
    pub description: String,
    /// Localized description, if maintained.
    pub description_localized: Option<String>,
    /// Transaction date.
    pub transaction_date: NaiveDate,
    /// Transaction classification.
    pub transaction_type: TransactionType,
    /// Optional reference number; auto-generated when absent.
    pub reference: Option<String>,
    /// Link to the originating business event, if any.
    pub source: Option<SourceRef>,
    /// Total amount (informational header figure).
    pub total_amount: Decimal,
    /// Currency code; falls back to the configured default.
    pub currency: Option<String>,
    /// Exchange rate; defaults to 1.
    pub exchange_rate: Option<Decimal>,
    /// Cost center this transaction is attributed to, if any.
    pub cost_center: Option<CostCenterId>,
    /// Free-form notes.
    pub notes: Option<String>,
    /// Free-form tags.
    pub tags: Vec<String>,
    /// The entry specifications (must be non-empty).
    pub entries: Vec<EntryInput>,
    /// The user creating the transaction.
    pub created_by: UserId,
}

/// Input for updating an existing transaction.
///
/// The entry set is replaced wholesale (delete-then-recreate), never
/// patched incrementally.
#[derive(Debug, Clone)]
pub struct UpdateTransactionInput {
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
    /// Currency code; falls back to the configured default.
    pub currency: Option<String>,
    /// Exchange rate; defaults to 1.
    pub exchange_rate: Option<Decimal>,
    /// Cost center this transaction is attributed to, if any.
    pub cost_center: Option<CostCenterId>,
    /// Free-form notes.
    pub notes: Option<String>,
    /// Free-form tags.
    pub tags: Vec<String>,
    /// The replacement entry set (must be non-empty).
    pub entries: Vec<EntryInput>,
    /// The user performing the update.
    pub updated_by: UserId,
}

/// Transaction totals computed during validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionTotals {
    /// Total debit amount over the entry set.
    pub debits: Decimal,
    /// Total credit amount over the entry set.
    pub credits: Decimal,
    /// Whether the entry set is balanced (debits == credits).
    pub is_balanced: bool,
}

impl TransactionTotals {
    /// Creates totals from debit and credit sums.
    #[must_use]
    pub fn new(debits: Decimal, credits: Decimal) -> Self {
        Self {
            debits,
            credits,
            is_balanced: debits == credits,
        }
    }

    /// Returns the difference between debits and credits.
    #[must_use]
    pub fn difference(&self) -> Decimal {
        self.debits - self.credits
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_totals_balanced() {
        let totals = TransactionTotals::new(dec!(100.00), dec!(100.00));
        assert!(totals.is_balanced);
        assert_eq!(totals.difference(), Decimal::ZERO);
    }

    #[test]
    fn test_totals_unbalanced() {
        let totals = TransactionTotals::new(dec!(100.00), dec!(50.00));
        assert!(!totals.is_balanced);
        assert_eq!(totals.difference(), dec!(50.00));
    }

    #[test]
    fn test_entry_input_constructors() {
        let account = AccountId::new();
        let debit = EntryInput::debit(account, dec!(75));
        assert_eq!(debit.debit, dec!(75));
        assert_eq!(debit.credit, Decimal::ZERO);

        let credit = EntryInput::credit(account, dec!(75));
        assert_eq!(credit.credit, dec!(75));
        assert_eq!(credit.debit, Decimal::ZERO);
    }
}
