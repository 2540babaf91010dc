//! Ledger error types for validation and state errors.

use rust_decimal::Decimal;
use tally_shared::types::{AccountId, TransactionId};
use thiserror::Error;

/// Errors that can occur during ledger operations.
#[derive(Debug, Error)]
pub enum LedgerError {
    // ========== Validation Errors ==========
    /// Transaction submitted with zero entries.
    #[error("Transaction must have at least one entry")]
    EmptyEntrySet,

    /// Transaction is not balanced (debits != credits).
    #[error("Transaction is not balanced. Debit: {debits}, Credit: {credits}")]
    UnbalancedTransaction {
        /// Total debit amount over the entry set.
        debits: Decimal,
        /// Total credit amount over the entry set.
        credits: Decimal,
    },

    /// Entry amounts cannot be negative.
    #[error("Entry amounts cannot be negative")]
    NegativeAmount,

    /// Entry must specify either debit or credit, not both.
    #[error("Entry must specify either debit or credit, not both")]
    BothSidesSet,

    // ========== Account Errors ==========
    /// An entry references a nonexistent account.
    #[error("Account not found: {0}")]
    AccountNotFound(AccountId),

    /// Account type cannot be changed once the account exists.
    #[error("Cannot change account type for account {0}")]
    AccountTypeChangeNotAllowed(AccountId),

    // ========== Transaction State Errors ==========
    /// Attempted update or delete on a locked transaction.
    #[error("Transaction {0} is locked and cannot be modified")]
    LockedTransaction(TransactionId),

    /// Transaction not found.
    #[error("Transaction not found: {0}")]
    TransactionNotFound(TransactionId),

    /// Supplied reference number is already in use.
    #[error("Reference number already in use: {0}")]
    DuplicateReference(String),

    // ========== Concurrency Errors ==========
    /// Write-write conflict on cached balances; retry the whole operation.
    #[error("Concurrent modification detected, please retry")]
    ConcurrentModification,
}

impl LedgerError {
    /// Returns the stable error code for this error kind.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::EmptyEntrySet => "EMPTY_ENTRY_SET",
            Self::UnbalancedTransaction { .. } => "UNBALANCED_TRANSACTION",
            Self::NegativeAmount => "NEGATIVE_AMOUNT",
            Self::BothSidesSet => "BOTH_SIDES_SET",
            Self::AccountNotFound(_) => "ACCOUNT_NOT_FOUND",
            Self::AccountTypeChangeNotAllowed(_) => "ACCOUNT_TYPE_CHANGE_NOT_ALLOWED",
            Self::LockedTransaction(_) => "LOCKED_TRANSACTION",
            Self::TransactionNotFound(_) => "TRANSACTION_NOT_FOUND",
            Self::DuplicateReference(_) => "DUPLICATE_REFERENCE",
            Self::ConcurrentModification => "CONCURRENT_MODIFICATION",
        }
    }

    /// Returns true if retrying the whole operation may succeed.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::ConcurrentModification)
    }
}
