//! Double-entry bookkeeping logic.
//!
//! This module implements the core ledger functionality:
//! - Account model and normal-balance classification
//! - Transaction entries (debits and credits)
//! - Transaction aggregates with lock state
//! - Balance calculations with point-in-time support
//! - Business rule validation (the balance invariant)
//! - Error types for ledger operations

pub mod account;
pub mod balance;
pub mod entry;
pub mod error;
pub mod transaction;
pub mod types;
pub mod validation;

#[cfg(test)]
mod balance_props;
#[cfg(test)]
mod validation_props;

pub use account::{Account, AccountType, NormalBalance};
pub use balance::{account_balance, DatedEntry};
pub use entry::TransactionEntry;
pub use error::LedgerError;
pub use transaction::{SourceKind, SourceRef, Transaction, TransactionType};
pub use types::{CreateTransactionInput, EntryInput, TransactionTotals, UpdateTransactionInput};
pub use validation::validate_entries;
