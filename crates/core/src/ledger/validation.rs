//! Business rule validation for ledger operations.

use rust_decimal::Decimal;

use super::entry::TransactionEntry;
use super::error::LedgerError;
use super::types::TransactionTotals;

/// Validates a materialized entry set and returns its totals.
///
/// This is run over the entries as they will be persisted (defaults already
/// applied), not over the raw request, so default-value drift cannot slip an
/// unbalanced set past the check. Validation depends only on the aggregate
/// sums, never on entry order.
///
/// Rules:
/// - the set must be non-empty
/// - each entry's amounts must be non-negative
/// - an entry may not carry both a debit and a credit amount
/// - total debits must equal total credits
///
/// # Errors
///
/// Returns the first violated rule as a [`LedgerError`].
pub fn validate_entries(entries: &[TransactionEntry]) -> Result<TransactionTotals, LedgerError> {
    if entries.is_empty() {
        return Err(LedgerError::EmptyEntrySet);
    }

    let mut debits = Decimal::ZERO;
    let mut credits = Decimal::ZERO;

    for entry in entries {
        if entry.debit < Decimal::ZERO || entry.credit < Decimal::ZERO {
            return Err(LedgerError::NegativeAmount);
        }
        if entry.debit > Decimal::ZERO && entry.credit > Decimal::ZERO {
            return Err(LedgerError::BothSidesSet);
        }
        debits += entry.debit;
        credits += entry.credit;
    }

    let totals = TransactionTotals::new(debits, credits);
    if !totals.is_balanced {
        return Err(LedgerError::UnbalancedTransaction { debits, credits });
    }

    Ok(totals)
}
