//! Account balance calculations.
//!
//! Balances are a pure derived view: opening balance plus the signed sum of
//! the account's entry history, with the sign convention determined by the
//! account type. Nothing here reads a clock; the `as_of` bound is always
//! explicit, so point-in-time queries are reproducible.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use super::account::AccountType;

/// A debit/credit pair stamped with its transaction date, the minimal input
/// the balance calculator needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DatedEntry {
    /// Date of the owning transaction.
    pub date: NaiveDate,
    /// Debit amount.
    pub debit: Decimal,
    /// Credit amount.
    pub credit: Decimal,
}

/// Computes an account's balance as of a date.
///
/// Entries dated after `as_of` are excluded; `None` means unbounded. The
/// sign convention follows the account type's normal balance:
///
/// - Asset, Expense: `opening + debits - credits`
/// - Liability, Equity, Revenue: `opening + credits - debits`
#[must_use]
pub fn account_balance(
    account_type: AccountType,
    opening_balance: Decimal,
    entries: impl IntoIterator<Item = DatedEntry>,
    as_of: Option<NaiveDate>,
) -> Decimal {
    let mut debits = Decimal::ZERO;
    let mut credits = Decimal::ZERO;

    for entry in entries {
        if as_of.is_some_and(|bound| entry.date > bound) {
            continue;
        }
        debits += entry.debit;
        credits += entry.credit;
    }

    opening_balance + account_type.normal_balance().balance_change(debits, credits)
}
