//! Report data types.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tally_shared::types::{AccountId, TransactionId};

use crate::ledger::AccountType;

/// A computed account balance, the input to trial balance generation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountBalanceView {
    /// Account ID.
    pub account_id: AccountId,
    /// Account code.
    pub code: String,
    /// Account name.
    pub name: String,
    /// Account classification.
    pub account_type: AccountType,
    /// Signed balance per the account type's sign convention.
    pub balance: Decimal,
}

/// One row of a trial balance.
///
/// Each account appears in exactly one of the two columns: the debit column
/// for debit-natural accounts with a positive balance, the credit column for
/// credit-natural accounts with a positive balance; otherwise both columns
/// are zero and only the signed `balance` carries the figure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrialBalanceRow {
    /// Account code.
    pub account_code: String,
    /// Account name.
    pub account_name: String,
    /// Account classification.
    pub account_type: AccountType,
    /// Debit column figure.
    pub debit_balance: Decimal,
    /// Credit column figure.
    pub credit_balance: Decimal,
    /// Signed balance per the account type's sign convention.
    pub balance: Decimal,
}

/// Trial balance totals.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrialBalanceTotals {
    /// Sum of the debit column.
    pub total_debit: Decimal,
    /// Sum of the credit column.
    pub total_credit: Decimal,
    /// Whether debits equal credits.
    pub is_balanced: bool,
}

/// Trial balance report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrialBalanceReport {
    /// As-of date.
    pub as_of: NaiveDate,
    /// Rows, one per active account with a non-zero balance, ordered by
    /// account code.
    pub rows: Vec<TrialBalanceRow>,
    /// Column totals.
    pub totals: TrialBalanceTotals,
}

/// One entry row supplied to general ledger generation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralLedgerEntry {
    /// Date of the owning transaction.
    pub date: NaiveDate,
    /// Owning transaction ID (ordering tie-break for same-day rows).
    pub transaction_id: TransactionId,
    /// Transaction reference number.
    pub reference: String,
    /// Row description (entry description, falling back to the
    /// transaction's).
    pub description: String,
    /// Debit amount.
    pub debit: Decimal,
    /// Credit amount.
    pub credit: Decimal,
}

/// One row of a general ledger, with the running balance after the row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralLedgerRow {
    /// Transaction date.
    pub date: NaiveDate,
    /// Owning transaction ID.
    pub transaction_id: TransactionId,
    /// Transaction reference number.
    pub reference: String,
    /// Row description.
    pub description: String,
    /// Debit amount.
    pub debit: Decimal,
    /// Credit amount.
    pub credit: Decimal,
    /// Balance after applying this row.
    pub running_balance: Decimal,
}

/// General ledger report for one account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralLedgerReport {
    /// Account ID.
    pub account_id: AccountId,
    /// Account code.
    pub account_code: String,
    /// Account name.
    pub account_name: String,
    /// Account classification.
    pub account_type: AccountType,
    /// Window start (inclusive).
    pub period_start: NaiveDate,
    /// Window end (inclusive).
    pub period_end: NaiveDate,
    /// Balance as of the day before `period_start`.
    pub opening_balance: Decimal,
    /// Chronological rows with running balances.
    pub rows: Vec<GeneralLedgerRow>,
    /// Running balance after the last row (equals `opening_balance` when
    /// the window has no rows).
    pub closing_balance: Decimal,
}
