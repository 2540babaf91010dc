//! Report generation service.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use tally_shared::types::AccountId;

use super::types::{
    AccountBalanceView, GeneralLedgerEntry, GeneralLedgerReport, GeneralLedgerRow,
    TrialBalanceReport, TrialBalanceRow, TrialBalanceTotals,
};
use crate::ledger::{AccountType, NormalBalance};

/// Service for generating financial reports.
pub struct ReportService;

impl ReportService {
    /// Generates a trial balance from computed account balances.
    ///
    /// Zero-balance accounts are suppressed. Each remaining account lands in
    /// exactly one column: debit for debit-natural accounts with positive
    /// balance, credit for credit-natural accounts with positive balance.
    /// Rows are ordered by account code.
    #[must_use]
    pub fn trial_balance(as_of: NaiveDate, balances: Vec<AccountBalanceView>) -> TrialBalanceReport {
        let mut rows: Vec<TrialBalanceRow> = balances
            .into_iter()
            .filter(|view| !view.balance.is_zero())
            .map(|view| {
                let positive = view.balance > Decimal::ZERO;
                let (debit_balance, credit_balance) = match view.account_type.normal_balance() {
                    NormalBalance::Debit if positive => (view.balance, Decimal::ZERO),
                    NormalBalance::Credit if positive => (Decimal::ZERO, view.balance),
                    _ => (Decimal::ZERO, Decimal::ZERO),
                };
                TrialBalanceRow {
                    account_code: view.code,
                    account_name: view.name,
                    account_type: view.account_type,
                    debit_balance,
                    credit_balance,
                    balance: view.balance,
                }
            })
            .collect();
        rows.sort_by(|a, b| a.account_code.cmp(&b.account_code));

        let total_debit: Decimal = rows.iter().map(|r| r.debit_balance).sum();
        let total_credit: Decimal = rows.iter().map(|r| r.credit_balance).sum();

        TrialBalanceReport {
            as_of,
            rows,
            totals: TrialBalanceTotals {
                total_debit,
                total_credit,
                is_balanced: total_debit == total_credit,
            },
        }
    }

    /// Generates a general ledger for one account over a date window.
    ///
    /// `opening_balance` must be the account's balance as of the day before
    /// `period_start`. Rows are ordered by transaction date, then by
    /// transaction id so same-day rows come out deterministically. The
    /// running balance is advanced incrementally per row using the account
    /// type's sign convention, never recomputed from scratch.
    #[allow(clippy::too_many_arguments)]
    #[must_use]
    pub fn general_ledger(
        account_id: AccountId,
        account_code: String,
        account_name: String,
        account_type: AccountType,
        period_start: NaiveDate,
        period_end: NaiveDate,
        opening_balance: Decimal,
        mut entries: Vec<GeneralLedgerEntry>,
    ) -> GeneralLedgerReport {
        entries.retain(|e| e.date >= period_start && e.date <= period_end);
        entries.sort_by(|a, b| {
            a.date
                .cmp(&b.date)
                .then_with(|| a.transaction_id.cmp(&b.transaction_id))
        });

        let normal = account_type.normal_balance();
        let mut running = opening_balance;
        let rows: Vec<GeneralLedgerRow> = entries
            .into_iter()
            .map(|e| {
                running += normal.balance_change(e.debit, e.credit);
                GeneralLedgerRow {
                    date: e.date,
                    transaction_id: e.transaction_id,
                    reference: e.reference,
                    description: e.description,
                    debit: e.debit,
                    credit: e.credit,
                    running_balance: running,
                }
            })
            .collect();

        GeneralLedgerReport {
            account_id,
            account_code,
            account_name,
            account_type,
            period_start,
            period_end,
            opening_balance,
            rows,
            closing_balance: running,
        }
    }
}
