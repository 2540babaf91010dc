//! Reporting facade over the ledger store.
//!
//! Reads the registry and the entry history, derives the balances, and hands
//! the numbers to [`ReportService`] for shaping. Reports never mutate ledger
//! state and run concurrently with other readers.

use chrono::{Datelike, NaiveDate};

use tally_core::ledger::LedgerError;
use tally_core::reports::{
    AccountBalanceView, GeneralLedgerEntry, GeneralLedgerReport, ReportService, TrialBalanceReport,
};
use tally_shared::types::AccountId;

use crate::ledger::{LedgerStore, TransactionFilter};

impl LedgerStore {
    /// Generates a trial balance across all active accounts.
    ///
    /// `as_of` defaults to today. Balances are computed per account as of
    /// that date; zero-balance accounts are suppressed and each remaining
    /// account lands in exactly one column. With every stored transaction
    /// balanced, the debit and credit totals agree.
    ///
    /// # Errors
    ///
    /// `AccountNotFound` if an account disappears from the registry between
    /// listing and balance computation.
    pub fn trial_balance(&self, as_of: Option<NaiveDate>) -> Result<TrialBalanceReport, LedgerError> {
        let as_of = as_of.unwrap_or_else(|| self.clock().today());

        let mut balances = Vec::new();
        for account in self.registry().list_active_accounts() {
            let balance = self.account_balance(account.id, Some(as_of))?;
            balances.push(AccountBalanceView {
                account_id: account.id,
                code: account.code,
                name: account.name,
                account_type: account.account_type,
                balance,
            });
        }

        tracing::debug!(%as_of, accounts = balances.len(), "trial balance generated");
        Ok(ReportService::trial_balance(as_of, balances))
    }

    /// Generates a general ledger for one account over a date window.
    ///
    /// The window defaults to January 1 of the current year through today,
    /// both bounds inclusive. The opening balance is the account's balance
    /// as of the day before the window; each row advances the running
    /// balance per the account type's sign convention. Row descriptions use
    /// the entry's own description, falling back to the transaction's.
    ///
    /// # Errors
    ///
    /// `AccountNotFound` if the account id is unknown.
    pub fn general_ledger(
        &self,
        account_id: AccountId,
        period_start: Option<NaiveDate>,
        period_end: Option<NaiveDate>,
    ) -> Result<GeneralLedgerReport, LedgerError> {
        let account = self.registry().find_account(account_id)?;

        let today = self.clock().today();
        let period_start = period_start
            .or_else(|| NaiveDate::from_ymd_opt(today.year(), 1, 1))
            .unwrap_or(today);
        let period_end = period_end.unwrap_or(today);

        let opening_balance = match period_start.pred_opt() {
            Some(day_before) => self.account_balance(account_id, Some(day_before))?,
            None => account.opening_balance,
        };

        let entries: Vec<GeneralLedgerEntry> = self
            .list_transactions(TransactionFilter::default())
            .into_iter()
            .flat_map(|transaction| {
                let reference = transaction.reference.clone();
                let fallback = transaction.description.clone();
                let date = transaction.transaction_date;
                let transaction_id = transaction.id;
                transaction
                    .entries
                    .into_iter()
                    .filter(|entry| entry.account_id == account_id)
                    .map(move |entry| GeneralLedgerEntry {
                        date,
                        transaction_id,
                        reference: reference.clone(),
                        description: entry.description.unwrap_or_else(|| fallback.clone()),
                        debit: entry.debit,
                        credit: entry.credit,
                    })
                    .collect::<Vec<_>>()
            })
            .collect();

        tracing::debug!(
            %account_id,
            %period_start,
            %period_end,
            rows = entries.len(),
            "general ledger generated"
        );
        Ok(ReportService::general_ledger(
            account.id,
            account.code,
            account.name,
            account.account_type,
            period_start,
            period_end,
            opening_balance,
            entries,
        ))
    }
}
