//! Property-based tests for report generation.

use chrono::NaiveDate;
use proptest::prelude::*;
use rust_decimal::Decimal;
use tally_shared::types::{AccountId, TransactionId};

use super::service::ReportService;
use super::types::{AccountBalanceView, GeneralLedgerEntry};
use crate::ledger::{account_balance, AccountType, DatedEntry};

const DEBIT_TYPES: [AccountType; 2] = [AccountType::Asset, AccountType::Expense];
const CREDIT_TYPES: [AccountType; 3] = [
    AccountType::Liability,
    AccountType::Equity,
    AccountType::Revenue,
];

fn day_strategy() -> impl Strategy<Value = NaiveDate> {
    (1u32..=28, 1u32..=12).prop_map(|(day, month)| {
        NaiveDate::from_ymd_opt(2026, month, day).expect("valid generated date")
    })
}

/// A posting debits one debit-natural account and credits one credit-natural
/// account by the same amount, so every generated history consists purely of
/// balanced transactions with all accounts on their natural side.
fn postings_strategy() -> impl Strategy<Value = Vec<(usize, usize, Decimal, NaiveDate)>> {
    prop::collection::vec(
        (0usize..2, 0usize..3, 1i64..100_000i64, day_strategy()).prop_map(
            |(debit_account, credit_account, amount, date)| {
                (debit_account, credit_account, Decimal::new(amount, 2), date)
            },
        ),
        1..25,
    )
}

fn view(code: &str, account_type: AccountType, balance: Decimal) -> AccountBalanceView {
    AccountBalanceView {
        account_id: AccountId::new(),
        code: code.to_string(),
        name: code.to_string(),
        account_type,
        balance,
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    /// Trial balance zero-sum: for any history of balanced postings, at any
    /// as-of date, the debit and credit column totals agree.
    #[test]
    fn prop_trial_balance_zero_sum(
        postings in postings_strategy(),
        as_of in day_strategy(),
    ) {
        let mut debit_entries: [Vec<DatedEntry>; 2] = Default::default();
        let mut credit_entries: [Vec<DatedEntry>; 3] = Default::default();
        for (debit_account, credit_account, amount, date) in postings {
            debit_entries[debit_account].push(DatedEntry {
                date,
                debit: amount,
                credit: Decimal::ZERO,
            });
            credit_entries[credit_account].push(DatedEntry {
                date,
                debit: Decimal::ZERO,
                credit: amount,
            });
        }

        let mut views = Vec::new();
        for (i, account_type) in DEBIT_TYPES.into_iter().enumerate() {
            let balance = account_balance(
                account_type,
                Decimal::ZERO,
                debit_entries[i].iter().copied(),
                Some(as_of),
            );
            views.push(view(&format!("1{i}00"), account_type, balance));
        }
        for (i, account_type) in CREDIT_TYPES.into_iter().enumerate() {
            let balance = account_balance(
                account_type,
                Decimal::ZERO,
                credit_entries[i].iter().copied(),
                Some(as_of),
            );
            views.push(view(&format!("2{i}00"), account_type, balance));
        }

        let report = ReportService::trial_balance(as_of, views);
        prop_assert_eq!(report.totals.total_debit, report.totals.total_credit);
        prop_assert!(report.totals.is_balanced);
    }

    /// The general ledger's closing balance equals the balance calculator's
    /// answer for the window end date.
    #[test]
    fn prop_general_ledger_closing_matches_balance(
        postings in postings_strategy(),
        end in day_strategy(),
    ) {
        let mut dated = Vec::new();
        let mut rows = Vec::new();
        for (debit_account, _, amount, date) in postings {
            if debit_account != 0 {
                continue;
            }
            dated.push(DatedEntry {
                date,
                debit: amount,
                credit: Decimal::ZERO,
            });
            rows.push(GeneralLedgerEntry {
                date,
                transaction_id: TransactionId::new(),
                reference: "TXN-000001".to_string(),
                description: "posting".to_string(),
                debit: amount,
                credit: Decimal::ZERO,
            });
        }

        let start = NaiveDate::from_ymd_opt(2026, 1, 1).expect("valid date");
        let report = ReportService::general_ledger(
            AccountId::new(),
            "1000".to_string(),
            "Cash".to_string(),
            AccountType::Asset,
            start,
            end,
            Decimal::ZERO,
            rows,
        );

        let expected = account_balance(
            AccountType::Asset,
            Decimal::ZERO,
            dated.iter().copied(),
            Some(end),
        );
        prop_assert_eq!(report.closing_balance, expected);
    }
}
