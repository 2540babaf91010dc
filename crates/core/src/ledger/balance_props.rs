//! Property-based tests for the balance calculator.

use chrono::NaiveDate;
use proptest::prelude::*;
use rust_decimal::Decimal;

use super::account::AccountType;
use super::balance::{account_balance, DatedEntry};

fn day_strategy() -> impl Strategy<Value = NaiveDate> {
    (1u32..=28, 1u32..=12).prop_map(|(day, month)| {
        NaiveDate::from_ymd_opt(2026, month, day).expect("valid generated date")
    })
}

fn entry_strategy() -> impl Strategy<Value = DatedEntry> {
    (day_strategy(), 0i64..100_000i64, 0i64..100_000i64).prop_map(|(date, debit, credit)| {
        DatedEntry {
            date,
            debit: Decimal::new(debit, 2),
            credit: Decimal::new(credit, 2),
        }
    })
}

fn entries_strategy() -> impl Strategy<Value = Vec<DatedEntry>> {
    prop::collection::vec(entry_strategy(), 0..30)
}

fn account_type_strategy() -> impl Strategy<Value = AccountType> {
    prop::sample::select(vec![
        AccountType::Asset,
        AccountType::Liability,
        AccountType::Equity,
        AccountType::Revenue,
        AccountType::Expense,
    ])
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    /// An unbounded balance equals opening plus the signed sum of every
    /// entry, regardless of account type.
    #[test]
    fn prop_unbounded_balance_sums_all_entries(
        account_type in account_type_strategy(),
        opening in -100_000i64..100_000i64,
        entries in entries_strategy(),
    ) {
        let opening = Decimal::new(opening, 2);
        let balance = account_balance(account_type, opening, entries.iter().copied(), None);

        let normal = account_type.normal_balance();
        let expected: Decimal = entries
            .iter()
            .map(|e| normal.balance_change(e.debit, e.credit))
            .sum();
        prop_assert_eq!(balance, opening + expected);
    }

    /// Balance continuity: for d1 < d2, balance(d2) - balance(d1) equals the
    /// signed sum of entries dated in (d1, d2].
    #[test]
    fn prop_balance_continuity(
        account_type in account_type_strategy(),
        opening in -100_000i64..100_000i64,
        entries in entries_strategy(),
        d1 in day_strategy(),
        d2 in day_strategy(),
    ) {
        prop_assume!(d1 < d2);
        let opening = Decimal::new(opening, 2);

        let at_d1 = account_balance(account_type, opening, entries.iter().copied(), Some(d1));
        let at_d2 = account_balance(account_type, opening, entries.iter().copied(), Some(d2));

        let normal = account_type.normal_balance();
        let window: Decimal = entries
            .iter()
            .filter(|e| e.date > d1 && e.date <= d2)
            .map(|e| normal.balance_change(e.debit, e.credit))
            .sum();
        prop_assert_eq!(at_d2 - at_d1, window);
    }

    /// The calculator is pure: the same inputs always produce the same
    /// balance, and input order does not matter.
    #[test]
    fn prop_balance_is_deterministic_and_order_independent(
        account_type in account_type_strategy(),
        entries in entries_strategy(),
        as_of in day_strategy(),
    ) {
        let forward = account_balance(
            account_type,
            Decimal::ZERO,
            entries.iter().copied(),
            Some(as_of),
        );
        let reversed = account_balance(
            account_type,
            Decimal::ZERO,
            entries.iter().rev().copied(),
            Some(as_of),
        );
        prop_assert_eq!(forward, reversed);
    }

    /// Debit-natural and credit-natural balances over the same entries are
    /// mirror images around the opening balance.
    #[test]
    fn prop_normal_balances_are_mirrored(entries in entries_strategy()) {
        let debit_side = account_balance(
            AccountType::Asset,
            Decimal::ZERO,
            entries.iter().copied(),
            None,
        );
        let credit_side = account_balance(
            AccountType::Revenue,
            Decimal::ZERO,
            entries.iter().copied(),
            None,
        );
        prop_assert_eq!(debit_side, -credit_side);
    }
}
