//! Property-based tests for entry-set validation.

use proptest::prelude::*;
use rust_decimal::Decimal;
use tally_shared::types::{AccountId, EntryId, TransactionId};

use super::entry::TransactionEntry;
use super::error::LedgerError;
use super::validation::validate_entries;

fn make_entry(debit: Decimal, credit: Decimal) -> TransactionEntry {
    TransactionEntry {
        id: EntryId::new(),
        transaction_id: TransactionId::new(),
        account_id: AccountId::new(),
        debit,
        credit,
        description: None,
        description_localized: None,
        metadata: None,
    }
}

/// Strategy for positive amounts with two decimal places.
fn amount_strategy() -> impl Strategy<Value = Decimal> {
    (1i64..1_000_000i64).prop_map(|n| Decimal::new(n, 2))
}

/// Strategy for a balanced entry set: each generated amount produces one
/// debit and one credit line of the same size.
fn balanced_entries_strategy() -> impl Strategy<Value = Vec<TransactionEntry>> {
    prop::collection::vec(amount_strategy(), 1..8).prop_map(|amounts| {
        amounts
            .into_iter()
            .flat_map(|amount| {
                [
                    make_entry(amount, Decimal::ZERO),
                    make_entry(Decimal::ZERO, amount),
                ]
            })
            .collect()
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    /// For any balanced entry set, validation accepts and reports equal
    /// totals.
    #[test]
    fn prop_balanced_sets_are_accepted(entries in balanced_entries_strategy()) {
        let totals = validate_entries(&entries).unwrap();
        prop_assert!(totals.is_balanced);
        prop_assert_eq!(totals.debits, totals.credits);
        prop_assert_eq!(totals.difference(), Decimal::ZERO);
    }

    /// Skewing any single entry of a balanced set by a non-zero delta makes
    /// validation fail with `UnbalancedTransaction`.
    #[test]
    fn prop_skewed_sets_are_rejected(
        mut entries in balanced_entries_strategy(),
        skew in 1i64..10_000i64,
        pick in any::<prop::sample::Index>(),
    ) {
        let index = pick.index(entries.len());
        if entries[index].debit > Decimal::ZERO {
            entries[index].debit += Decimal::new(skew, 2);
        } else {
            entries[index].credit += Decimal::new(skew, 2);
        }

        prop_assert!(
            matches!(
                validate_entries(&entries),
                Err(LedgerError::UnbalancedTransaction { .. })
            ),
            "expected Err(LedgerError::UnbalancedTransaction)"
        );
    }

    /// Validation depends only on aggregate sums: any permutation of a
    /// balanced set validates with identical totals.
    #[test]
    fn prop_validation_is_order_independent(
        entries in balanced_entries_strategy(),
        seed in any::<prop::sample::Index>(),
    ) {
        let totals = validate_entries(&entries).unwrap();

        let mut rotated = entries;
        let split = seed.index(rotated.len());
        rotated.rotate_left(split);

        let rotated_totals = validate_entries(&rotated).unwrap();
        prop_assert_eq!(totals, rotated_totals);
    }

    /// Validated totals always equal the arithmetic sums over the set.
    #[test]
    fn prop_totals_match_entry_sums(entries in balanced_entries_strategy()) {
        let totals = validate_entries(&entries).unwrap();
        let debits: Decimal = entries.iter().map(|e| e.debit).sum();
        let credits: Decimal = entries.iter().map(|e| e.credit).sum();
        prop_assert_eq!(totals.debits, debits);
        prop_assert_eq!(totals.credits, credits);
    }
}
