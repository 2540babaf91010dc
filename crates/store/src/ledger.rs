//! Ledger store: atomic transaction persistence with lock enforcement.
//!
//! All writes go through one exclusive lock over the ledger state, and every
//! validation step runs before the first state change, so a failed operation
//! leaves nothing partially persisted. Derived account balances are cached;
//! the cache is only ever touched while the state lock is held (shared for
//! readers, exclusive for writers), which serializes recomputation for an
//! account against concurrent writes without a separate per-account lock.

use std::collections::{BTreeMap, BTreeSet, HashSet};
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::NaiveDate;
use moka::sync::Cache;
use rust_decimal::Decimal;

use tally_core::ledger::{
    account_balance, validate_entries, Account, CreateTransactionInput, DatedEntry, EntryInput,
    LedgerError, Transaction, TransactionEntry, TransactionType, UpdateTransactionInput,
};
use tally_shared::clock::{Clock, SystemClock};
use tally_shared::config::LedgerConfig;
use tally_shared::types::{AccountId, EntryId, TransactionId, UserId};

use crate::audit::{AuditAction, AuditEvent, AuditSink, TracingAuditSink};
use crate::registry::AccountRegistry;

/// Upper bound on cached account balances.
const BALANCE_CACHE_CAPACITY: u64 = 10_000;

/// Filter options for listing transactions.
#[derive(Debug, Clone, Copy, Default)]
pub struct TransactionFilter {
    /// Filter by transaction type.
    pub transaction_type: Option<TransactionType>,
    /// Filter by date range start (inclusive).
    pub date_from: Option<NaiveDate>,
    /// Filter by date range end (inclusive).
    pub date_to: Option<NaiveDate>,
    /// Filter by lock state.
    pub locked: Option<bool>,
}

/// Mutable ledger state guarded by the store's lock.
#[derive(Debug, Default)]
struct LedgerState {
    transactions: BTreeMap<TransactionId, Transaction>,
    references: HashSet<String>,
    reference_seq: u64,
}

/// The ledger store engine.
///
/// Owns transaction persistence and the balance invariant; shares the
/// account registry with callers and reporting.
pub struct LedgerStore {
    registry: AccountRegistry,
    state: RwLock<LedgerState>,
    balance_cache: Cache<AccountId, Decimal>,
    audit: Arc<dyn AuditSink>,
    clock: Arc<dyn Clock>,
    config: LedgerConfig,
}

impl LedgerStore {
    /// Creates a store with explicit collaborators.
    #[must_use]
    pub fn new(
        registry: AccountRegistry,
        audit: Arc<dyn AuditSink>,
        clock: Arc<dyn Clock>,
        config: LedgerConfig,
    ) -> Self {
        Self {
            registry,
            state: RwLock::new(LedgerState::default()),
            balance_cache: Cache::builder().max_capacity(BALANCE_CACHE_CAPACITY).build(),
            audit,
            clock,
            config,
        }
    }

    /// Creates a store with the system clock, tracing audit sink, and
    /// default configuration.
    #[must_use]
    pub fn with_defaults(registry: AccountRegistry) -> Self {
        Self::new(
            registry,
            Arc::new(TracingAuditSink),
            Arc::new(SystemClock),
            LedgerConfig::default(),
        )
    }

    /// Returns the shared account registry.
    #[must_use]
    pub const fn registry(&self) -> &AccountRegistry {
        &self.registry
    }

    /// Returns the injected clock.
    #[must_use]
    pub fn clock(&self) -> &dyn Clock {
        self.clock.as_ref()
    }

    // ========================================================================
    // Write operations
    // ========================================================================

    /// Creates a transaction and its entries as one atomic unit.
    ///
    /// Accounts are resolved before any state change; the balance invariant
    /// is validated over the materialized entries (defaults applied), not
    /// the raw request. On success the cached balances of every touched
    /// account are refreshed and the audit sink is notified with `created`.
    ///
    /// # Errors
    ///
    /// `AccountNotFound`, `DuplicateReference`, `EmptyEntrySet`,
    /// `NegativeAmount`, `BothSidesSet`, or `UnbalancedTransaction`; in every
    /// case nothing is persisted.
    pub fn create_transaction(
        &self,
        input: CreateTransactionInput,
    ) -> Result<Transaction, LedgerError> {
        self.check_accounts_exist(&input.entries)?;

        let mut state = self.write_state();

        let reference = match input.reference {
            Some(reference) => {
                if state.references.contains(&reference) {
                    return Err(LedgerError::DuplicateReference(reference));
                }
                reference
            }
            None => Self::next_reference(&mut state, &self.config),
        };

        let id = TransactionId::new();
        let entries = Self::materialize_entries(id, &input.entries);
        validate_entries(&entries)?;

        let now = self.clock.now();
        let transaction = Transaction {
            id,
            reference: reference.clone(),
            description: input.description,
            description_localized: input.description_localized,
            transaction_date: input.transaction_date,
            transaction_type: input.transaction_type,
            source: input.source,
            total_amount: input.total_amount,
            currency: input
                .currency
                .unwrap_or_else(|| self.config.default_currency.clone()),
            exchange_rate: input.exchange_rate.unwrap_or(Decimal::ONE),
            cost_center: input.cost_center,
            notes: input.notes,
            tags: input.tags,
            is_locked: false,
            created_by: input.created_by,
            created_at: now,
            updated_at: now,
            entries,
        };

        state.references.insert(reference);
        state.transactions.insert(id, transaction.clone());
        self.refresh_balances(&state, &transaction.touched_accounts());
        drop(state);

        tracing::info!(
            transaction_id = %id,
            reference = %transaction.reference,
            "transaction created"
        );
        self.notify(AuditEvent {
            transaction_id: id,
            action: AuditAction::Created,
            actor: transaction.created_by,
            at: now,
            before: None,
            after: Self::snapshot(&transaction),
        });

        Ok(transaction)
    }

    /// Replaces a transaction's mutable fields and its entire entry set.
    ///
    /// The lock state is checked before any mutation. Entries follow
    /// delete-then-recreate semantics: the old set is retired wholesale and
    /// the new one installed with fresh entry ids. Cached balances are
    /// refreshed for the union of old and new accounts, since an account
    /// dropped from the entry set must be recomputed too.
    ///
    /// # Errors
    ///
    /// `TransactionNotFound`, `LockedTransaction`, or any validation error
    /// from [`create_transaction`](Self::create_transaction); the stored
    /// transaction is untouched on failure.
    pub fn update_transaction(
        &self,
        id: TransactionId,
        input: UpdateTransactionInput,
    ) -> Result<Transaction, LedgerError> {
        self.check_accounts_exist(&input.entries)?;

        let mut state = self.write_state();
        let existing = state
            .transactions
            .get(&id)
            .ok_or(LedgerError::TransactionNotFound(id))?;
        if existing.is_locked {
            return Err(LedgerError::LockedTransaction(id));
        }

        let entries = Self::materialize_entries(id, &input.entries);
        validate_entries(&entries)?;

        let before = Self::snapshot(existing);
        let mut touched = existing.touched_accounts();

        let now = self.clock.now();
        let updated = Transaction {
            id,
            reference: existing.reference.clone(),
            description: input.description,
            description_localized: input.description_localized,
            transaction_date: input.transaction_date,
            transaction_type: input.transaction_type,
            source: input.source,
            total_amount: input.total_amount,
            currency: input
                .currency
                .unwrap_or_else(|| self.config.default_currency.clone()),
            exchange_rate: input.exchange_rate.unwrap_or(Decimal::ONE),
            cost_center: input.cost_center,
            notes: input.notes,
            tags: input.tags,
            is_locked: false,
            created_by: existing.created_by,
            created_at: existing.created_at,
            updated_at: now,
            entries,
        };

        touched.extend(updated.touched_accounts());
        state.transactions.insert(id, updated.clone());
        self.refresh_balances(&state, &touched);
        drop(state);

        tracing::info!(transaction_id = %id, "transaction updated");
        self.notify(AuditEvent {
            transaction_id: id,
            action: AuditAction::Updated,
            actor: input.updated_by,
            at: now,
            before,
            after: Self::snapshot(&updated),
        });

        Ok(updated)
    }

    /// Locks a transaction, making it immutable.
    ///
    /// Returns `false` without any state change or audit event if the
    /// transaction was already locked.
    ///
    /// # Errors
    ///
    /// `TransactionNotFound` if the id is unknown.
    pub fn lock_transaction(&self, id: TransactionId, actor: UserId) -> Result<bool, LedgerError> {
        self.transition_lock(id, actor, true)
    }

    /// Unlocks a transaction, making it mutable again.
    ///
    /// Returns `false` without any state change or audit event if the
    /// transaction was already unlocked.
    ///
    /// # Errors
    ///
    /// `TransactionNotFound` if the id is unknown.
    pub fn unlock_transaction(&self, id: TransactionId, actor: UserId) -> Result<bool, LedgerError> {
        self.transition_lock(id, actor, false)
    }

    fn transition_lock(
        &self,
        id: TransactionId,
        actor: UserId,
        lock: bool,
    ) -> Result<bool, LedgerError> {
        let mut state = self.write_state();
        let transaction = state
            .transactions
            .get_mut(&id)
            .ok_or(LedgerError::TransactionNotFound(id))?;

        let changed = if lock {
            transaction.lock()
        } else {
            transaction.unlock()
        };
        if !changed {
            return Ok(false);
        }

        let action = if lock {
            AuditAction::Locked
        } else {
            AuditAction::Unlocked
        };
        let after = Self::snapshot(transaction);
        drop(state);

        tracing::info!(transaction_id = %id, action = action.as_str(), "lock state changed");
        self.notify(AuditEvent {
            transaction_id: id,
            action,
            actor,
            at: self.clock.now(),
            before: None,
            after,
        });

        Ok(true)
    }

    /// Deletes an unlocked transaction and all its entries.
    ///
    /// Balances are derived on read, so deletion triggers no recomputation;
    /// cached balances for the affected accounts are invalidated instead.
    ///
    /// # Errors
    ///
    /// `TransactionNotFound` if the id is unknown, `LockedTransaction` if it
    /// is locked.
    pub fn delete_transaction(&self, id: TransactionId, actor: UserId) -> Result<bool, LedgerError> {
        let mut state = self.write_state();
        match state.transactions.get(&id) {
            None => return Err(LedgerError::TransactionNotFound(id)),
            Some(transaction) if transaction.is_locked => {
                return Err(LedgerError::LockedTransaction(id));
            }
            Some(_) => {}
        }

        let removed = state
            .transactions
            .remove(&id)
            .ok_or(LedgerError::TransactionNotFound(id))?;
        state.references.remove(&removed.reference);
        for account in removed.touched_accounts() {
            self.balance_cache.invalidate(&account);
        }
        drop(state);

        tracing::info!(transaction_id = %id, reference = %removed.reference, "transaction deleted");
        self.notify(AuditEvent {
            transaction_id: id,
            action: AuditAction::Deleted,
            actor,
            at: self.clock.now(),
            before: Self::snapshot(&removed),
            after: None,
        });

        Ok(true)
    }

    // ========================================================================
    // Read operations
    // ========================================================================

    /// Fetches a transaction with its entries.
    pub fn get_transaction(&self, id: TransactionId) -> Result<Transaction, LedgerError> {
        self.read_state()
            .transactions
            .get(&id)
            .cloned()
            .ok_or(LedgerError::TransactionNotFound(id))
    }

    /// Lists transactions matching the filter, newest first.
    #[must_use]
    pub fn list_transactions(&self, filter: TransactionFilter) -> Vec<Transaction> {
        let state = self.read_state();
        let mut transactions: Vec<Transaction> = state
            .transactions
            .values()
            .filter(|t| {
                filter
                    .transaction_type
                    .is_none_or(|kind| t.transaction_type == kind)
                    && filter.date_from.is_none_or(|from| t.transaction_date >= from)
                    && filter.date_to.is_none_or(|to| t.transaction_date <= to)
                    && filter.locked.is_none_or(|locked| t.is_locked == locked)
            })
            .cloned()
            .collect();
        drop(state);

        transactions.sort_by(|a, b| {
            b.transaction_date
                .cmp(&a.transaction_date)
                .then_with(|| b.created_at.cmp(&a.created_at))
        });
        transactions
    }

    /// Computes an account's balance, optionally as of a date (inclusive).
    ///
    /// The unbounded ("current") balance is served from the cache when
    /// possible; point-in-time balances are always recomputed so historical
    /// queries stay reproducible.
    ///
    /// # Errors
    ///
    /// `AccountNotFound` if the account id is unknown.
    pub fn account_balance(
        &self,
        account_id: AccountId,
        as_of: Option<NaiveDate>,
    ) -> Result<Decimal, LedgerError> {
        let account = self.registry.find_account(account_id)?;

        if let Some(bound) = as_of {
            let state = self.read_state();
            return Ok(Self::balance_in_state(&state, &account, Some(bound)));
        }

        if let Some(balance) = self.balance_cache.get(&account_id) {
            return Ok(balance);
        }

        // Compute and install under the shared state lock: a writer needs
        // the exclusive lock to commit, so the cached value cannot go stale
        // between computation and insertion.
        let state = self.read_state();
        let balance = Self::balance_in_state(&state, &account, None);
        self.balance_cache.insert(account_id, balance);
        drop(state);
        Ok(balance)
    }

    // ========================================================================
    // Internals
    // ========================================================================

    fn read_state(&self) -> RwLockReadGuard<'_, LedgerState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_state(&self) -> RwLockWriteGuard<'_, LedgerState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Rejects the operation before any state change if an entry references
    /// a nonexistent account.
    fn check_accounts_exist(&self, entries: &[EntryInput]) -> Result<(), LedgerError> {
        let distinct: BTreeSet<AccountId> = entries.iter().map(|e| e.account_id).collect();
        for account_id in distinct {
            if !self.registry.contains(account_id) {
                return Err(LedgerError::AccountNotFound(account_id));
            }
        }
        Ok(())
    }

    /// Generates the next free reference number from the monotonic sequence.
    fn next_reference(state: &mut LedgerState, config: &LedgerConfig) -> String {
        loop {
            state.reference_seq += 1;
            let reference = format!(
                "{}-{:0width$}",
                config.reference_prefix,
                state.reference_seq,
                width = config.reference_width
            );
            if !state.references.contains(&reference) {
                return reference;
            }
        }
    }

    /// Builds the persisted entry set from the request, assigning fresh ids.
    fn materialize_entries(
        transaction_id: TransactionId,
        inputs: &[EntryInput],
    ) -> Vec<TransactionEntry> {
        inputs
            .iter()
            .map(|input| TransactionEntry {
                id: EntryId::new(),
                transaction_id,
                account_id: input.account_id,
                debit: input.debit,
                credit: input.credit,
                description: input.description.clone(),
                description_localized: input.description_localized.clone(),
                metadata: input.metadata.clone(),
            })
            .collect()
    }

    /// Recomputes and reinstalls cached balances for the given accounts.
    ///
    /// Must be called with the exclusive state lock held.
    fn refresh_balances(&self, state: &LedgerState, accounts: &BTreeSet<AccountId>) {
        for &account_id in accounts {
            self.balance_cache.invalidate(&account_id);
            if let Ok(account) = self.registry.find_account(account_id) {
                let balance = Self::balance_in_state(state, &account, None);
                self.balance_cache.insert(account_id, balance);
            }
        }
    }

    /// Derives an account balance from the entry history in `state`.
    fn balance_in_state(
        state: &LedgerState,
        account: &Account,
        as_of: Option<NaiveDate>,
    ) -> Decimal {
        let entries = state.transactions.values().flat_map(|transaction| {
            transaction
                .entries
                .iter()
                .filter(|entry| entry.account_id == account.id)
                .map(|entry| DatedEntry {
                    date: transaction.transaction_date,
                    debit: entry.debit,
                    credit: entry.credit,
                })
        });
        account_balance(account.account_type, account.opening_balance, entries, as_of)
    }

    fn snapshot(transaction: &Transaction) -> Option<serde_json::Value> {
        match serde_json::to_value(transaction) {
            Ok(value) => Some(value),
            Err(error) => {
                tracing::warn!(%error, "failed to snapshot transaction for audit");
                None
            }
        }
    }

    /// Hands an event to the audit sink. Failures are logged, never
    /// propagated: the mutation is already committed.
    fn notify(&self, event: AuditEvent) {
        if let Err(error) = self.audit.record(event) {
            tracing::warn!(%error, "audit sink rejected event");
        }
    }
}
