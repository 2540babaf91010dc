//! Account metadata registry.
//!
//! Holds the chart of accounts shared between the ledger store and the
//! reporting facade. Balances are never stored here; they are derived from
//! the entry history on demand.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use tally_core::ledger::{Account, LedgerError};
use tally_shared::types::AccountId;

/// Thread-safe, shareable account registry.
///
/// Cloning the registry yields a handle to the same underlying account set.
#[derive(Debug, Clone, Default)]
pub struct AccountRegistry {
    accounts: Arc<RwLock<HashMap<AccountId, Account>>>,
}

impl AccountRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or updates an account.
    ///
    /// The account type is immutable after creation: upserting an existing
    /// id with a different type fails with `AccountTypeChangeNotAllowed`,
    /// since changing it would invalidate the sign convention applied to
    /// historical entries.
    pub fn upsert_account(&self, account: Account) -> Result<(), LedgerError> {
        let mut accounts = self
            .accounts
            .write()
            .unwrap_or_else(PoisonError::into_inner);

        if let Some(existing) = accounts.get(&account.id) {
            if existing.account_type != account.account_type {
                return Err(LedgerError::AccountTypeChangeNotAllowed(account.id));
            }
        }
        accounts.insert(account.id, account);
        Ok(())
    }

    /// Finds an account by id.
    pub fn find_account(&self, id: AccountId) -> Result<Account, LedgerError> {
        self.accounts
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&id)
            .cloned()
            .ok_or(LedgerError::AccountNotFound(id))
    }

    /// Returns true if the account exists.
    #[must_use]
    pub fn contains(&self, id: AccountId) -> bool {
        self.accounts
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(&id)
    }

    /// Returns all accounts, ordered by account code.
    #[must_use]
    pub fn list_accounts(&self) -> Vec<Account> {
        let mut accounts: Vec<Account> = self
            .accounts
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .values()
            .cloned()
            .collect();
        accounts.sort_by(|a, b| a.code.cmp(&b.code));
        accounts
    }

    /// Returns all active accounts, ordered by account code.
    #[must_use]
    pub fn list_active_accounts(&self) -> Vec<Account> {
        let mut accounts = self.list_accounts();
        accounts.retain(|a| a.is_active);
        accounts
    }

    /// Marks an account inactive, excluding it from reports.
    pub fn deactivate(&self, id: AccountId) -> Result<(), LedgerError> {
        let mut accounts = self
            .accounts
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        let account = accounts.get_mut(&id).ok_or(LedgerError::AccountNotFound(id))?;
        account.is_active = false;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use tally_core::ledger::AccountType;

    #[test]
    fn test_upsert_and_find() {
        let registry = AccountRegistry::new();
        let account = Account::new("1000", "Cash", AccountType::Asset);
        let id = account.id;
        registry.upsert_account(account).unwrap();

        let found = registry.find_account(id).unwrap();
        assert_eq!(found.code, "1000");
    }

    #[test]
    fn test_find_missing_account() {
        let registry = AccountRegistry::new();
        assert!(matches!(
            registry.find_account(AccountId::new()),
            Err(LedgerError::AccountNotFound(_))
        ));
    }

    #[test]
    fn test_account_type_is_immutable() {
        let registry = AccountRegistry::new();
        let account = Account::new("1000", "Cash", AccountType::Asset);
        let id = account.id;
        registry.upsert_account(account.clone()).unwrap();

        let mut retyped = account.clone();
        retyped.account_type = AccountType::Revenue;
        assert!(matches!(
            registry.upsert_account(retyped),
            Err(LedgerError::AccountTypeChangeNotAllowed(_))
        ));

        // Same-type upserts may still change other fields.
        let mut renamed = account;
        renamed.name = "Petty Cash".to_string();
        renamed.opening_balance = dec!(10);
        registry.upsert_account(renamed).unwrap();
        assert_eq!(registry.find_account(id).unwrap().name, "Petty Cash");
    }

    #[test]
    fn test_active_listing_excludes_deactivated() {
        let registry = AccountRegistry::new();
        let cash = Account::new("1000", "Cash", AccountType::Asset);
        let sales = Account::new("4000", "Sales", AccountType::Revenue);
        let cash_id = cash.id;
        registry.upsert_account(cash).unwrap();
        registry.upsert_account(sales).unwrap();

        registry.deactivate(cash_id).unwrap();
        let active = registry.list_active_accounts();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].code, "4000");
        assert_eq!(registry.list_accounts().len(), 2);
    }

    #[test]
    fn test_listing_sorted_by_code() {
        let registry = AccountRegistry::new();
        for (code, kind) in [
            ("4000", AccountType::Revenue),
            ("1000", AccountType::Asset),
            ("2000", AccountType::Liability),
        ] {
            registry.upsert_account(Account::new(code, code, kind)).unwrap();
        }
        let codes: Vec<String> = registry.list_accounts().into_iter().map(|a| a.code).collect();
        assert_eq!(codes, vec!["1000", "2000", "4000"]);
    }

    #[test]
    fn test_clone_shares_state() {
        let registry = AccountRegistry::new();
        let handle = registry.clone();
        handle
            .upsert_account(Account::new("1000", "Cash", AccountType::Asset))
            .unwrap();
        assert_eq!(registry.list_accounts().len(), 1);
    }
}
