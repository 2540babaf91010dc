//! Account model and normal-balance classification.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tally_shared::types::AccountId;

/// Account classification in the chart of accounts.
///
/// The type is immutable after creation: changing it would invalidate the
/// sign convention applied to the account's historical entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountType {
    /// Resources owned (cash, receivables, equipment).
    Asset,
    /// Obligations owed (payables, loans).
    Liability,
    /// Owner's residual interest.
    Equity,
    /// Income earned.
    Revenue,
    /// Costs incurred.
    Expense,
}

/// Which side a positive balance naturally sits on.
///
/// - Debit-natural (Asset, Expense): balance = opening + debits - credits
/// - Credit-natural (Liability, Equity, Revenue): balance = opening + credits - debits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NormalBalance {
    /// Debit-natural accounts.
    Debit,
    /// Credit-natural accounts.
    Credit,
}

impl AccountType {
    /// Returns the natural balance side for this account type.
    ///
    /// The match is exhaustive over the closed set of account types, so
    /// there is no "unknown type" fallback to mask data errors.
    #[must_use]
    pub const fn normal_balance(self) -> NormalBalance {
        match self {
            Self::Asset | Self::Expense => NormalBalance::Debit,
            Self::Liability | Self::Equity | Self::Revenue => NormalBalance::Credit,
        }
    }

    /// Returns true if a positive balance is reported in the debit column.
    #[must_use]
    pub const fn is_debit_natural(self) -> bool {
        matches!(self.normal_balance(), NormalBalance::Debit)
    }
}

impl NormalBalance {
    /// Calculates the signed balance change an entry contributes.
    #[must_use]
    pub fn balance_change(self, debit: Decimal, credit: Decimal) -> Decimal {
        match self {
            Self::Debit => debit - credit,
            Self::Credit => credit - debit,
        }
    }
}

/// A chart of accounts entry.
///
/// The balance is never stored here: it is derived from the opening balance
/// plus the entry history (see [`super::balance::account_balance`]).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    /// Unique identifier.
    pub id: AccountId,
    /// Account code (e.g. "1000").
    pub code: String,
    /// Display name (e.g. "Cash").
    pub name: String,
    /// Localized display name, if maintained.
    pub name_localized: Option<String>,
    /// Account classification (immutable after creation).
    pub account_type: AccountType,
    /// Balance carried in before any recorded entries.
    pub opening_balance: Decimal,
    /// Inactive accounts are excluded from reports.
    pub is_active: bool,
}

impl Account {
    /// Creates an active account with a zero opening balance.
    #[must_use]
    pub fn new(code: impl Into<String>, name: impl Into<String>, account_type: AccountType) -> Self {
        Self {
            id: AccountId::new(),
            code: code.into(),
            name: name.into(),
            name_localized: None,
            account_type,
            opening_balance: Decimal::ZERO,
            is_active: true,
        }
    }

    /// Sets the opening balance.
    #[must_use]
    pub fn with_opening_balance(mut self, opening_balance: Decimal) -> Self {
        self.opening_balance = opening_balance;
        self
    }
}
