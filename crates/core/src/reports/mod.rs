//! Financial report generation.
//!
//! Pure, read-only composition of the balance calculator: trial balance and
//! general ledger views. No storage access happens here; callers supply the
//! account balances and entry rows.

pub mod service;
pub mod types;

#[cfg(test)]
mod service_props;

pub use service::ReportService;
pub use types::{
    AccountBalanceView, GeneralLedgerEntry, GeneralLedgerReport, GeneralLedgerRow,
    TrialBalanceReport, TrialBalanceRow, TrialBalanceTotals,
};
