//! Thread-safe ledger store engine for Tally.
//!
//! This crate owns the mutable side of the ledger: it persists transactions
//! and their entries, enforces the balance invariant and lock state on every
//! write, keeps a cache of derived account balances, and notifies an audit
//! sink about every state transition.
//!
//! Writes are atomic: validation runs before any state is touched, so a
//! failed create/update/delete leaves nothing partially persisted. Reads
//! (balance queries, reports) run concurrently with each other.
//!
//! # Modules
//!
//! - `registry` - Account metadata registry
//! - `ledger` - Transaction create/update/lock/unlock/delete
//! - `reporting` - Trial balance and general ledger facade
//! - `audit` - Audit sink trait and bundled implementations

pub mod audit;
pub mod ledger;
pub mod registry;
pub mod reporting;


pub use audit::{AuditAction, AuditError, AuditEvent, AuditSink, MemoryAuditSink, NullAuditSink, TracingAuditSink};
pub use ledger::{LedgerStore, TransactionFilter};
pub use registry::AccountRegistry;
