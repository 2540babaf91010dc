//! Audit sink boundary.
//!
//! The ledger reports every state transition (create, update, lock, unlock,
//! delete) to an [`AuditSink`]. Delivery is fire-and-forget: a sink failure
//! is logged but never rolls back an otherwise-valid ledger mutation, so the
//! ledger's correctness does not depend on audit delivery.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Mutex;
use tally_shared::types::{TransactionId, UserId};
use thiserror::Error;

/// Kind of ledger state transition being audited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuditAction {
    /// Transaction created.
    Created,
    /// Transaction fields/entries replaced.
    Updated,
    /// Transaction locked.
    Locked,
    /// Transaction unlocked.
    Unlocked,
    /// Transaction deleted.
    Deleted,
}

impl AuditAction {
    /// Returns the action name used in audit records.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Created => "created",
            Self::Updated => "updated",
            Self::Locked => "locked",
            Self::Unlocked => "unlocked",
            Self::Deleted => "deleted",
        }
    }
}

/// One audit notification, keyed to a transaction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditEvent {
    /// The transaction the event concerns.
    pub transaction_id: TransactionId,
    /// What happened.
    pub action: AuditAction,
    /// Who did it (supplied by the caller identity provider).
    pub actor: UserId,
    /// When the mutation was committed.
    pub at: DateTime<Utc>,
    /// Snapshot before the mutation, where one exists.
    pub before: Option<serde_json::Value>,
    /// Snapshot after the mutation, where one exists.
    pub after: Option<serde_json::Value>,
}

/// Errors an audit sink may report.
#[derive(Debug, Error)]
pub enum AuditError {
    /// The sink could not accept the event.
    #[error("Audit sink unavailable: {0}")]
    Unavailable(String),
}

/// Receiver for ledger audit notifications.
///
/// Implementations own their storage; the ledger only hands events over.
pub trait AuditSink: Send + Sync {
    /// Records one audit event.
    fn record(&self, event: AuditEvent) -> Result<(), AuditError>;
}

/// Sink that emits audit events as `tracing` log records.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingAuditSink;

impl AuditSink for TracingAuditSink {
    fn record(&self, event: AuditEvent) -> Result<(), AuditError> {
        tracing::info!(
            transaction_id = %event.transaction_id,
            action = event.action.as_str(),
            actor = %event.actor,
            "ledger audit event"
        );
        Ok(())
    }
}

/// Sink that discards all events.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullAuditSink;

impl AuditSink for NullAuditSink {
    fn record(&self, _event: AuditEvent) -> Result<(), AuditError> {
        Ok(())
    }
}

/// In-memory sink retaining every event, for inspection in tests.
#[derive(Debug, Default)]
pub struct MemoryAuditSink {
    events: Mutex<Vec<AuditEvent>>,
}

impl MemoryAuditSink {
    /// Creates an empty sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of all recorded events, oldest first.
    #[must_use]
    pub fn events(&self) -> Vec<AuditEvent> {
        self.events
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .clone()
    }

    /// Returns the actions recorded so far, oldest first.
    #[must_use]
    pub fn actions(&self) -> Vec<AuditAction> {
        self.events().into_iter().map(|e| e.action).collect()
    }
}

impl AuditSink for MemoryAuditSink {
    fn record(&self, event: AuditEvent) -> Result<(), AuditError> {
        self.events
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .push(event);
        Ok(())
    }
}
