//! Shared types, configuration, and clock abstraction for Tally.
//!
//! This crate provides common building blocks used across all other crates:
//! - Typed IDs for type-safe entity references
//! - Configuration management
//! - An injectable clock for deterministic date-bounded queries

pub mod clock;
pub mod config;
pub mod types;

pub use clock::{Clock, FixedClock, SystemClock};
pub use config::LedgerConfig;
