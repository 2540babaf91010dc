//! Core double-entry ledger logic for Tally.
//!
//! This crate contains pure business logic with ZERO web or database
//! dependencies. All domain types, validation rules, and balance
//! calculations live here.
//!
//! # Modules
//!
//! - `ledger` - Double-entry bookkeeping types, validation, and balances
//! - `reports` - Trial balance and general ledger generation

pub mod ledger;
pub mod reports;
