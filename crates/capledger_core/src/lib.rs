//! Investor account ledger engine
//!
//! An event-sourced ledger for private investor accounts. Transactions are
//! immutable dated facts; balances and rates are projections replayed from
//! the log. The engine supports:
//! - Balance replay and point-in-time balances over an ordered transaction list
//! - Flat-quarterly and day-counted interest accrual
//! - Retroactive edits with cascade repricing of all downstream interest
//! - Rate changes as first-class events, with the current rate derived from
//!   the rate-change log rather than stored alongside it
//! - Statement projections: running balances, period summaries, weighted
//!   upcoming-quarter rates
//!
//! All computation uses exact base-10 decimals; amounts are rounded to cents
//! only when a persisted or displayed figure is produced.

#![warn(clippy::all)]

// ============================================================================
// Core modules
// ============================================================================

pub mod date_math;
pub mod error;
pub mod interest;
pub mod ledger;
pub mod mutation;
pub mod recompute;
pub mod statement;

// ============================================================================
// Type definition modules
// ============================================================================

pub mod model;

// ============================================================================
// Test modules
// ============================================================================

#[cfg(test)]
mod tests;

// ============================================================================
// Public re-exports for convenience
// ============================================================================

pub use error::{LedgerError, Result};
pub use model::{
    Account, AccountId, Company, CompanyId, Ledger, RateChangeInfo, Transaction, TransactionKind,
};
