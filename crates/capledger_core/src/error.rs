use std::fmt;

/// Errors surfaced by the ledger engine.
///
/// Every engine function either returns a value or signals one of these kinds
/// without partially mutating the account it was given.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LedgerError {
    /// Non-numeric, non-positive where a positive value is required, or a
    /// withdrawal exceeding the available balance.
    InvalidAmount(String),
    /// Unparseable date or unsupported calendar value.
    InvalidDate(String),
    /// The operation would break a ledger invariant, e.g. removing the sole
    /// initial transaction.
    InvariantViolation(String),
    /// Referenced account or transaction index does not exist.
    NotFound(String),
}

impl fmt::Display for LedgerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LedgerError::InvalidAmount(msg) => write!(f, "invalid amount: {msg}"),
            LedgerError::InvalidDate(msg) => write!(f, "invalid date: {msg}"),
            LedgerError::InvariantViolation(msg) => write!(f, "invariant violation: {msg}"),
            LedgerError::NotFound(msg) => write!(f, "not found: {msg}"),
        }
    }
}

impl std::error::Error for LedgerError {}

pub type Result<T> = std::result::Result<T, LedgerError>;
