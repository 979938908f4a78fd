//! Transaction records and their balance semantics
//!
//! Every change to an account is a dated transaction. Amounts are stored
//! non-negative with the sign implied by the kind; `Adjustment` is the one
//! kind whose amount may itself be negative.

use jiff::civil::Date;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The kind of a ledger transaction.
///
/// Serialized kebab-case (`interest-earned`, `rate-change`) to match the
/// persisted wire format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TransactionKind {
    Initial,
    Investment,
    Bonus,
    Adjustment,
    InterestEarned,
    Withdrawal,
    InterestPaid,
    Fee,
    RateChange,
}

impl TransactionKind {
    /// Signed contribution of a transaction of this kind to the running balance.
    pub fn balance_effect(&self, amount: Decimal) -> Decimal {
        match self {
            TransactionKind::Initial
            | TransactionKind::Investment
            | TransactionKind::Bonus
            | TransactionKind::InterestEarned => amount,
            // Adjustment amounts carry their own sign
            TransactionKind::Adjustment => amount,
            TransactionKind::Withdrawal | TransactionKind::InterestPaid | TransactionKind::Fee => {
                -amount
            }
            TransactionKind::RateChange => Decimal::ZERO,
        }
    }

    /// Whether this kind changes the principal base used for subsequent
    /// interest computation. Excludes `RateChange` (balance-neutral) and the
    /// interest kinds themselves (they are recomputation outputs, not triggers).
    pub fn affects_principal(&self) -> bool {
        matches!(
            self,
            TransactionKind::Initial
                | TransactionKind::Investment
                | TransactionKind::Withdrawal
                | TransactionKind::Adjustment
                | TransactionKind::Bonus
                | TransactionKind::Fee
        )
    }

    /// Debit kinds reduce the balance.
    pub fn is_debit(&self) -> bool {
        matches!(
            self,
            TransactionKind::Withdrawal | TransactionKind::InterestPaid | TransactionKind::Fee
        )
    }
}

impl std::fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            TransactionKind::Initial => "initial",
            TransactionKind::Investment => "investment",
            TransactionKind::Bonus => "bonus",
            TransactionKind::Adjustment => "adjustment",
            TransactionKind::InterestEarned => "interest-earned",
            TransactionKind::Withdrawal => "withdrawal",
            TransactionKind::InterestPaid => "interest-paid",
            TransactionKind::Fee => "fee",
            TransactionKind::RateChange => "rate-change",
        };
        write!(f, "{name}")
    }
}

/// Kind-specific payload carried by `RateChange` transactions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RateChangeInfo {
    pub old_rate: Decimal,
    pub new_rate: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

/// A single dated entry in an account's ledger.
///
/// `seq` is the per-account insertion sequence number. The ordering key is
/// always `(date, seq)`: same-day transactions keep their relative insertion
/// order, and the tie-break is explicit rather than an artifact of storage
/// position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub date: Date,
    pub kind: TransactionKind,
    pub amount: Decimal,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<RateChangeInfo>,
    pub seq: u32,
}

impl Transaction {
    /// Signed contribution of this transaction to the running balance.
    pub fn balance_effect(&self) -> Decimal {
        self.kind.balance_effect(self.amount)
    }

    /// Ordering key within a ledger.
    pub fn order_key(&self) -> (Date, u32) {
        (self.date, self.seq)
    }
}
