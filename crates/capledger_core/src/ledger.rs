//! Balance replay: pure folds over an ordered transaction list
//!
//! The balance of an account is always the left fold of its transaction
//! effects from zero. Nothing here rounds mid-computation; amounts are
//! rounded to cents only when a persisted or displayed figure is produced.

use jiff::civil::Date;
use rust_decimal::{Decimal, RoundingStrategy};

use crate::model::{Transaction, TransactionKind};

/// Replay every transaction in order and return the final balance.
pub fn balance(transactions: &[Transaction]) -> Decimal {
    transactions
        .iter()
        .fold(Decimal::ZERO, |acc, tx| acc + tx.balance_effect())
}

/// Balance considering only transactions dated before `cutoff`
/// (or on `cutoff` too, when `inclusive`).
pub fn balance_at(transactions: &[Transaction], cutoff: Date, inclusive: bool) -> Decimal {
    transactions
        .iter()
        .filter(|tx| {
            if inclusive {
                tx.date <= cutoff
            } else {
                tx.date < cutoff
            }
        })
        .fold(Decimal::ZERO, |acc, tx| acc + tx.balance_effect())
}

/// Balance immediately before the transaction at `position`, honoring the
/// full `(date, seq)` order: same-day entries ordered earlier count.
pub fn balance_before_position(transactions: &[Transaction], position: usize) -> Decimal {
    balance(&transactions[..position])
}

/// Annual rate (percent) in effect on `date`: the newest `RateChange` dated
/// on or before `date`, falling back to the account's base rate.
pub fn rate_as_of(transactions: &[Transaction], base_rate: Decimal, date: Date) -> Decimal {
    transactions
        .iter()
        .rev()
        .find_map(|tx| {
            (tx.kind == TransactionKind::RateChange && tx.date <= date)
                .then(|| tx.metadata.as_ref().map(|m| m.new_rate))
                .flatten()
        })
        .unwrap_or(base_rate)
}

/// Round to cents for a persisted or displayed amount. Half-away-from-zero,
/// matching the reference system's fixed-point display rounding.
pub fn round_money(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}
