//! Interest formulas and accrual strategies
//!
//! Two distinct formulas coexist deliberately and must not be unified:
//! statements depend on which one produced a historical figure.
//!
//! - Flat quarterly: `balance * rate/100 / 4`, assumes a full quarter.
//! - Day-counted: `principal * rate/100 * days / 365`.

use jiff::civil::Date;
use rust_decimal::Decimal;

use crate::date_math::{days_in_month, days_inclusive};
use crate::ledger::round_money;
use crate::model::{Transaction, TransactionKind};

/// Flat quarterly interest on a balance at an annual percent rate. Not
/// prorated by days.
pub fn quarterly_interest(balance: Decimal, annual_rate: Decimal) -> Decimal {
    balance * (annual_rate / Decimal::ONE_HUNDRED) / Decimal::from(4)
}

/// Day-counted interest over `[start, end]`, both endpoints counting: the
/// first day of a new investment accrues interest on its own day.
pub fn prorated_interest(
    principal: Decimal,
    annual_rate: Decimal,
    start: Date,
    end: Date,
) -> Decimal {
    principal * (annual_rate / Decimal::ONE_HUNDRED) * Decimal::from(days_inclusive(start, end))
        / Decimal::from(365)
}

/// How a cascade reprices an `InterestEarned` entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InterestStrategy {
    /// `balance * rate/100 / 4`, the default calculator and cascade formula.
    FlatQuarterly,
    /// `balance * rate/100 * days_in_month / 365`, the this-and-future edit
    /// path. Skips entries whose description marks a disbursement (payout
    /// records, not accruals).
    DayCounted,
}

impl InterestStrategy {
    /// Unrounded accrual for an interest entry dated `date` on `balance` at
    /// `annual_rate` percent.
    pub fn accrual(self, balance: Decimal, annual_rate: Decimal, date: Date) -> Decimal {
        match self {
            InterestStrategy::FlatQuarterly => quarterly_interest(balance, annual_rate),
            InterestStrategy::DayCounted => {
                let days = days_in_month(date.year(), date.month());
                balance * (annual_rate / Decimal::ONE_HUNDRED) * Decimal::from(days as i32)
                    / Decimal::from(365)
            }
        }
    }

    pub fn reprices(self, tx: &Transaction) -> bool {
        match self {
            InterestStrategy::FlatQuarterly => true,
            InterestStrategy::DayCounted => !tx.description.contains("Disbursement"),
        }
    }
}

/// Day-counted interest accrued across one quarter, walking the transaction
/// list segment by segment so mid-quarter principal and rate changes each
/// start a new constant-balance span.
///
/// Interest entries inside the quarter do not compound into the spans being
/// estimated; entries before the quarter fold into the opening balance as
/// usual.
pub fn prorated_quarter_interest(
    transactions: &[Transaction],
    quarter_start: Date,
    quarter_end: Date,
    base_rate: Decimal,
) -> Decimal {
    let mut total = Decimal::ZERO;
    let mut balance = Decimal::ZERO;
    let mut rate = base_rate;
    let mut period_start = quarter_start;

    for tx in transactions.iter().filter(|tx| tx.date <= quarter_end) {
        if tx.date < quarter_start {
            match tx.kind {
                TransactionKind::RateChange => {
                    if let Some(meta) = &tx.metadata {
                        rate = meta.new_rate;
                    }
                }
                _ => balance += tx.balance_effect(),
            }
            continue;
        }

        if balance > Decimal::ZERO && period_start < tx.date {
            total += prorated_interest(balance, rate, period_start, tx.date);
        }

        match tx.kind {
            TransactionKind::InterestEarned | TransactionKind::InterestPaid => {}
            TransactionKind::RateChange => {
                if let Some(meta) = &tx.metadata {
                    rate = meta.new_rate;
                }
            }
            _ => balance += tx.balance_effect(),
        }
        period_start = tx.date;
    }

    if balance > Decimal::ZERO && period_start < quarter_end {
        total += prorated_interest(balance, rate, period_start, quarter_end);
    }

    round_money(total)
}

/// Rate rendered for descriptions: trailing zeros stripped (`12`, `10.5`).
pub fn display_rate(rate: Decimal) -> String {
    rate.normalize().to_string()
}
