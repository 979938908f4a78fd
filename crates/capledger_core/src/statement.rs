//! Statement projection: read-only views replayed from a transaction list
//!
//! Everything here is derived; nothing mutates the ledger.

use jiff::civil::Date;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::date_math::{Quarter, days_between, days_inclusive, upcoming_quarter};
use crate::ledger::{balance_at, round_money};
use crate::model::{Transaction, TransactionKind};

/// One display row: the transaction plus the balance after it.
/// Rate changes are balance-neutral and show no balance.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatementRow {
    pub transaction: Transaction,
    pub balance_after: Option<Decimal>,
}

/// Left fold producing a running balance per row.
pub fn running_balance_rows(transactions: &[Transaction]) -> Vec<StatementRow> {
    let mut balance = Decimal::ZERO;
    transactions
        .iter()
        .map(|tx| {
            let balance_after = match tx.kind {
                TransactionKind::RateChange => None,
                _ => {
                    balance += tx.balance_effect();
                    Some(balance)
                }
            };
            StatementRow {
                transaction: tx.clone(),
                balance_after,
            }
        })
        .collect()
}

/// Activity summary over `[start, end]`.
///
/// The deltas partition every balance-affecting kind (contributions of any
/// flavor under `investments`, debits of any flavor under `withdrawals`), so
/// `ending_balance` always equals the inclusive balance replay at `end`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PeriodSummary {
    pub opening_balance: Decimal,
    pub investments: Decimal,
    pub interest_earned: Decimal,
    pub withdrawals: Decimal,
    pub ending_balance: Decimal,
}

pub fn period_summary(transactions: &[Transaction], start: Date, end: Date) -> PeriodSummary {
    let opening_balance = balance_at(transactions, start, false);
    let mut investments = Decimal::ZERO;
    let mut interest_earned = Decimal::ZERO;
    let mut withdrawals = Decimal::ZERO;

    for tx in transactions
        .iter()
        .filter(|tx| tx.date >= start && tx.date <= end)
    {
        match tx.kind {
            TransactionKind::Initial
            | TransactionKind::Investment
            | TransactionKind::Bonus
            | TransactionKind::Adjustment => investments += tx.amount,
            TransactionKind::InterestEarned => interest_earned += tx.amount,
            TransactionKind::Withdrawal
            | TransactionKind::InterestPaid
            | TransactionKind::Fee => withdrawals += tx.amount,
            TransactionKind::RateChange => {}
        }
    }

    let ending_balance = opening_balance + investments + interest_earned - withdrawals;
    PeriodSummary {
        opening_balance,
        investments,
        interest_earned,
        withdrawals,
        ending_balance,
    }
}

/// Lifetime interest: earned interest plus bonuses.
pub fn total_interest(transactions: &[Transaction]) -> Decimal {
    transactions
        .iter()
        .filter(|tx| {
            matches!(
                tx.kind,
                TransactionKind::InterestEarned | TransactionKind::Bonus
            )
        })
        .map(|tx| tx.amount)
        .sum()
}

/// Interest (and bonuses) credited during one calendar year.
pub fn yearly_interest(transactions: &[Transaction], year: i16) -> Decimal {
    transactions
        .iter()
        .filter(|tx| {
            tx.date.year() == year
                && matches!(
                    tx.kind,
                    TransactionKind::InterestEarned | TransactionKind::Bonus
                )
        })
        .map(|tx| tx.amount)
        .sum()
}

/// Interest earned within `[start, end]`, excluding bonuses; the statement
/// period figure.
pub fn period_interest(transactions: &[Transaction], start: Date, end: Date) -> Decimal {
    transactions
        .iter()
        .filter(|tx| {
            tx.kind == TransactionKind::InterestEarned && tx.date >= start && tx.date <= end
        })
        .map(|tx| tx.amount)
        .sum()
}

/// Day-weighted blended rate for a quarter containing a scheduled rate
/// change. Display only; stored interest is never derived from it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeightedRatePreview {
    pub quarter_label: String,
    pub quarter_start: Date,
    pub quarter_end: Date,
    pub change_date: Date,
    pub old_rate: Decimal,
    pub new_rate: Decimal,
    pub days_before: i32,
    pub days_after: i32,
    pub total_days: i32,
    pub weighted_rate: Decimal,
}

/// Scan up to four quarters ahead of `today` for the first scheduled
/// `RateChange` and blend the two rates by day count.
pub fn weighted_rate_for_upcoming_quarter(
    transactions: &[Transaction],
    base_rate: Decimal,
    today: Date,
) -> Option<WeightedRatePreview> {
    for offset in 1..=4 {
        let (start, end) = upcoming_quarter(today, offset);
        let change = transactions
            .iter()
            .find(|tx| tx.kind == TransactionKind::RateChange && tx.date >= start && tx.date <= end);

        if let Some(tx) = change {
            let total_days = days_inclusive(start, end);
            let days_before = days_between(start, tx.date);
            let days_after = total_days - days_before;
            let (old_rate, new_rate) = tx
                .metadata
                .as_ref()
                .map(|m| (m.old_rate, m.new_rate))
                .unwrap_or((base_rate, base_rate));

            let weighted = (old_rate * Decimal::from(days_before)
                + new_rate * Decimal::from(days_after))
                / Decimal::from(total_days);

            return Some(WeightedRatePreview {
                quarter_label: format!("{} {}", Quarter::containing(start), start.year()),
                quarter_start: start,
                quarter_end: end,
                change_date: tx.date,
                old_rate,
                new_rate,
                days_before,
                days_after,
                total_days,
                weighted_rate: round_money(weighted),
            });
        }
    }
    None
}
