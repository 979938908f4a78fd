//! Cascade repricing of future interest entries
//!
//! After an edit that changes principal or rate at some earlier date, every
//! later `InterestEarned` entry is re-derived from the balance just before it
//! and the rate in effect on its date. The walk is strictly left-to-right
//! over the already-updated list: each repriced entry feeds the base for the
//! next one, so reinvested interest compounds correctly.

use std::sync::LazyLock;

use jiff::civil::Date;
use regex::Regex;
use rust_decimal::Decimal;

use crate::interest::{InterestStrategy, display_rate};
use crate::ledger::{balance_before_position, rate_as_of, round_money};
use crate::model::{Ledger, Transaction, TransactionKind};

static RATE_MENTION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"@\s*\d+(\.\d+)?%").expect("rate mention pattern"));

fn rewrite_rate_mention(description: &str, rate: Decimal) -> String {
    let replacement = format!("@ {}%", display_rate(rate));
    RATE_MENTION
        .replace(description, replacement.as_str())
        .into_owned()
}

/// Reprice every `InterestEarned` entry dated strictly after `anchor`.
/// Returns the number of entries updated. Idempotent: repricing an already
/// repriced list is a no-op.
pub fn recompute_future_interest(
    ledger: &mut Ledger,
    anchor: Date,
    base_rate: Decimal,
    strategy: InterestStrategy,
) -> usize {
    reprice(ledger, base_rate, strategy, |_, tx| tx.date > anchor)
}

/// Reprice every `InterestEarned` entry positioned after `position` in
/// ledger order, regardless of date. Used by the this-and-future edit path.
pub fn recompute_after(
    ledger: &mut Ledger,
    position: usize,
    base_rate: Decimal,
    strategy: InterestStrategy,
) -> usize {
    reprice(ledger, base_rate, strategy, |index, _| index > position)
}

fn reprice(
    ledger: &mut Ledger,
    base_rate: Decimal,
    strategy: InterestStrategy,
    in_scope: impl Fn(usize, &Transaction) -> bool,
) -> usize {
    let mut updated = 0;

    for index in 0..ledger.len() {
        let (date, description) = {
            let tx = &ledger.transactions()[index];
            if tx.kind != TransactionKind::InterestEarned
                || !in_scope(index, tx)
                || !strategy.reprices(tx)
            {
                continue;
            }
            (tx.date, tx.description.clone())
        };

        // Balance and rate read from the list as updated so far, so each
        // repriced entry compounds into the next one's base.
        let transactions = ledger.transactions();
        let balance = balance_before_position(transactions, index);
        let rate = rate_as_of(transactions, base_rate, date);
        let amount = round_money(strategy.accrual(balance, rate, date));

        ledger.amend(index, amount, rewrite_rate_mention(&description, rate));
        updated += 1;
    }

    updated
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rewrite_rate_mention() {
        let rate = Decimal::from(14);
        assert_eq!(
            rewrite_rate_mention("Q2 2023 Interest Earned/Reinvested @ 12%", rate),
            "Q2 2023 Interest Earned/Reinvested @ 14%"
        );
        assert_eq!(
            rewrite_rate_mention("Q2 2023 Interest Earned @ 10.50%", rate),
            "Q2 2023 Interest Earned @ 14%"
        );
        // No mention, no change
        assert_eq!(rewrite_rate_mention("Interest paid", rate), "Interest paid");
    }
}
