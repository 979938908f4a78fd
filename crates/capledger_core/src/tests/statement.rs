//! Statement projection tests: running balances, the period summary closing
//! identity, interest totals, and the weighted upcoming-quarter rate.

use jiff::civil::date;
use rust_decimal_macros::dec;

use super::open_account;
use crate::ledger::balance_at;
use crate::model::TransactionKind;
use crate::mutation;
use crate::statement::{
    period_interest, period_summary, running_balance_rows, total_interest,
    weighted_rate_for_upcoming_quarter, yearly_interest,
};

#[test]
fn test_running_balance_rows() {
    let mut account = open_account(dec!(100000), dec!(12), date(2023, 1, 1));
    mutation::add_transaction(
        &mut account,
        TransactionKind::Investment,
        date(2023, 2, 1),
        dec!(50000),
        "Follow-on",
    )
    .unwrap();
    mutation::change_rate(&mut account, dec!(14), date(2023, 3, 1), None, false).unwrap();
    mutation::add_transaction(
        &mut account,
        TransactionKind::Withdrawal,
        date(2023, 4, 1),
        dec!(30000),
        "",
    )
    .unwrap();

    let rows = running_balance_rows(account.ledger.transactions());
    assert_eq!(rows.len(), 4);
    assert_eq!(rows[0].balance_after, Some(dec!(100000)));
    assert_eq!(rows[1].balance_after, Some(dec!(150000)));
    // Rate changes are balance-neutral markers
    assert_eq!(rows[2].balance_after, None);
    assert_eq!(rows[3].balance_after, Some(dec!(120000)));
}

#[test]
fn test_period_summary_closing_identity() {
    let mut account = open_account(dec!(100000), dec!(12), date(2023, 1, 1));
    let entries = [
        (TransactionKind::Investment, date(2023, 2, 1), dec!(50000)),
        (TransactionKind::InterestEarned, date(2023, 3, 31), dec!(4500)),
        (TransactionKind::Bonus, date(2023, 4, 10), dec!(1000)),
        (TransactionKind::Fee, date(2023, 5, 2), dec!(250)),
        (TransactionKind::Withdrawal, date(2023, 5, 15), dec!(20000)),
        (TransactionKind::Adjustment, date(2023, 6, 1), dec!(-750)),
        (TransactionKind::InterestPaid, date(2023, 6, 30), dec!(4500)),
    ];
    for (kind, d, amount) in entries {
        mutation::add_transaction(&mut account, kind, d, amount, "entry").unwrap();
    }

    let txs = account.ledger.transactions();
    let start = date(2023, 3, 1);
    let end = date(2023, 6, 30);
    let summary = period_summary(txs, start, end);

    assert_eq!(summary.opening_balance, balance_at(txs, start, false));
    // Every kind participates in a delta, so the identity holds exactly
    assert_eq!(summary.ending_balance, balance_at(txs, end, true));
    assert_eq!(
        summary.ending_balance,
        summary.opening_balance + summary.investments + summary.interest_earned
            - summary.withdrawals
    );
}

#[test]
fn test_period_summary_whole_life() {
    let mut account = open_account(dec!(100000), dec!(12), date(2023, 1, 1));
    mutation::add_transaction(
        &mut account,
        TransactionKind::InterestEarned,
        date(2023, 3, 31),
        dec!(3000),
        "Q1 2023 Interest Earned/Reinvested @ 12%",
    )
    .unwrap();

    let summary = period_summary(
        account.ledger.transactions(),
        date(2023, 1, 1),
        date(2023, 12, 31),
    );
    // The initial balance counts as a contribution when the period covers it
    assert_eq!(summary.opening_balance, dec!(0));
    assert_eq!(summary.investments, dec!(100000));
    assert_eq!(summary.interest_earned, dec!(3000));
    assert_eq!(summary.ending_balance, dec!(103000));
}

#[test]
fn test_interest_totals() {
    let mut account = open_account(dec!(100000), dec!(12), date(2022, 1, 1));
    let entries = [
        (TransactionKind::InterestEarned, date(2022, 12, 31), dec!(3000)),
        (TransactionKind::InterestEarned, date(2023, 3, 31), dec!(3090)),
        (TransactionKind::Bonus, date(2023, 6, 1), dec!(500)),
    ];
    for (kind, d, amount) in entries {
        mutation::add_transaction(&mut account, kind, d, amount, "entry").unwrap();
    }

    let txs = account.ledger.transactions();
    assert_eq!(total_interest(txs), dec!(6590));
    assert_eq!(yearly_interest(txs, 2023), dec!(3590));
    assert_eq!(yearly_interest(txs, 2022), dec!(3000));
    // Statement period figure excludes bonuses
    assert_eq!(
        period_interest(txs, date(2023, 1, 1), date(2023, 12, 31)),
        dec!(3090)
    );
}

#[test]
fn test_weighted_rate_preview() {
    let mut account = open_account(dec!(100000), dec!(10), date(2023, 1, 1));
    // Scheduled mid-quarter change: Q3 2023 runs 01-Jul..30-Sep (92 days)
    mutation::change_rate(&mut account, dec!(12), date(2023, 8, 1), None, false).unwrap();

    let preview = weighted_rate_for_upcoming_quarter(
        account.ledger.transactions(),
        account.base_rate,
        date(2023, 5, 10),
    )
    .expect("rate change within four quarters");

    assert_eq!(preview.quarter_label, "Q3 2023");
    assert_eq!(preview.change_date, date(2023, 8, 1));
    assert_eq!(preview.total_days, 92);
    assert_eq!(preview.days_before, 31);
    assert_eq!(preview.days_after, 61);
    // (10 * 31 + 12 * 61) / 92 = 11.33 to the cent
    assert_eq!(preview.weighted_rate, dec!(11.33));
}

#[test]
fn test_weighted_rate_none_without_scheduled_change() {
    let account = open_account(dec!(100000), dec!(10), date(2023, 1, 1));
    assert!(
        weighted_rate_for_upcoming_quarter(
            account.ledger.transactions(),
            account.base_rate,
            date(2023, 5, 10),
        )
        .is_none()
    );
}
