//! Balance replay tests
//!
//! The balance is always a pure left fold over the ordered transaction list;
//! these verify the kind effect table, cutoff semantics, and same-day
//! ordering.

use jiff::civil::date;
use rust_decimal_macros::dec;

use super::open_account;
use crate::ledger::{balance, balance_at, rate_as_of};
use crate::model::TransactionKind;
use crate::mutation;

#[test]
fn test_replay_determinism() {
    let mut account = open_account(dec!(100000), dec!(12), date(2023, 1, 1));
    mutation::add_transaction(
        &mut account,
        TransactionKind::Investment,
        date(2023, 2, 1),
        dec!(50000),
        "Follow-on investment",
    )
    .unwrap();

    let first = balance(account.ledger.transactions());
    let second = balance(account.ledger.transactions());
    assert_eq!(first, second);
    assert_eq!(first, dec!(150000));
}

#[test]
fn test_kind_effect_table() {
    let mut account = open_account(dec!(1000), dec!(10), date(2023, 1, 1));
    let entries = [
        (TransactionKind::Investment, dec!(500)),
        (TransactionKind::Bonus, dec!(50)),
        (TransactionKind::InterestEarned, dec!(25)),
        (TransactionKind::Withdrawal, dec!(200)),
        (TransactionKind::InterestPaid, dec!(25)),
        (TransactionKind::Fee, dec!(10)),
        (TransactionKind::Adjustment, dec!(-15)),
    ];
    for (i, (kind, amount)) in entries.iter().enumerate() {
        mutation::add_transaction(
            &mut account,
            *kind,
            date(2023, 2, 1 + i as i8),
            *amount,
            "entry",
        )
        .unwrap();
    }

    // 1000 + 500 + 50 + 25 - 200 - 25 - 10 - 15
    assert_eq!(account.current_balance(), dec!(1325));
}

#[test]
fn test_balance_at_cutoff_semantics() {
    let mut account = open_account(dec!(1000), dec!(10), date(2023, 1, 1));
    mutation::add_transaction(
        &mut account,
        TransactionKind::Investment,
        date(2023, 3, 15),
        dec!(500),
        "",
    )
    .unwrap();

    let txs = account.ledger.transactions();
    assert_eq!(balance_at(txs, date(2023, 3, 15), false), dec!(1000));
    assert_eq!(balance_at(txs, date(2023, 3, 15), true), dec!(1500));
    assert_eq!(balance_at(txs, date(2023, 1, 1), false), dec!(0));
}

#[test]
fn test_same_day_entries_keep_insertion_order() {
    let mut account = open_account(dec!(1000), dec!(10), date(2023, 1, 1));
    let day = date(2023, 6, 15);
    mutation::add_transaction(&mut account, TransactionKind::Investment, day, dec!(300), "a")
        .unwrap();
    mutation::add_transaction(&mut account, TransactionKind::Withdrawal, day, dec!(100), "b")
        .unwrap();

    let txs = account.ledger.transactions();
    let same_day: Vec<_> = txs.iter().filter(|t| t.date == day).collect();
    assert_eq!(same_day.len(), 2);
    assert_eq!(same_day[0].kind, TransactionKind::Investment);
    assert_eq!(same_day[1].kind, TransactionKind::Withdrawal);
    assert!(same_day[0].seq < same_day[1].seq);
}

#[test]
fn test_rate_as_of_scans_rate_change_log() {
    let mut account = open_account(dec!(1000), dec!(10), date(2023, 1, 1));
    mutation::change_rate(&mut account, dec!(12), date(2023, 6, 1), None, false).unwrap();
    mutation::change_rate(&mut account, dec!(14), date(2024, 1, 1), None, false).unwrap();

    let txs = account.ledger.transactions();
    assert_eq!(rate_as_of(txs, account.base_rate, date(2023, 5, 31)), dec!(10));
    assert_eq!(rate_as_of(txs, account.base_rate, date(2023, 6, 1)), dec!(12));
    assert_eq!(rate_as_of(txs, account.base_rate, date(2023, 12, 31)), dec!(12));
    assert_eq!(rate_as_of(txs, account.base_rate, date(2024, 3, 1)), dec!(14));
    assert_eq!(account.current_rate(), dec!(14));
}
