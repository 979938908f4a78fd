//! Cascade recompute tests
//!
//! A retroactive principal or rate change must reprice every later interest
//! entry against the updated running balance and the rate in effect at each
//! entry's date, sequentially, so reinvested interest compounds.

use jiff::civil::date;
use rust_decimal_macros::dec;

use super::open_account;
use crate::interest::InterestStrategy;
use crate::model::TransactionKind;
use crate::mutation;
use crate::recompute::recompute_future_interest;

#[test]
fn test_retroactive_investment_reprices_next_quarter() {
    let mut account = open_account(dec!(100000), dec!(12), date(2023, 1, 1));

    mutation::add_transaction(
        &mut account,
        TransactionKind::InterestEarned,
        date(2023, 1, 31),
        dec!(3000),
        "Interest Earned/Reinvested @ 12%",
    )
    .unwrap();
    assert_eq!(account.current_balance(), dec!(103000));

    // Stale accrual priced off the pre-investment balance
    mutation::add_transaction(
        &mut account,
        TransactionKind::InterestEarned,
        date(2023, 3, 31),
        dec!(3090),
        "Q1 2023 Interest Earned/Reinvested @ 12%",
    )
    .unwrap();

    // Backdated investment lands between the two accruals
    mutation::add_transaction(
        &mut account,
        TransactionKind::Investment,
        date(2023, 2, 1),
        dec!(50000),
        "Follow-on investment",
    )
    .unwrap();

    let txs = account.ledger.transactions();
    let earlier = txs
        .iter()
        .find(|t| t.date == date(2023, 1, 31))
        .expect("january accrual");
    let repriced = txs
        .iter()
        .find(|t| t.date == date(2023, 3, 31))
        .expect("march accrual");

    // Base is 100000 + 3000 + 50000 = 153000, so 153000 * 12% / 4 = 4590,
    // not the pre-investment 3090
    assert_eq!(repriced.amount, dec!(4590.00));
    // The accrual before the edit date is untouched
    assert_eq!(earlier.amount, dec!(3000));
}

#[test]
fn test_cascade_is_sequential_and_compounds() {
    let mut account = open_account(dec!(100000), dec!(12), date(2023, 1, 1));
    for (d, stale) in [
        (date(2023, 3, 31), dec!(1)),
        (date(2023, 6, 30), dec!(1)),
    ] {
        mutation::add_transaction(
            &mut account,
            TransactionKind::InterestEarned,
            d,
            stale,
            "Interest Earned/Reinvested @ 12%",
        )
        .unwrap();
    }

    recompute_future_interest(
        &mut account.ledger,
        date(2023, 1, 1),
        account.base_rate,
        InterestStrategy::FlatQuarterly,
    );

    let txs = account.ledger.transactions();
    // Q1: 100000 * 3% = 3000; Q2 compounds on 103000: 3090
    assert_eq!(txs[1].amount, dec!(3000.00));
    assert_eq!(txs[2].amount, dec!(3090.00));
    assert_eq!(account.current_balance(), dec!(106090.00));
}

#[test]
fn test_cascade_idempotence() {
    let mut account = open_account(dec!(100000), dec!(12), date(2023, 1, 1));
    for d in [date(2023, 3, 31), date(2023, 6, 30), date(2023, 9, 30)] {
        mutation::add_transaction(
            &mut account,
            TransactionKind::InterestEarned,
            d,
            dec!(1),
            "Interest Earned/Reinvested @ 12%",
        )
        .unwrap();
    }
    mutation::add_transaction(
        &mut account,
        TransactionKind::Withdrawal,
        date(2023, 4, 15),
        dec!(20000),
        "Partial withdrawal",
    )
    .unwrap();

    let once = account.ledger.clone();
    recompute_future_interest(
        &mut account.ledger,
        date(2023, 4, 15),
        account.base_rate,
        InterestStrategy::FlatQuarterly,
    );
    assert_eq!(account.ledger, once);
}

#[test]
fn test_cascade_uses_rate_in_effect_at_each_entry() {
    let mut account = open_account(dec!(100000), dec!(10), date(2023, 1, 1));
    for d in [date(2023, 3, 31), date(2023, 9, 30)] {
        mutation::add_transaction(
            &mut account,
            TransactionKind::InterestEarned,
            d,
            dec!(1),
            "Interest Earned/Reinvested @ 10%",
        )
        .unwrap();
    }

    // Rate change between the two accruals, cascading from the start
    mutation::change_rate(&mut account, dec!(14), date(2023, 5, 1), None, true).unwrap();
    recompute_future_interest(
        &mut account.ledger,
        date(2023, 1, 1),
        account.base_rate,
        InterestStrategy::FlatQuarterly,
    );

    let txs = account.ledger.transactions();
    let march = txs.iter().find(|t| t.date == date(2023, 3, 31)).unwrap();
    let september = txs.iter().find(|t| t.date == date(2023, 9, 30)).unwrap();

    // March accrues at the old 10%, September at the new 14%
    assert_eq!(march.amount, dec!(2500.00));
    assert_eq!(march.description, "Interest Earned/Reinvested @ 10%");
    // 102500 * 14% / 4 = 3587.50
    assert_eq!(september.amount, dec!(3587.50));
    assert_eq!(september.description, "Interest Earned/Reinvested @ 14%");
}

#[test]
fn test_delete_reprices_from_removed_date() {
    let mut account = open_account(dec!(100000), dec!(12), date(2023, 1, 1));
    mutation::add_transaction(
        &mut account,
        TransactionKind::Investment,
        date(2023, 2, 1),
        dec!(50000),
        "Follow-on investment",
    )
    .unwrap();
    mutation::add_transaction(
        &mut account,
        TransactionKind::InterestEarned,
        date(2023, 3, 31),
        dec!(4500),
        "Q1 2023 Interest Earned/Reinvested @ 12%",
    )
    .unwrap();

    let investment_index = account
        .ledger
        .transactions()
        .iter()
        .position(|t| t.kind == TransactionKind::Investment)
        .unwrap();
    mutation::delete_transaction(&mut account, investment_index).unwrap();

    let repriced = account
        .ledger
        .transactions()
        .iter()
        .find(|t| t.date == date(2023, 3, 31))
        .unwrap();
    // Back to the pre-investment base: 100000 * 12% / 4
    assert_eq!(repriced.amount, dec!(3000.00));
    assert_eq!(account.current_balance(), dec!(103000.00));
}
