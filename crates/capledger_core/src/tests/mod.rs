//! Engine test suite
//!
//! One module per concern: balance replay, interest formulas, cascade
//! recomputation, mutation operations, statement projections.

mod ledger_replay;
mod recompute;
mod statement;

use jiff::civil::Date;
use rust_decimal::Decimal;

use crate::model::{Account, Company, CompanyId};
use crate::mutation::{self, NewAccount};

fn company(default_rate: Decimal) -> Company {
    Company {
        id: CompanyId::generate(),
        name: "Summit Capital Partners".to_string(),
        default_rate,
    }
}

fn open_account(initial: Decimal, rate: Decimal, start: Date) -> Account {
    mutation::create_account(
        &company(rate),
        NewAccount {
            name: "Alex Investor".to_string(),
            email: None,
            start_date: start,
            initial_investment: initial,
            interest_rate: Some(rate),
            reinvesting: true,
        },
    )
    .expect("account opens")
}
