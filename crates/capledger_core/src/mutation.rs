//! Account mutation service
//!
//! Each operation validates its input, applies the edit, and triggers the
//! cascade recompute when the edit changes principal or rate. Operations are
//! apply-or-reject: on any error the account is left untouched.

use jiff::civil::Date;
use rust_decimal::Decimal;

use crate::date_math::{Quarter, format_display};
use crate::error::{LedgerError, Result};
use crate::interest::{InterestStrategy, display_rate, quarterly_interest};
use crate::ledger::{balance_at, round_money};
use crate::model::{
    Account, AccountId, Company, Ledger, RateChangeInfo, Transaction, TransactionKind,
};
use crate::recompute::{recompute_after, recompute_future_interest};

/// Details for opening a new investor account.
#[derive(Debug, Clone)]
pub struct NewAccount {
    pub name: String,
    pub email: Option<String>,
    pub start_date: Date,
    pub initial_investment: Decimal,
    /// Annual rate (percent); the company default applies when absent.
    pub interest_rate: Option<Decimal>,
    pub reinvesting: bool,
}

/// How far an edit reaches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditScope {
    /// Replace the one transaction, touch nothing else.
    Single,
    /// Replace the transaction and reprice every interest entry after it,
    /// day-counted.
    ThisAndFuture,
}

/// Field replacements for an edit; absent fields keep their current value.
#[derive(Debug, Clone, Default)]
pub struct TransactionEdit {
    pub date: Option<Date>,
    pub kind: Option<TransactionKind>,
    pub amount: Option<Decimal>,
    pub description: Option<String>,
    pub rate_change: Option<RateChangeInfo>,
}

/// Contact and opening-position updates for an existing account.
#[derive(Debug, Clone, Default)]
pub struct DetailsUpdate {
    pub name: Option<String>,
    pub email: Option<String>,
    pub initial_investment: Option<Decimal>,
    pub start_date: Option<Date>,
}

/// Open an account, seeding exactly one `Initial` transaction at
/// `start_date` for the opening principal.
pub fn create_account(company: &Company, details: NewAccount) -> Result<Account> {
    if details.initial_investment <= Decimal::ZERO {
        return Err(LedgerError::InvalidAmount(
            "initial investment must be positive".to_string(),
        ));
    }
    let base_rate = details.interest_rate.unwrap_or(company.default_rate);
    if base_rate <= Decimal::ZERO {
        return Err(LedgerError::InvalidAmount(
            "interest rate must be positive".to_string(),
        ));
    }

    let mut ledger = Ledger::new();
    ledger.insert(
        details.start_date,
        TransactionKind::Initial,
        details.initial_investment,
        "Initial balance".to_string(),
        None,
    );

    Ok(Account {
        id: AccountId::generate(),
        company_id: company.id,
        name: details.name,
        email: details.email,
        start_date: details.start_date,
        base_rate,
        reinvesting: details.reinvesting,
        archived: false,
        ledger,
    })
}

fn validate_amount(kind: TransactionKind, amount: Decimal) -> Result<()> {
    match kind {
        TransactionKind::RateChange => Ok(()),
        // Adjustments carry their own sign, but a zero adjustment is a no-op
        TransactionKind::Adjustment => {
            if amount == Decimal::ZERO {
                Err(LedgerError::InvalidAmount(
                    "adjustment amount cannot be zero".to_string(),
                ))
            } else {
                Ok(())
            }
        }
        _ => {
            if amount <= Decimal::ZERO {
                Err(LedgerError::InvalidAmount(format!(
                    "{kind} amount must be positive"
                )))
            } else {
                Ok(())
            }
        }
    }
}

fn ensure_not_before_initial(account: &Account, date: Date) -> Result<()> {
    if let Some(first) = account.ledger.get(0) {
        if date < first.date {
            return Err(LedgerError::InvariantViolation(format!(
                "transactions cannot predate the initial balance on {}",
                format_display(first.date)
            )));
        }
    }
    Ok(())
}

/// Append a transaction in `(date, seq)` order. Principal-affecting kinds
/// cascade a flat-quarterly reprice of all later interest entries.
pub fn add_transaction(
    account: &mut Account,
    kind: TransactionKind,
    date: Date,
    amount: Decimal,
    description: &str,
) -> Result<()> {
    if kind == TransactionKind::RateChange {
        return Err(LedgerError::InvariantViolation(
            "rate changes are posted through change_rate".to_string(),
        ));
    }
    if kind == TransactionKind::Initial && account.ledger.count_of_kind(TransactionKind::Initial) > 0
    {
        return Err(LedgerError::InvariantViolation(
            "account already has an initial transaction".to_string(),
        ));
    }
    if account.ledger.is_empty() && kind != TransactionKind::Initial {
        return Err(LedgerError::InvariantViolation(
            "the first transaction must be the initial balance".to_string(),
        ));
    }
    validate_amount(kind, amount)?;
    if kind != TransactionKind::Initial {
        ensure_not_before_initial(account, date)?;
    }

    if kind == TransactionKind::Withdrawal {
        // Every transaction ordered before the new entry counts, including
        // same-day entries inserted earlier.
        let available = balance_at(account.ledger.transactions(), date, true);
        if amount > available {
            return Err(LedgerError::InvalidAmount(format!(
                "withdrawal exceeds current balance of ${}",
                round_money(available)
            )));
        }
    }

    account
        .ledger
        .insert(date, kind, amount, description.to_string(), None);

    if kind.affects_principal() {
        recompute_future_interest(
            &mut account.ledger,
            date,
            account.base_rate,
            InterestStrategy::FlatQuarterly,
        );
    }
    Ok(())
}

/// Remove the transaction at `index`. Removing a principal-affecting entry
/// cascades a reprice anchored at the removed date over the post-deletion
/// list.
pub fn delete_transaction(account: &mut Account, index: usize) -> Result<()> {
    let tx = account
        .ledger
        .get(index)
        .ok_or_else(|| LedgerError::NotFound(format!("transaction index {index}")))?;

    if tx.kind == TransactionKind::Initial
        && account.ledger.count_of_kind(TransactionKind::Initial) == 1
    {
        return Err(LedgerError::InvariantViolation(
            "cannot delete the account's sole initial transaction".to_string(),
        ));
    }

    let removed = account.ledger.remove(index);
    if removed.kind.affects_principal() {
        recompute_future_interest(
            &mut account.ledger,
            removed.date,
            account.base_rate,
            InterestStrategy::FlatQuarterly,
        );
    }
    Ok(())
}

/// Replace the transaction at `index`. With `EditScope::ThisAndFuture`,
/// every interest entry after the edited one is repriced day-counted
/// (`balance * rate/100 * days_in_month / 365`), deliberately a different
/// formula from the flat-quarterly cascade.
pub fn edit_transaction(
    account: &mut Account,
    index: usize,
    edit: TransactionEdit,
    scope: EditScope,
) -> Result<()> {
    let existing = account
        .ledger
        .get(index)
        .ok_or_else(|| LedgerError::NotFound(format!("transaction index {index}")))?
        .clone();

    let kind = edit.kind.unwrap_or(existing.kind);
    let date = edit.date.unwrap_or(existing.date);
    let mut amount = edit.amount.unwrap_or(existing.amount);
    let description = edit.description.unwrap_or_else(|| existing.description.clone());

    if existing.kind == TransactionKind::Initial && kind != TransactionKind::Initial {
        return Err(LedgerError::InvariantViolation(
            "the initial transaction cannot change kind".to_string(),
        ));
    }
    if existing.kind != TransactionKind::Initial && kind == TransactionKind::Initial {
        return Err(LedgerError::InvariantViolation(
            "account already has an initial transaction".to_string(),
        ));
    }

    let metadata = if kind == TransactionKind::RateChange {
        amount = Decimal::ZERO;
        let meta = edit.rate_change.or_else(|| existing.metadata.clone());
        if meta.is_none() {
            return Err(LedgerError::InvalidAmount(
                "rate change requires old and new rates".to_string(),
            ));
        }
        meta
    } else {
        validate_amount(kind, amount)?;
        None
    };

    // Apply on a copy so a violated ordering invariant rejects cleanly.
    let mut ledger = account.ledger.clone();
    let position = ledger.replace(
        index,
        Transaction {
            date,
            kind,
            amount,
            description,
            metadata,
            seq: existing.seq,
        },
    );
    if ledger.get(0).map(|t| t.kind) != Some(TransactionKind::Initial) {
        return Err(LedgerError::InvariantViolation(
            "the initial transaction must remain first".to_string(),
        ));
    }

    if scope == EditScope::ThisAndFuture {
        recompute_after(
            &mut ledger,
            position,
            account.base_rate,
            InterestStrategy::DayCounted,
        );
    }

    account.ledger = ledger;
    if kind == TransactionKind::Initial {
        account.start_date = date;
    }
    Ok(())
}

/// Post a `RateChange` effective on `effective_date`. When
/// `recalculate_future` is set, every later interest entry is repriced
/// flat-quarterly against the new rate timeline; otherwise existing entries
/// are deliberately left as they are. Returns the number of repriced
/// entries.
pub fn change_rate(
    account: &mut Account,
    new_rate: Decimal,
    effective_date: Date,
    reason: Option<&str>,
    recalculate_future: bool,
) -> Result<usize> {
    if new_rate <= Decimal::ZERO {
        return Err(LedgerError::InvalidAmount(
            "interest rate must be positive".to_string(),
        ));
    }
    ensure_not_before_initial(account, effective_date)?;

    let old_rate = account.rate_as_of(effective_date);
    let reason = reason.map(str::trim).filter(|r| !r.is_empty());
    let description = match reason {
        Some(text) => format!(
            "RATE CHANGE: {}% -> {}% effective {} - {text}",
            display_rate(old_rate),
            display_rate(new_rate),
            format_display(effective_date),
        ),
        None => format!(
            "RATE CHANGE: {}% -> {}% effective {}",
            display_rate(old_rate),
            display_rate(new_rate),
            format_display(effective_date),
        ),
    };

    account.ledger.insert(
        effective_date,
        TransactionKind::RateChange,
        Decimal::ZERO,
        description,
        Some(RateChangeInfo {
            old_rate,
            new_rate,
            reason: reason.map(str::to_string),
        }),
    );

    if recalculate_future {
        Ok(recompute_future_interest(
            &mut account.ledger,
            effective_date,
            account.base_rate,
            InterestStrategy::FlatQuarterly,
        ))
    } else {
        Ok(0)
    }
}

/// One-click quarterly interest: flat-quarterly interest on the balance at
/// quarter start, posted at quarter end. Reinvested interest stays in the
/// account; otherwise a matching `InterestPaid` disbursement is posted the
/// same day.
pub fn post_quarterly_interest(
    account: &mut Account,
    quarter: Quarter,
    year: i16,
    reinvest: bool,
) -> Result<Decimal> {
    let (start, end) = quarter.bounds(year);
    let opening = balance_at(account.ledger.transactions(), start, false);
    let rate = account.rate_as_of(end);
    let interest = round_money(quarterly_interest(opening, rate));

    if interest <= Decimal::ZERO {
        return Err(LedgerError::InvalidAmount(format!(
            "no interest accrued for {quarter} {year}: opening balance is ${}",
            round_money(opening)
        )));
    }

    let description = if reinvest {
        format!(
            "{quarter} {year} Interest Earned/Reinvested @ {}%",
            display_rate(rate)
        )
    } else {
        format!("{quarter} {year} Interest Earned @ {}%", display_rate(rate))
    };
    account
        .ledger
        .insert(end, TransactionKind::InterestEarned, interest, description, None);
    if !reinvest {
        account.ledger.insert(
            end,
            TransactionKind::InterestPaid,
            interest,
            "Interest paid".to_string(),
            None,
        );
    }
    account.reinvesting = reinvest;
    Ok(interest)
}

/// Update contact details and, when given, the opening position. Rewriting
/// the initial amount or start date cascades a flat-quarterly reprice from
/// the earlier of the old and new dates.
pub fn update_details(account: &mut Account, update: DetailsUpdate) -> Result<()> {
    if let Some(amount) = update.initial_investment {
        if amount <= Decimal::ZERO {
            return Err(LedgerError::InvalidAmount(
                "initial investment must be positive".to_string(),
            ));
        }
    }

    if update.initial_investment.is_some() || update.start_date.is_some() {
        let index = account
            .ledger
            .position_of_kind(TransactionKind::Initial)
            .ok_or_else(|| {
                LedgerError::InvariantViolation("account has no initial transaction".to_string())
            })?;
        let existing = account.ledger.get(index).expect("initial position").clone();
        let date = update.start_date.unwrap_or(existing.date);
        let amount = update.initial_investment.unwrap_or(existing.amount);
        let anchor = existing.date.min(date);

        let mut ledger = account.ledger.clone();
        ledger.replace(
            index,
            Transaction {
                date,
                amount,
                ..existing
            },
        );
        if ledger.get(0).map(|t| t.kind) != Some(TransactionKind::Initial) {
            return Err(LedgerError::InvariantViolation(
                "the initial transaction must remain first".to_string(),
            ));
        }
        recompute_future_interest(
            &mut ledger,
            anchor,
            account.base_rate,
            InterestStrategy::FlatQuarterly,
        );
        account.ledger = ledger;
        account.start_date = date;
    }

    if let Some(name) = update.name {
        account.name = name;
    }
    if let Some(email) = update.email {
        account.email = Some(email);
    }
    Ok(())
}
