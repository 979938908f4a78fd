//! Investor accounts, companies, and the ordered transaction ledger
//!
//! The ledger owns the `(date, seq)` ordering invariant and the insertion
//! sequence counter. An account's balance and rate are never stored: both are
//! projections replayed from the transaction log.

use jiff::civil::Date;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::ids::{AccountId, CompanyId};
use super::transaction::{RateChangeInfo, Transaction, TransactionKind};
use crate::ledger;

/// Ordered sequence of transactions for one account.
///
/// Transactions are kept sorted by `(date, seq)`. `seq` is assigned from a
/// monotonically increasing counter at insertion, so same-day entries keep
/// their relative insertion order across re-sorts and round-trips.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ledger {
    transactions: Vec<Transaction>,
    next_seq: u32,
}

impl Ledger {
    pub fn new() -> Self {
        Ledger {
            transactions: Vec::new(),
            next_seq: 0,
        }
    }

    /// Rebuild a ledger from persisted transactions, restoring order and the
    /// sequence counter.
    pub fn from_transactions(mut transactions: Vec<Transaction>) -> Self {
        transactions.sort_by_key(|t| t.order_key());
        let next_seq = transactions.iter().map(|t| t.seq + 1).max().unwrap_or(0);
        Ledger {
            transactions,
            next_seq,
        }
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Transaction> {
        self.transactions.get(index)
    }

    /// Append a new transaction and restore `(date, seq)` order.
    /// Returns the position the transaction landed at.
    pub fn insert(
        &mut self,
        date: Date,
        kind: TransactionKind,
        amount: Decimal,
        description: String,
        metadata: Option<RateChangeInfo>,
    ) -> usize {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.transactions.push(Transaction {
            date,
            kind,
            amount,
            description,
            metadata,
            seq,
        });
        self.transactions.sort_by_key(|t| t.order_key());
        self.position_of_seq(seq).expect("inserted transaction")
    }

    pub fn remove(&mut self, index: usize) -> Transaction {
        self.transactions.remove(index)
    }

    /// Replace the transaction at `index` (the replacement keeps its `seq`)
    /// and restore order. Returns the replacement's new position.
    pub fn replace(&mut self, index: usize, transaction: Transaction) -> usize {
        let seq = transaction.seq;
        self.transactions[index] = transaction;
        self.transactions.sort_by_key(|t| t.order_key());
        self.position_of_seq(seq).expect("replaced transaction")
    }

    /// Direct in-place amendment used by the cascade recompute, which touches
    /// only amounts and descriptions and therefore cannot disturb ordering.
    pub(crate) fn amend(&mut self, index: usize, amount: Decimal, description: String) {
        let tx = &mut self.transactions[index];
        tx.amount = amount;
        tx.description = description;
    }

    fn position_of_seq(&self, seq: u32) -> Option<usize> {
        self.transactions.iter().position(|t| t.seq == seq)
    }

    pub fn count_of_kind(&self, kind: TransactionKind) -> usize {
        self.transactions.iter().filter(|t| t.kind == kind).count()
    }

    pub fn position_of_kind(&self, kind: TransactionKind) -> Option<usize> {
        self.transactions.iter().position(|t| t.kind == kind)
    }
}

impl Default for Ledger {
    fn default() -> Self {
        Ledger::new()
    }
}

/// A private investor account within a company.
///
/// `base_rate` is the annual interest rate (percent) at account creation; the
/// rate in effect at any later date is derived from the `RateChange` event
/// log, never from a hand-edited field.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    pub id: AccountId,
    pub company_id: CompanyId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub start_date: Date,
    pub base_rate: Decimal,
    pub reinvesting: bool,
    #[serde(default)]
    pub archived: bool,
    pub ledger: Ledger,
}

impl Account {
    /// Balance after replaying the full transaction log.
    pub fn current_balance(&self) -> Decimal {
        ledger::balance(self.ledger.transactions())
    }

    /// Balance after replaying transactions up to `cutoff`.
    pub fn balance_at(&self, cutoff: Date, inclusive: bool) -> Decimal {
        ledger::balance_at(self.ledger.transactions(), cutoff, inclusive)
    }

    /// Annual rate (percent) in effect on `date`.
    pub fn rate_as_of(&self, date: Date) -> Decimal {
        ledger::rate_as_of(self.ledger.transactions(), self.base_rate, date)
    }

    /// Annual rate (percent) after the whole rate-change log.
    pub fn current_rate(&self) -> Decimal {
        self.ledger
            .transactions()
            .iter()
            .rev()
            .find_map(|t| {
                (t.kind == TransactionKind::RateChange)
                    .then(|| t.metadata.as_ref().map(|m| m.new_rate))
                    .flatten()
            })
            .unwrap_or(self.base_rate)
    }
}

/// A company groups investor accounts and supplies the default rate applied
/// at account creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Company {
    pub id: CompanyId,
    pub name: String,
    pub default_rate: Decimal,
}
