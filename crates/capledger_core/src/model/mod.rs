//! Core data model: identifiers, transactions, accounts, companies

pub mod account;
pub mod ids;
pub mod transaction;

pub use account::{Account, Company, Ledger};
pub use ids::{AccountId, CompanyId};
pub use transaction::{RateChangeInfo, Transaction, TransactionKind};
