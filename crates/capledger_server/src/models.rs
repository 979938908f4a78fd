use capledger_core::statement::{PeriodSummary, StatementRow, WeightedRatePreview};
use capledger_core::{Account, Transaction, TransactionKind, ledger, statement};
use jiff::civil::Date;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

fn default_true() -> bool {
    true
}

// ============================================================================
// Company Types
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct CreateCompanyRequest {
    pub name: String,
    pub default_rate: Decimal,
}

#[derive(Debug, Serialize)]
pub struct CompanyRecord {
    pub id: String,
    pub name: String,
    pub default_rate: Decimal,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Serialize)]
pub struct CompanyListItem {
    pub id: String,
    pub name: String,
    pub default_rate: Decimal,
    pub investor_count: usize,
    pub created_at: String,
    pub updated_at: String,
}

// ============================================================================
// Investor Types
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct CreateInvestorRequest {
    pub name: String,
    pub email: Option<String>,
    pub start_date: String,
    pub initial_investment: Decimal,
    /// Annual percent rate; the company default applies when absent.
    pub interest_rate: Option<Decimal>,
    #[serde(default = "default_true")]
    pub reinvesting: bool,
}

#[derive(Debug, Deserialize)]
pub struct UpdateInvestorRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub initial_investment: Option<Decimal>,
    pub start_date: Option<String>,
    pub archived: Option<bool>,
}

/// Account snapshot returned by every investor read and mutation. Balance,
/// rate, and lifetime interest are replayed from the transaction log.
#[derive(Debug, Serialize)]
pub struct InvestorResponse {
    pub id: String,
    pub company_id: String,
    pub name: String,
    pub email: Option<String>,
    pub start_date: Date,
    pub base_rate: Decimal,
    pub current_rate: Decimal,
    pub current_balance: Decimal,
    pub lifetime_interest: Decimal,
    pub reinvesting: bool,
    pub archived: bool,
    pub transactions: Vec<Transaction>,
    pub created_at: String,
    pub updated_at: String,
}

impl InvestorResponse {
    pub fn from_account(account: &Account, created_at: String, updated_at: String) -> Self {
        let transactions = account.ledger.transactions();
        InvestorResponse {
            id: account.id.to_string(),
            company_id: account.company_id.to_string(),
            name: account.name.clone(),
            email: account.email.clone(),
            start_date: account.start_date,
            base_rate: account.base_rate,
            current_rate: account.current_rate(),
            current_balance: ledger::round_money(account.current_balance()),
            lifetime_interest: ledger::round_money(statement::total_interest(transactions)),
            reinvesting: account.reinvesting,
            archived: account.archived,
            transactions: transactions.to_vec(),
            created_at,
            updated_at,
        }
    }
}

// ============================================================================
// Transaction Mutation Types
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct AddTransactionRequest {
    pub kind: TransactionKind,
    pub date: String,
    pub amount: Decimal,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EditScopeParam {
    Single,
    ThisAndFuture,
}

impl Default for EditScopeParam {
    fn default() -> Self {
        EditScopeParam::Single
    }
}

#[derive(Debug, Deserialize)]
pub struct EditTransactionRequest {
    pub date: Option<String>,
    pub kind: Option<TransactionKind>,
    pub amount: Option<Decimal>,
    pub description: Option<String>,
    pub old_rate: Option<Decimal>,
    pub new_rate: Option<Decimal>,
    #[serde(default)]
    pub scope: EditScopeParam,
}

#[derive(Debug, Deserialize)]
pub struct RateChangeRequest {
    pub new_rate: Decimal,
    pub effective_date: String,
    pub reason: Option<String>,
    #[serde(default = "default_true")]
    pub recalculate_future: bool,
}

#[derive(Debug, Serialize)]
pub struct RateChangeResponse {
    pub repriced_entries: usize,
    pub investor: InvestorResponse,
}

#[derive(Debug, Deserialize)]
pub struct QuarterlyInterestRequest {
    pub quarter: String,
    pub year: i16,
    #[serde(default = "default_true")]
    pub reinvest: bool,
}

#[derive(Debug, Serialize)]
pub struct QuarterlyInterestResponse {
    pub interest: Decimal,
    pub investor: InvestorResponse,
}

// ============================================================================
// Statement Types
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct StatementQuery {
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct StatementResponse {
    pub investor_id: String,
    pub investor_name: String,
    pub period_start: Date,
    pub period_end: Date,
    pub rows: Vec<StatementRow>,
    pub summary: PeriodSummary,
    pub period_interest: Decimal,
    pub lifetime_interest: Decimal,
}

#[derive(Debug, Serialize)]
pub struct WeightedRateResponse {
    pub preview: Option<WeightedRatePreview>,
}
