use axum::{
    Json,
    extract::{Path, State},
};
use capledger_core::date_math::Quarter;
use capledger_core::mutation::{self, DetailsUpdate, EditScope, NewAccount, TransactionEdit};
use capledger_core::{Account, AccountId, CompanyId, Ledger, RateChangeInfo};
use jiff::civil::Date;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::error::{ApiError, ApiResult};
use crate::handlers::DbConn;
use crate::handlers::company_handlers::load_company;
use crate::models::{
    AddTransactionRequest, CreateInvestorRequest, EditScopeParam, EditTransactionRequest,
    InvestorResponse, QuarterlyInterestRequest, QuarterlyInterestResponse, RateChangeRequest,
    RateChangeResponse, UpdateInvestorRequest,
};
use crate::validation;

pub(crate) struct InvestorRow {
    pub account: Account,
    pub created_at: String,
    pub updated_at: String,
}

fn corrupt(err: impl std::fmt::Display) -> ApiError {
    ApiError::SerializationError(err.to_string())
}

pub(crate) fn load_investor(
    conn: &rusqlite::Connection,
    id: &str,
) -> Result<InvestorRow, ApiError> {
    let mut stmt = conn.prepare(
        "SELECT id, company_id, name, email, start_date, base_rate, reinvesting, archived,
                transactions, created_at, updated_at
         FROM investors WHERE id = ?1",
    )?;

    type Raw = (
        String,
        String,
        String,
        Option<String>,
        String,
        String,
        bool,
        bool,
        String,
        String,
        String,
    );
    let raw: Raw = stmt
        .query_row([id], |row| {
            Ok((
                row.get(0)?,
                row.get(1)?,
                row.get(2)?,
                row.get(3)?,
                row.get(4)?,
                row.get(5)?,
                row.get(6)?,
                row.get(7)?,
                row.get(8)?,
                row.get(9)?,
                row.get(10)?,
            ))
        })
        .map_err(|e| match e {
            rusqlite::Error::QueryReturnedNoRows => ApiError::InvestorNotFound(id.to_string()),
            _ => ApiError::from(e),
        })?;
    let (
        id_raw,
        company_raw,
        name,
        email,
        start_raw,
        rate_raw,
        reinvesting,
        archived,
        tx_json,
        created_at,
        updated_at,
    ) = raw;

    let account = Account {
        id: AccountId(Uuid::parse_str(&id_raw).map_err(corrupt)?),
        company_id: CompanyId(Uuid::parse_str(&company_raw).map_err(corrupt)?),
        name,
        email,
        start_date: start_raw.parse::<Date>().map_err(corrupt)?,
        base_rate: rate_raw.parse::<Decimal>().map_err(corrupt)?,
        reinvesting,
        archived,
        ledger: serde_json::from_str::<Ledger>(&tx_json)?,
    };

    Ok(InvestorRow {
        account,
        created_at,
        updated_at,
    })
}

/// Persist the mutated account as one terminal step; returns the new
/// `updated_at` stamp.
fn save_investor(conn: &rusqlite::Connection, account: &Account) -> Result<String, ApiError> {
    let now = chrono::Utc::now().to_rfc3339();
    conn.execute(
        "UPDATE investors
         SET name = ?1, email = ?2, start_date = ?3, base_rate = ?4, reinvesting = ?5,
             archived = ?6, transactions = ?7, updated_at = ?8
         WHERE id = ?9",
        rusqlite::params![
            account.name,
            account.email,
            account.start_date.to_string(),
            account.base_rate.to_string(),
            account.reinvesting,
            account.archived,
            serde_json::to_string(&account.ledger)?,
            now,
            account.id.to_string()
        ],
    )?;
    Ok(now)
}

pub async fn create_investor(
    State(db): State<DbConn>,
    Path(company_id): Path<String>,
    Json(req): Json<CreateInvestorRequest>,
) -> ApiResult<Json<InvestorResponse>> {
    validation::validate_name("name", &req.name)?;
    if let Some(rate) = req.interest_rate {
        validation::validate_rate("interest_rate", rate)?;
    }
    let start_date = validation::parse_date_param(&req.start_date)?;

    let conn = db.lock()?;
    let company = load_company(&conn, &company_id)?;

    let account = mutation::create_account(
        &company,
        NewAccount {
            name: req.name,
            email: req.email,
            start_date,
            initial_investment: req.initial_investment,
            interest_rate: req.interest_rate,
            reinvesting: req.reinvesting,
        },
    )?;

    let now = chrono::Utc::now().to_rfc3339();
    conn.execute(
        "INSERT INTO investors
         (id, company_id, name, email, start_date, base_rate, reinvesting, archived,
          transactions, created_at, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
        rusqlite::params![
            account.id.to_string(),
            account.company_id.to_string(),
            account.name,
            account.email,
            account.start_date.to_string(),
            account.base_rate.to_string(),
            account.reinvesting,
            account.archived,
            serde_json::to_string(&account.ledger)?,
            now,
            now
        ],
    )?;

    Ok(Json(InvestorResponse::from_account(
        &account,
        now.clone(),
        now,
    )))
}

pub async fn list_investors(
    State(db): State<DbConn>,
    Path(company_id): Path<String>,
) -> ApiResult<Json<Vec<InvestorResponse>>> {
    let conn = db.lock()?;
    load_company(&conn, &company_id)?;

    let mut stmt =
        conn.prepare("SELECT id FROM investors WHERE company_id = ?1 ORDER BY name")?;
    let ids: Vec<String> = stmt
        .query_map([&company_id], |row| row.get(0))?
        .filter_map(|r| r.ok())
        .collect();

    let mut investors = Vec::with_capacity(ids.len());
    for id in ids {
        let row = load_investor(&conn, &id)?;
        investors.push(InvestorResponse::from_account(
            &row.account,
            row.created_at,
            row.updated_at,
        ));
    }
    Ok(Json(investors))
}

pub async fn get_investor(
    State(db): State<DbConn>,
    Path(id): Path<String>,
) -> ApiResult<Json<InvestorResponse>> {
    let conn = db.lock()?;
    let row = load_investor(&conn, &id)?;
    Ok(Json(InvestorResponse::from_account(
        &row.account,
        row.created_at,
        row.updated_at,
    )))
}

pub async fn update_investor(
    State(db): State<DbConn>,
    Path(id): Path<String>,
    Json(req): Json<UpdateInvestorRequest>,
) -> ApiResult<Json<InvestorResponse>> {
    if let Some(ref name) = req.name {
        validation::validate_name("name", name)?;
    }
    let start_date = match req.start_date {
        Some(ref raw) => Some(validation::parse_date_param(raw)?),
        None => None,
    };

    let conn = db.lock()?;
    let mut row = load_investor(&conn, &id)?;

    if let Some(archived) = req.archived {
        row.account.archived = archived;
    }
    mutation::update_details(
        &mut row.account,
        DetailsUpdate {
            name: req.name,
            email: req.email,
            initial_investment: req.initial_investment,
            start_date,
        },
    )?;

    let updated_at = save_investor(&conn, &row.account)?;
    Ok(Json(InvestorResponse::from_account(
        &row.account,
        row.created_at,
        updated_at,
    )))
}

pub async fn add_transaction(
    State(db): State<DbConn>,
    Path(id): Path<String>,
    Json(req): Json<AddTransactionRequest>,
) -> ApiResult<Json<InvestorResponse>> {
    let date = validation::parse_date_param(&req.date)?;

    let conn = db.lock()?;
    let mut row = load_investor(&conn, &id)?;
    mutation::add_transaction(&mut row.account, req.kind, date, req.amount, &req.description)?;

    let updated_at = save_investor(&conn, &row.account)?;
    tracing::info!(investor = %id, kind = %req.kind, %date, "transaction added");
    Ok(Json(InvestorResponse::from_account(
        &row.account,
        row.created_at,
        updated_at,
    )))
}

pub async fn edit_transaction(
    State(db): State<DbConn>,
    Path((id, index)): Path<(String, usize)>,
    Json(req): Json<EditTransactionRequest>,
) -> ApiResult<Json<InvestorResponse>> {
    let date = match req.date {
        Some(ref raw) => Some(validation::parse_date_param(raw)?),
        None => None,
    };
    let rate_change = match (req.old_rate, req.new_rate) {
        (Some(old_rate), Some(new_rate)) => Some(RateChangeInfo {
            old_rate,
            new_rate,
            reason: None,
        }),
        _ => None,
    };
    let scope = match req.scope {
        EditScopeParam::Single => EditScope::Single,
        EditScopeParam::ThisAndFuture => EditScope::ThisAndFuture,
    };

    let conn = db.lock()?;
    let mut row = load_investor(&conn, &id)?;
    mutation::edit_transaction(
        &mut row.account,
        index,
        TransactionEdit {
            date,
            kind: req.kind,
            amount: req.amount,
            description: req.description,
            rate_change,
        },
        scope,
    )?;

    let updated_at = save_investor(&conn, &row.account)?;
    Ok(Json(InvestorResponse::from_account(
        &row.account,
        row.created_at,
        updated_at,
    )))
}

pub async fn delete_transaction(
    State(db): State<DbConn>,
    Path((id, index)): Path<(String, usize)>,
) -> ApiResult<Json<InvestorResponse>> {
    let conn = db.lock()?;
    let mut row = load_investor(&conn, &id)?;
    mutation::delete_transaction(&mut row.account, index)?;

    let updated_at = save_investor(&conn, &row.account)?;
    tracing::info!(investor = %id, index, "transaction deleted");
    Ok(Json(InvestorResponse::from_account(
        &row.account,
        row.created_at,
        updated_at,
    )))
}

pub async fn change_rate(
    State(db): State<DbConn>,
    Path(id): Path<String>,
    Json(req): Json<RateChangeRequest>,
) -> ApiResult<Json<RateChangeResponse>> {
    validation::validate_rate("new_rate", req.new_rate)?;
    let effective_date = validation::parse_date_param(&req.effective_date)?;

    let conn = db.lock()?;
    let mut row = load_investor(&conn, &id)?;
    let repriced_entries = mutation::change_rate(
        &mut row.account,
        req.new_rate,
        effective_date,
        req.reason.as_deref(),
        req.recalculate_future,
    )?;

    let updated_at = save_investor(&conn, &row.account)?;
    tracing::info!(
        investor = %id,
        new_rate = %req.new_rate,
        %effective_date,
        repriced_entries,
        "rate change posted"
    );
    Ok(Json(RateChangeResponse {
        repriced_entries,
        investor: InvestorResponse::from_account(&row.account, row.created_at, updated_at),
    }))
}

pub async fn post_quarterly_interest(
    State(db): State<DbConn>,
    Path(id): Path<String>,
    Json(req): Json<QuarterlyInterestRequest>,
) -> ApiResult<Json<QuarterlyInterestResponse>> {
    let quarter = req.quarter.parse::<Quarter>()?;

    let conn = db.lock()?;
    let mut row = load_investor(&conn, &id)?;
    let interest =
        mutation::post_quarterly_interest(&mut row.account, quarter, req.year, req.reinvest)?;

    let updated_at = save_investor(&conn, &row.account)?;
    tracing::info!(investor = %id, %quarter, year = req.year, %interest, "quarterly interest posted");
    Ok(Json(QuarterlyInterestResponse {
        interest,
        investor: InvestorResponse::from_account(&row.account, row.created_at, updated_at),
    }))
}
