use axum::{
    Json,
    extract::{Path, Query, State},
};
use capledger_core::{ledger, statement};

use crate::error::ApiResult;
use crate::handlers::DbConn;
use crate::handlers::investor_handlers::load_investor;
use crate::models::{StatementQuery, StatementResponse, WeightedRateResponse};
use crate::validation;

pub async fn get_statement(
    State(db): State<DbConn>,
    Path(id): Path<String>,
    Query(query): Query<StatementQuery>,
) -> ApiResult<Json<StatementResponse>> {
    let conn = db.lock()?;
    let row = load_investor(&conn, &id)?;
    let account = &row.account;
    let transactions = account.ledger.transactions();

    let period_start = match query.start_date {
        Some(ref raw) => validation::parse_date_param(raw)?,
        None => account.start_date,
    };
    let period_end = match query.end_date {
        Some(ref raw) => validation::parse_date_param(raw)?,
        None => transactions
            .last()
            .map(|tx| tx.date)
            .unwrap_or(account.start_date),
    };

    Ok(Json(StatementResponse {
        investor_id: account.id.to_string(),
        investor_name: account.name.clone(),
        period_start,
        period_end,
        rows: statement::running_balance_rows(transactions),
        summary: statement::period_summary(transactions, period_start, period_end),
        period_interest: ledger::round_money(statement::period_interest(
            transactions,
            period_start,
            period_end,
        )),
        lifetime_interest: ledger::round_money(statement::total_interest(transactions)),
    }))
}

pub async fn get_weighted_rate(
    State(db): State<DbConn>,
    Path(id): Path<String>,
) -> ApiResult<Json<WeightedRateResponse>> {
    let conn = db.lock()?;
    let row = load_investor(&conn, &id)?;

    let today = jiff::Zoned::now().date();
    let preview = statement::weighted_rate_for_upcoming_quarter(
        row.account.ledger.transactions(),
        row.account.base_rate,
        today,
    );

    Ok(Json(WeightedRateResponse { preview }))
}
