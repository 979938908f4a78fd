use axum::{
    Json,
    extract::{Path, State},
};
use capledger_core::{Company, CompanyId};
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::error::{ApiError, ApiResult};
use crate::handlers::DbConn;
use crate::models::{CompanyListItem, CompanyRecord, CreateCompanyRequest};
use crate::validation;

pub(crate) fn load_company(conn: &rusqlite::Connection, id: &str) -> Result<Company, ApiError> {
    let mut stmt = conn.prepare("SELECT id, name, default_rate FROM companies WHERE id = ?1")?;
    let (id_raw, name, rate_raw): (String, String, String) = stmt
        .query_row([id], |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?)))
        .map_err(|e| match e {
            rusqlite::Error::QueryReturnedNoRows => ApiError::CompanyNotFound(id.to_string()),
            _ => ApiError::from(e),
        })?;

    Ok(Company {
        id: CompanyId(
            Uuid::parse_str(&id_raw).map_err(|e| ApiError::SerializationError(e.to_string()))?,
        ),
        name,
        default_rate: rate_raw
            .parse::<Decimal>()
            .map_err(|e| ApiError::SerializationError(e.to_string()))?,
    })
}

pub async fn list_companies(State(db): State<DbConn>) -> ApiResult<Json<Vec<CompanyListItem>>> {
    let conn = db.lock()?;
    let mut stmt = conn.prepare(
        "SELECT c.id, c.name, c.default_rate, c.created_at, c.updated_at,
                (SELECT COUNT(*) FROM investors i WHERE i.company_id = c.id)
         FROM companies c ORDER BY c.name",
    )?;

    let companies = stmt
        .query_map([], |row| {
            let rate: String = row.get(2)?;
            let count: i64 = row.get(5)?;
            Ok(CompanyListItem {
                id: row.get(0)?,
                name: row.get(1)?,
                default_rate: rate.parse().unwrap_or_default(),
                investor_count: count as usize,
                created_at: row.get(3)?,
                updated_at: row.get(4)?,
            })
        })?
        .filter_map(|r| r.ok())
        .collect();

    Ok(Json(companies))
}

pub async fn create_company(
    State(db): State<DbConn>,
    Json(req): Json<CreateCompanyRequest>,
) -> ApiResult<Json<CompanyRecord>> {
    validation::validate_name("name", &req.name)?;
    validation::validate_rate("default_rate", req.default_rate)?;

    let id = Uuid::new_v4().to_string();
    let now = chrono::Utc::now().to_rfc3339();

    let conn = db.lock()?;
    conn.execute(
        "INSERT INTO companies (id, name, default_rate, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5)",
        rusqlite::params![id, req.name, req.default_rate.to_string(), now, now],
    )?;

    Ok(Json(CompanyRecord {
        id,
        name: req.name,
        default_rate: req.default_rate,
        created_at: now.clone(),
        updated_at: now,
    }))
}

pub async fn get_company(
    State(db): State<DbConn>,
    Path(id): Path<String>,
) -> ApiResult<Json<CompanyRecord>> {
    let conn = db.lock()?;
    let mut stmt = conn.prepare(
        "SELECT id, name, default_rate, created_at, updated_at FROM companies WHERE id = ?1",
    )?;

    let record = stmt
        .query_row([&id], |row| {
            let rate: String = row.get(2)?;
            Ok(CompanyRecord {
                id: row.get(0)?,
                name: row.get(1)?,
                default_rate: rate.parse().unwrap_or_default(),
                created_at: row.get(3)?,
                updated_at: row.get(4)?,
            })
        })
        .map_err(|e| match e {
            rusqlite::Error::QueryReturnedNoRows => ApiError::CompanyNotFound(id.clone()),
            _ => ApiError::from(e),
        })?;

    Ok(Json(record))
}
