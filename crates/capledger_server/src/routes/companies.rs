use axum::{
    Router,
    routing::{get, post},
};

use crate::handlers::{self, DbConn};

pub fn company_routes() -> Router<DbConn> {
    Router::new()
        .route("/api/companies", get(handlers::list_companies))
        .route("/api/companies", post(handlers::create_company))
        .route("/api/companies/{id}", get(handlers::get_company))
        // Investors grouped under their company
        .route(
            "/api/companies/{id}/investors",
            get(handlers::list_investors),
        )
        .route(
            "/api/companies/{id}/investors",
            post(handlers::create_investor),
        )
}
