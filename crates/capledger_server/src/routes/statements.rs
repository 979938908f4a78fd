use axum::{Router, routing::get};

use crate::handlers::{self, DbConn};

pub fn statement_routes() -> Router<DbConn> {
    Router::new()
        .route(
            "/api/investors/{id}/statement",
            get(handlers::get_statement),
        )
        .route(
            "/api/investors/{id}/weighted-rate",
            get(handlers::get_weighted_rate),
        )
}
