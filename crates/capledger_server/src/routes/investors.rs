use axum::{
    Router,
    routing::{delete, get, post, put},
};

use crate::handlers::{self, DbConn};

pub fn investor_routes() -> Router<DbConn> {
    Router::new()
        .route("/api/investors/{id}", get(handlers::get_investor))
        .route("/api/investors/{id}", put(handlers::update_investor))
        // Ledger mutations
        .route(
            "/api/investors/{id}/transactions",
            post(handlers::add_transaction),
        )
        .route(
            "/api/investors/{id}/transactions/{index}",
            put(handlers::edit_transaction),
        )
        .route(
            "/api/investors/{id}/transactions/{index}",
            delete(handlers::delete_transaction),
        )
        .route(
            "/api/investors/{id}/rate-change",
            post(handlers::change_rate),
        )
        .route(
            "/api/investors/{id}/quarterly-interest",
            post(handlers::post_quarterly_interest),
        )
}
