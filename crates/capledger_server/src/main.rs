mod db;
mod error;
mod handlers;
mod models;
mod routes;
mod validation;

use axum::{Router, routing::get};
use rusqlite::Connection;
use std::sync::{Arc, Mutex};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing_subscriber::EnvFilter;

use crate::handlers::DbConn;

#[tokio::main]
async fn main() {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("capledger_server=info,tower_http=info"));
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let conn = Connection::open("capledger.db").expect("Failed to open database");
    db::init_db(&conn).expect("Failed to initialize schema");
    let db: DbConn = Arc::new(Mutex::new(conn));

    let app = Router::new()
        .route("/", get(|| async { "CapLedger API Server" }))
        .merge(routes::company_routes())
        .merge(routes::investor_routes())
        .merge(routes::statement_routes())
        .with_state(db)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let listener = tokio::net::TcpListener::bind("0.0.0.0:3001")
        .await
        .expect("Failed to bind");
    tracing::info!("listening on {}", listener.local_addr().unwrap());
    axum::serve(listener, app).await.expect("Server error");
}
