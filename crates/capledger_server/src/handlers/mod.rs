pub mod company_handlers;
pub mod investor_handlers;
pub mod statement_handlers;

pub use company_handlers::*;
pub use investor_handlers::*;
pub use statement_handlers::*;

pub type DbConn = std::sync::Arc<std::sync::Mutex<rusqlite::Connection>>;
