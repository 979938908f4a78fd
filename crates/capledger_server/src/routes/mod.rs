pub mod companies;
pub mod investors;
pub mod statements;

pub use companies::company_routes;
pub use investors::investor_routes;
pub use statements::statement_routes;
