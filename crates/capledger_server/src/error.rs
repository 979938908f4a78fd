use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use capledger_core::LedgerError;
use serde_json::json;

/// Custom error types for the CapLedger API
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Company not found: {0}")]
    CompanyNotFound(String),

    #[error("Investor not found: {0}")]
    InvestorNotFound(String),

    #[error("{0}")]
    Ledger(#[from] LedgerError),

    #[error("Invalid parameter: {field} - {message}")]
    ValidationError { field: String, message: String },

    #[error("Persistence failure: {0}")]
    PersistenceFailure(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("Mutex lock error")]
    LockError,
}

impl From<rusqlite::Error> for ApiError {
    fn from(err: rusqlite::Error) -> Self {
        ApiError::PersistenceFailure(err.to_string())
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::SerializationError(err.to_string())
    }
}

impl<T> From<std::sync::PoisonError<T>> for ApiError {
    fn from(_: std::sync::PoisonError<T>) -> Self {
        ApiError::LockError
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_message) = match &self {
            ApiError::CompanyNotFound(_) | ApiError::InvestorNotFound(_) => {
                (StatusCode::NOT_FOUND, self.to_string())
            }

            ApiError::Ledger(err) => {
                let status = match err {
                    LedgerError::InvalidAmount(_) | LedgerError::InvalidDate(_) => {
                        StatusCode::BAD_REQUEST
                    }
                    LedgerError::InvariantViolation(_) => StatusCode::CONFLICT,
                    LedgerError::NotFound(_) => StatusCode::NOT_FOUND,
                };
                (status, self.to_string())
            }

            ApiError::ValidationError { .. } => (StatusCode::BAD_REQUEST, self.to_string()),

            ApiError::SerializationError(_) => (StatusCode::BAD_REQUEST, self.to_string()),

            ApiError::PersistenceFailure(_) => {
                tracing::error!("{self}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal persistence error".to_string(),
                )
            }

            ApiError::LockError => {
                tracing::error!("{self}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}

/// Helper type for API results
pub type ApiResult<T> = Result<T, ApiError>;
