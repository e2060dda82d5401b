use sqlx::migrate::MigrateError;
use thiserror::Error;

/// Top-level error type for the reconciler
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Ledger error: {0}")]
    Ledger(#[from] LedgerError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Errors raised while talking to the Horizon API.
///
/// `NotFound` is only produced by account lookups. A transaction that the
/// ledger does not know yet is a valid answer, see `LedgerOutcome::NotFound`.
#[derive(Error, Debug)]
pub enum LedgerError {
    #[error("Ledger temporarily unavailable: {0}")]
    Transient(String),

    #[error("Malformed ledger response: {0}")]
    Malformed(String),

    #[error("Ledger entry not found: {0}")]
    NotFound(String),
}

impl LedgerError {
    pub fn is_transient(&self) -> bool {
        matches!(self, LedgerError::Transient(_))
    }
}

/// Transaction store errors
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Transaction store unavailable: {0}")]
    Unavailable(String),

    #[error("Transaction not found: {0}")]
    NotFound(String),

    #[error("Failed to decode stored record: {0}")]
    Decode(String),
}

impl From<sqlx::Error> for StoreError {
    fn from(error: sqlx::Error) -> Self {
        match error {
            sqlx::Error::RowNotFound => StoreError::NotFound("row not found".to_string()),
            sqlx::Error::ColumnDecode { .. } | sqlx::Error::Decode(_) | sqlx::Error::TypeNotFound { .. } => {
                StoreError::Decode(error.to_string())
            }
            other => StoreError::Unavailable(other.to_string()),
        }
    }
}

impl From<sqlx::Error> for AppError {
    fn from(error: sqlx::Error) -> Self {
        AppError::Store(error.into())
    }
}

impl From<MigrateError> for AppError {
    fn from(error: MigrateError) -> Self {
        AppError::Store(StoreError::Unavailable(format!("Migration error: {:?}", error)))
    }
}

impl From<reqwest::Error> for LedgerError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_decode() {
            LedgerError::Malformed(format!("HTTP body decode error: {}", error))
        } else {
            LedgerError::Transient(format!("HTTP request error: {}", error))
        }
    }
}

impl From<reqwest::Error> for AppError {
    fn from(error: reqwest::Error) -> Self {
        AppError::Ledger(error.into())
    }
}

impl From<rust_decimal::Error> for LedgerError {
    fn from(error: rust_decimal::Error) -> Self {
        LedgerError::Malformed(format!("Decimal conversion error: {:?}", error))
    }
}

impl From<config::ConfigError> for AppError {
    fn from(error: config::ConfigError) -> Self {
        AppError::Config(error.to_string())
    }
}

/// Result type alias for the application
pub type AppResult<T> = Result<T, AppError>;
