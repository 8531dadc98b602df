use sea_orm::error::DbErr;
use serde::Serialize;

/// Error type shared by every reconciliation operation.
///
/// Each operation either fully commits or fully rolls back; a returned
/// error always means "no effect was persisted".
#[derive(Debug, thiserror::Error, Serialize)]
pub enum ServiceError {
    #[error("Database error: {0}")]
    DatabaseError(
        #[from]
        #[serde(skip)]
        sea_orm::error::DbErr,
    ),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid status: {0}")]
    InvalidStatus(String),

    #[error("Insufficient stock: {0}")]
    InsufficientStock(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Event error: {0}")]
    EventError(String),

    #[error("Internal error: {0}")]
    InternalError(String),

    #[error("Other error: {0}")]
    Other(
        #[from]
        #[serde(skip)]
        anyhow::Error,
    ),
}

pub trait IntoDbErr {
    fn into_db_err(self) -> DbErr;
}

impl IntoDbErr for DbErr {
    fn into_db_err(self) -> DbErr {
        self
    }
}

impl IntoDbErr for String {
    fn into_db_err(self) -> DbErr {
        DbErr::Custom(self)
    }
}

impl IntoDbErr for &str {
    fn into_db_err(self) -> DbErr {
        DbErr::Custom(self.to_string())
    }
}

impl ServiceError {
    /// Generic constructor that normalizes any supported database error input.
    pub fn db_error<E: IntoDbErr>(error: E) -> Self {
        ServiceError::DatabaseError(error.into_db_err())
    }

    /// True when retrying the same call can never succeed (caller bug,
    /// missing row, or a workflow entity already in a terminal state).
    pub fn is_permanent(&self) -> bool {
        matches!(
            self,
            Self::NotFound(_)
                | Self::InvalidStatus(_)
                | Self::InsufficientStock(_)
                | Self::ValidationError(_)
        )
    }
}

/// Collapses sea-orm's transaction error wrapper back into `ServiceError`.
///
/// Connection-level failures become `DatabaseError`; errors raised inside
/// the closure pass through unchanged.
pub fn from_transaction_error(err: sea_orm::TransactionError<ServiceError>) -> ServiceError {
    match err {
        sea_orm::TransactionError::Connection(db_err) => ServiceError::db_error(db_err),
        sea_orm::TransactionError::Transaction(service_err) => service_err,
    }
}

impl From<validator::ValidationErrors> for ServiceError {
    fn from(err: validator::ValidationErrors) -> Self {
        ServiceError::ValidationError(err.to_string())
    }
}
