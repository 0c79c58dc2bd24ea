//! Error type for the event aggregate service.

use devevents_db::DbError;
use devevents_types::EventId;

/// Errors returned by [`crate::EventService`].
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    /// No event with this id exists.
    #[error("event not found: {0}")]
    NotFound(EventId),

    /// A transactional write failed and was rolled back.
    #[error("transaction failed: {0}")]
    TransactionFailure(String),

    /// The request input failed validation.
    #[error("invalid input: {0}")]
    Validation(#[from] validator::ValidationErrors),

    /// Any other storage failure.
    #[error("storage error: {0}")]
    Storage(DbError),
}

impl From<DbError> for ServiceError {
    fn from(error: DbError) -> Self {
        match error {
            DbError::NotFound(id) => Self::NotFound(id),
            DbError::Transaction(detail) => Self::TransactionFailure(detail),
            other => Self::Storage(other),
        }
    }
}
