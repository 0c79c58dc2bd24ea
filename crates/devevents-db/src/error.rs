//! Error types for the data layer.
//!
//! All repository operations report failures via [`DbError`]. Store-specific
//! errors are classified so callers can tell a missing event from a broken
//! transaction without inspecting driver internals.

use devevents_types::EventId;

/// `PostgreSQL` SQLSTATE for a value that does not fit its column.
const SQLSTATE_STRING_TRUNCATION: &str = "22001";

/// `PostgreSQL` SQLSTATE class for integrity constraint violations.
const SQLSTATE_INTEGRITY_CLASS: &str = "23";

/// Errors that can occur in the data layer.
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    /// No event with this id exists.
    #[error("event not found: {0}")]
    NotFound(EventId),

    /// A multi-step write failed after it started and was rolled back.
    #[error("transaction failed: {0}")]
    Transaction(String),

    /// A write violated a storage constraint (column length, foreign key).
    #[error("constraint violated: {0}")]
    Constraint(String),

    /// The store could not be reached.
    #[error("store unavailable: {0}")]
    Unavailable(String),

    /// A `PostgreSQL` operation failed.
    #[error("PostgreSQL error: {0}")]
    Postgres(#[from] sqlx::Error),

    /// A `PostgreSQL` migration failed.
    #[error("PostgreSQL migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// A configuration error.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl DbError {
    /// Classify a driver error raised by a single-statement write.
    pub(crate) fn from_write(error: sqlx::Error) -> Self {
        if let Some(db) = error.as_database_error() {
            let code = db.code().unwrap_or_default();
            if code == SQLSTATE_STRING_TRUNCATION || code.starts_with(SQLSTATE_INTEGRITY_CLASS) {
                return Self::Constraint(db.message().to_owned());
            }
        }
        if matches!(
            error,
            sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_)
        ) {
            return Self::Unavailable(error.to_string());
        }
        Self::Postgres(error)
    }
}
