//! Database error types.

use reward_core::StoreError;
use thiserror::Error;

/// Errors that can occur during database operations.
#[derive(Debug, Error)]
pub enum DatabaseError {
    /// SQLx error (connection, query, etc.)
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    /// Migration error
    #[error("migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// Record not found
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    /// Record already exists
    #[error("{entity} already exists: {id}")]
    AlreadyExists { entity: &'static str, id: String },

    /// Stored record failed validation (bad multiplier, unparsable
    /// timestamp or quest type list). Never silently defaulted over.
    #[error("malformed {entity} record: {detail}")]
    Malformed {
        entity: &'static str,
        detail: String,
    },
}

/// Result type for database operations.
pub type Result<T> = std::result::Result<T, DatabaseError>;

impl DatabaseError {
    /// Whether the underlying SQLite error is in the BUSY/LOCKED family,
    /// i.e. a concurrent writer held the lock.
    pub fn is_lock_contention(&self) -> bool {
        let DatabaseError::Sqlx(sqlx::Error::Database(db_err)) = self else {
            return false;
        };
        // SQLITE_BUSY (5) / SQLITE_LOCKED (6) and their extended codes.
        matches!(
            db_err.code().as_deref(),
            Some("5" | "6" | "261" | "262" | "517")
        )
    }
}

impl From<DatabaseError> for StoreError {
    fn from(err: DatabaseError) -> Self {
        if err.is_lock_contention() {
            return StoreError::Conflict(err.to_string());
        }
        match err {
            DatabaseError::NotFound { entity, id } => StoreError::NotFound { entity, id },
            DatabaseError::Malformed { entity, detail } => StoreError::Malformed { entity, detail },
            other => StoreError::Unavailable(other.to_string()),
        }
    }
}
