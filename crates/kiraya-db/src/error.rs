//! # Storage Error Types
//!
//! Error types for database operations.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  SQLite Error (sqlx::Error)                                            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  StoreError (this module) ← transport/query failures                   │
//! │       │         ▲                                                       │
//! │       │         └── Domain(CoreError) ← business rule violations       │
//! │       ▼              raised inside transactions (InsufficientStock,    │
//! │  Caller              AlreadySettled, ...)                              │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Transport failures are never silently swallowed, and because both guarded
//! operations run inside a single transaction, a failure never leaves
//! inventory or rental state partially mutated.

use thiserror::Error;

use kiraya_core::{CoreError, ValidationError};

/// Database operation errors.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A business rule violation surfaced by a repository operation.
    ///
    /// Carries the full domain taxonomy: ItemNotFound, InsufficientStock,
    /// RentalNotFound, AlreadySettled, Validation.
    #[error(transparent)]
    Domain(#[from] CoreError),

    /// The store cannot be reached (connection, pool, permission failure).
    ///
    /// Recoverable by user-visible retry; nothing was mutated.
    #[error("Store unavailable: {0}")]
    Unavailable(String),

    /// Query execution failed.
    #[error("Query failed: {0}")]
    QueryFailed(String),

    /// Migration failed.
    #[error("Migration failed: {0}")]
    MigrationFailed(String),
}

/// Convert sqlx errors to StoreError.
///
/// ## Error Mapping
/// ```text
/// sqlx::Error::PoolTimedOut  → StoreError::Unavailable
/// sqlx::Error::PoolClosed    → StoreError::Unavailable
/// sqlx::Error::Io            → StoreError::Unavailable
/// Other                      → StoreError::QueryFailed
/// ```
impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::PoolTimedOut => {
                StoreError::Unavailable("connection pool exhausted".to_string())
            }
            sqlx::Error::PoolClosed => StoreError::Unavailable("pool is closed".to_string()),
            sqlx::Error::Io(io_err) => StoreError::Unavailable(io_err.to_string()),
            _ => StoreError::QueryFailed(err.to_string()),
        }
    }
}

impl From<sqlx::migrate::MigrateError> for StoreError {
    fn from(err: sqlx::migrate::MigrateError) -> Self {
        StoreError::MigrationFailed(err.to_string())
    }
}

/// Validation failures are domain errors.
impl From<ValidationError> for StoreError {
    fn from(err: ValidationError) -> Self {
        StoreError::Domain(CoreError::Validation(err))
    }
}

/// Result type for database operations.
pub type StoreResult<T> = Result<T, StoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_domain_error_is_transparent() {
        let err: StoreError = CoreError::RentalNotFound("r-1".to_string()).into();
        assert_eq!(err.to_string(), "Rental not found: r-1");
    }

    #[test]
    fn test_validation_error_wraps_as_domain() {
        let err: StoreError = ValidationError::Required {
            field: "customer name".to_string(),
        }
        .into();
        assert!(matches!(err, StoreError::Domain(CoreError::Validation(_))));
    }

    #[test]
    fn test_pool_errors_map_to_unavailable() {
        let err: StoreError = sqlx::Error::PoolTimedOut.into();
        assert!(matches!(err, StoreError::Unavailable(_)));
    }
}
