//! Core error types for customer synchronization.
//!
//! This module defines database-agnostic error types. Storage-specific errors
//! (from Diesel, SQLite, etc.) are converted to these types by the storage layer.

use thiserror::Error;

use crate::customers::CustomerType;

/// Type alias for Result using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Root error type for the customer sync core.
///
/// Conflicts are raised by the match resolver and are fatal to the current
/// sync call. Everything else comes from the persistence layer and is passed
/// through as-is.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Sync conflict: {0}")]
    Conflict(#[from] ConflictError),

    #[error("Database operation failed: {0}")]
    Database(#[from] DatabaseError),

    #[error("Repository error: {0}")]
    Repository(String),

    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

impl Error {
    /// Returns true for the conflict-class failures raised during matching.
    pub fn is_conflict(&self) -> bool {
        matches!(self, Error::Conflict(_))
    }

    /// Returns the conflict detail when this is a conflict error.
    pub fn as_conflict(&self) -> Option<&ConflictError> {
        match self {
            Error::Conflict(conflict) => Some(conflict),
            _ => None,
        }
    }
}

/// Conflicts detected while matching an external customer to internal records.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConflictError {
    /// The matched internal record has a different customer type than the
    /// one implied by the external record.
    #[error(
        "Existing customer for external customer {external_id} already exists and is not a {}",
        expected.as_noun()
    )]
    TypeConflict {
        external_id: String,
        expected: CustomerType,
    },

    /// A record matched by company number already carries another external id.
    #[error(
        "Existing customer for company number {company_number} doesn't match external id {external_id}, instead found {existing_external_id}"
    )]
    IdentifierConflict {
        company_number: String,
        external_id: String,
        existing_external_id: String,
    },
}

impl ConflictError {
    /// Creates a TypeConflict error.
    pub fn type_conflict(external_id: impl Into<String>, expected: CustomerType) -> Self {
        Self::TypeConflict {
            external_id: external_id.into(),
            expected,
        }
    }

    /// Creates an IdentifierConflict error.
    pub fn identifier_conflict(
        company_number: impl Into<String>,
        external_id: impl Into<String>,
        existing_external_id: impl Into<String>,
    ) -> Self {
        Self::IdentifierConflict {
            company_number: company_number.into(),
            external_id: external_id.into(),
            existing_external_id: existing_external_id.into(),
        }
    }

    pub fn is_type_conflict(&self) -> bool {
        matches!(self, Self::TypeConflict { .. })
    }

    pub fn is_identifier_conflict(&self) -> bool {
        matches!(self, Self::IdentifierConflict { .. })
    }
}

/// Database-agnostic error type for storage operations.
///
/// This enum uses `String` for all error details, allowing the storage layer
/// to convert storage-specific errors (Diesel, SQLite, etc.) into this format.
#[derive(Error, Debug)]
pub enum DatabaseError {
    /// Failed to establish a database connection.
    #[error("Failed to connect to database: {0}")]
    ConnectionFailed(String),

    /// Failed to create or configure the connection pool.
    #[error("Failed to create database pool: {0}")]
    PoolCreationFailed(String),

    /// A database query failed to execute.
    #[error("Database query failed: {0}")]
    QueryFailed(String),

    /// The requested record was not found.
    #[error("Record not found: {0}")]
    NotFound(String),

    /// A unique constraint was violated (e.g., duplicate key).
    #[error("Unique constraint violation: {0}")]
    UniqueViolation(String),

    /// Database migration failed.
    #[error("Database migration failed: {0}")]
    MigrationFailed(String),

    /// Internal/unexpected database error.
    #[error("Internal database error: {0}")]
    Internal(String),
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Database(DatabaseError::Internal(err.to_string()))
    }
}
