//! Error types for userctl-store
//!
//! Every driver failure is classified once, at the `?` boundary, and then
//! surfaces to the caller unchanged. Nothing here retries.

use std::fmt;

use sqlx::error::ErrorKind;
use thiserror::Error;

/// Result type alias for store operations
pub type Result<T> = std::result::Result<T, StoreError>;

/// Which store-enforced rule rejected a write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConstraintKind {
    Unique,
    Check,
    NotNull,
    ForeignKey,
}

impl fmt::Display for ConstraintKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Unique => "unique",
            Self::Check => "check",
            Self::NotNull => "not-null",
            Self::ForeignKey => "foreign key",
        };
        f.write_str(label)
    }
}

/// Main error type for store operations
#[derive(Error, Debug)]
pub enum StoreError {
    /// The store rejected a write (duplicate username, oversize name, ...)
    #[error("{kind} constraint violation{}: {source}", constraint_suffix(.constraint))]
    ConstraintViolation {
        kind: ConstraintKind,
        constraint: Option<String>,
        #[source]
        source: sqlx::Error,
    },

    /// The store could not be reached or the connection broke mid-operation
    #[error("store unreachable: {0}")]
    Connectivity(#[source] sqlx::Error),

    /// Any other driver failure
    #[error("database error: {0}")]
    Database(#[source] sqlx::Error),

    /// Missing or malformed configuration
    #[error("configuration error: {reason}")]
    Config { reason: String },
}

fn constraint_suffix(constraint: &Option<String>) -> String {
    constraint
        .as_deref()
        .map(|name| format!(" ({name})"))
        .unwrap_or_default()
}

impl StoreError {
    /// Create a config error
    pub fn config(reason: impl Into<String>) -> Self {
        Self::Config {
            reason: reason.into(),
        }
    }

    /// True when an insert collided with an existing unique key.
    pub fn is_duplicate_key(&self) -> bool {
        matches!(
            self,
            Self::ConstraintViolation {
                kind: ConstraintKind::Unique,
                ..
            }
        )
    }

    pub fn is_constraint_violation(&self) -> bool {
        matches!(self, Self::ConstraintViolation { .. })
    }

    pub fn is_connectivity(&self) -> bool {
        matches!(self, Self::Connectivity(_))
    }
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        let (kind, constraint) = match &err {
            sqlx::Error::Database(db) => {
                let kind = match db.kind() {
                    ErrorKind::UniqueViolation => ConstraintKind::Unique,
                    ErrorKind::CheckViolation => ConstraintKind::Check,
                    ErrorKind::NotNullViolation => ConstraintKind::NotNull,
                    ErrorKind::ForeignKeyViolation => ConstraintKind::ForeignKey,
                    _ => return Self::Database(err),
                };
                (kind, db.constraint().map(str::to_owned))
            }
            sqlx::Error::Io(_)
            | sqlx::Error::Tls(_)
            | sqlx::Error::Protocol(_)
            | sqlx::Error::PoolTimedOut
            | sqlx::Error::PoolClosed
            | sqlx::Error::WorkerCrashed => return Self::Connectivity(err),
            _ => return Self::Database(err),
        };

        tracing::debug!(%kind, ?constraint, "store rejected write");
        Self::ConstraintViolation {
            kind,
            constraint,
            source: err,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn io_errors_are_connectivity() {
        let err: StoreError =
            sqlx::Error::Io(io::Error::new(io::ErrorKind::ConnectionRefused, "refused")).into();
        assert!(err.is_connectivity());
        assert!(err.to_string().contains("store unreachable"));
    }

    #[test]
    fn pool_exhaustion_is_connectivity() {
        let err: StoreError = sqlx::Error::PoolTimedOut.into();
        assert!(matches!(err, StoreError::Connectivity(_)));

        let err: StoreError = sqlx::Error::PoolClosed.into();
        assert!(err.is_connectivity());
    }

    #[test]
    fn other_driver_errors_are_database() {
        let err: StoreError = sqlx::Error::RowNotFound.into();
        assert!(matches!(err, StoreError::Database(_)));
        assert!(!err.is_duplicate_key());
        assert!(!err.is_constraint_violation());
    }

    #[test]
    fn config_error_display() {
        let err = StoreError::config("DATABASE_URL not set");
        assert_eq!(
            err.to_string(),
            "configuration error: DATABASE_URL not set"
        );
    }

    #[test]
    fn constraint_kind_display() {
        assert_eq!(ConstraintKind::Unique.to_string(), "unique");
        assert_eq!(ConstraintKind::ForeignKey.to_string(), "foreign key");
    }
}
