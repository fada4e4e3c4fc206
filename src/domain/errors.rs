//! Domain error types
//!
//! These errors are framework-agnostic and represent business-level failures.

use std::fmt;

use sea_orm::{DbErr, RuntimeErr, SqlErr};
use serde::{Deserialize, Serialize};

/// A single failed validation rule, keyed by the JSON field name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: &str, message: impl Into<String>) -> Self {
        Self {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

#[derive(Debug)]
pub enum DomainError {
    /// Resource not found
    NotFound,
    /// One or more input fields failed validation
    Validation(Vec<FieldError>),
    /// The database refused the change (record still referenced, duplicate key)
    Conflict(String),
    /// Missing or invalid credentials
    Unauthorized,
    /// Authenticated, but the store belongs to someone else
    Forbidden,
    /// Database/persistence error
    Database(String),
    /// Generic internal error
    Internal(String),
}

impl DomainError {
    pub fn invalid(field: &str, message: impl Into<String>) -> Self {
        DomainError::Validation(vec![FieldError::new(field, message)])
    }
}

impl fmt::Display for DomainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DomainError::NotFound => write!(f, "Resource not found"),
            DomainError::Validation(errors) => {
                let fields: Vec<String> = errors
                    .iter()
                    .map(|e| format!("{}: {}", e.field, e.message))
                    .collect();
                write!(f, "Validation error: {}", fields.join("; "))
            }
            DomainError::Conflict(msg) => write!(f, "Conflict: {}", msg),
            DomainError::Unauthorized => write!(f, "Unauthenticated"),
            DomainError::Forbidden => write!(f, "Unauthorized"),
            DomainError::Database(msg) => write!(f, "Database error: {}", msg),
            DomainError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for DomainError {}

/// SQLite extended code for a violated `ON DELETE RESTRICT` action
const SQLITE_CONSTRAINT_TRIGGER: &str = "1811";

/// Constraint failures that `DbErr::sql_err` does not classify
fn restrict_violation(e: &DbErr) -> Option<String> {
    let runtime = match e {
        DbErr::Exec(err) | DbErr::Query(err) => err,
        _ => return None,
    };
    let RuntimeErr::SqlxError(sqlx::Error::Database(db_err)) = runtime else {
        return None;
    };

    let is_restrict = db_err.code().as_deref() == Some(SQLITE_CONSTRAINT_TRIGGER)
        || db_err.message().contains("FOREIGN KEY constraint failed");
    is_restrict.then(|| db_err.message().to_string())
}

// Constraint violations surface as conflicts, everything else as a database failure
impl From<DbErr> for DomainError {
    fn from(e: DbErr) -> Self {
        match e.sql_err() {
            Some(SqlErr::ForeignKeyConstraintViolation(msg)) => DomainError::Conflict(msg),
            Some(SqlErr::UniqueConstraintViolation(msg)) => DomainError::Conflict(msg),
            _ => match restrict_violation(&e) {
                Some(msg) => DomainError::Conflict(msg),
                None => DomainError::Database(e.to_string()),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unrelated_db_errors_stay_database_errors() {
        let err = DomainError::from(DbErr::RecordNotFound("gone".into()));
        assert!(matches!(err, DomainError::Database(_)));

        let err = DomainError::from(DbErr::Custom("boom".into()));
        assert!(matches!(err, DomainError::Database(_)));
    }
}
