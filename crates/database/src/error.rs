use sea_orm::DbErr;
use std::fmt;

/// Failures surfaced by the store layer.
///
/// The first three variants carry the name of the offending input field so
/// callers can report errors against the field that caused them.
#[derive(Debug)]
pub enum StoreError {
    /// A field value failed a constraint check
    Validation {
        field: &'static str,
        message: String,
    },
    /// A unique field collided with an existing row
    Uniqueness {
        field: &'static str,
        message: String,
    },
    /// A referenced row does not exist
    Reference {
        field: &'static str,
        message: String,
    },
    /// The requested row does not exist
    NotFound(&'static str),
    /// The underlying database failed
    Database(DbErr),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::Validation { field, message } => {
                write!(f, "invalid {field}: {message}")
            }
            StoreError::Uniqueness { field, message } => {
                write!(f, "conflicting {field}: {message}")
            }
            StoreError::Reference { field, message } => {
                write!(f, "unknown {field}: {message}")
            }
            StoreError::NotFound(entity) => write!(f, "{entity} not found"),
            StoreError::Database(err) => write!(f, "database error: {err}"),
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StoreError::Database(err) => Some(err),
            _ => None,
        }
    }
}

impl From<DbErr> for StoreError {
    fn from(err: DbErr) -> Self {
        StoreError::Database(err)
    }
}
