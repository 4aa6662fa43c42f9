use sea_orm::{DbErr, SqlErr};
use thiserror::Error;

/// Failure kinds surfaced by the data-access layer. Callers that only care
/// about the old boolean contract can just check `is_ok()`.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("database connection failed: {0}")]
    Connection(String),
    #[error("constraint violation: {0}")]
    Constraint(String),
    #[error("record not found")]
    NotFound,
    #[error("database error: {0}")]
    Backend(String),
}

impl From<DbErr> for DataError {
    fn from(err: DbErr) -> Self {
        if let Some(sql_err) = err.sql_err() {
            return match sql_err {
                SqlErr::UniqueConstraintViolation(msg) => DataError::Constraint(msg),
                SqlErr::ForeignKeyConstraintViolation(msg) => DataError::Constraint(msg),
                _ => DataError::Backend(err.to_string()),
            };
        }

        match err {
            DbErr::Conn(_) | DbErr::ConnectionAcquire(_) => DataError::Connection(err.to_string()),
            DbErr::RecordNotFound(_) | DbErr::RecordNotUpdated => DataError::NotFound,
            other => DataError::Backend(other.to_string()),
        }
    }
}
