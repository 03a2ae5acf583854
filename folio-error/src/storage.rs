use sea_orm::{DbErr, SqlErr};
use thiserror::Error;

#[derive(Error, Debug, Default)]
pub enum StorageError {
    #[error("database unavailable")]
    #[default]
    StorageUnavailable,

    #[error("database error: `{0}`")]
    DBError(DbErr),

    #[error("entity not found: {0}")]
    EntityNotFound(String),

    /// A unique constraint rejected the write (duplicate slug, email, token...).
    #[error("{0}")]
    Conflict(String),

    /// The row exists but is not in a state that allows the requested change.
    #[error("{0}")]
    InvalidState(String),
}

impl StorageError {
    /// Map a database error raised while writing `what`.
    ///
    /// Unique-constraint violations become [`StorageError::Conflict`] carrying a
    /// message that names the offending entity; everything else stays a `DBError`.
    pub fn from_db(err: DbErr, what: &str) -> Self {
        match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(_)) => {
                StorageError::Conflict(format!("{what} already exists"))
            }
            _ => StorageError::DBError(err),
        }
    }

    #[inline]
    pub fn is_conflict(&self) -> bool {
        matches!(self, StorageError::Conflict(_))
    }
}

impl From<DbErr> for StorageError {
    #[inline]
    fn from(e: DbErr) -> Self {
        StorageError::from_db(e, "record")
    }
}
