use thiserror::Error;

use crate::common::PlayerSelector;

use super::ErrorKind;

/// Error type of the relational backend driver.
pub use sqlx::Error as BackendError;

/// Errors for db stuff.
#[derive(Debug, Error)]
pub enum DbError {
    #[error("Player '{0}' already exists")]
    Duplicate(String),

    #[error("Player with {0} not found")]
    PlayerNotFound(PlayerSelector),

    #[error("Player has no key to be stored under")]
    MissingKey,

    #[error("Schema could not be prepared: {0}")]
    Schema(#[source] BackendError),

    #[error(transparent)]
    Database(#[from] BackendError),

    #[error("Row could not be decoded: {0}")]
    Decode(#[source] BackendError),

    #[error("Operation canceled")]
    Canceled,

    #[error("Operation deadline exceeded")]
    DeadlineExceeded,
}

impl DbError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            DbError::Duplicate(_) => ErrorKind::Duplicate,
            DbError::PlayerNotFound(_) => ErrorKind::NotFound,
            DbError::MissingKey => ErrorKind::Invalid,
            DbError::Schema(_) => ErrorKind::Schema,
            DbError::Canceled | DbError::DeadlineExceeded => ErrorKind::Canceled,
            DbError::Database(_) | DbError::Decode(_) => ErrorKind::Backend,
        }
    }
}
