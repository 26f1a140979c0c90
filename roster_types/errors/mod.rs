use thiserror::Error;

pub mod app_error;
pub mod db_error;

pub use app_error::AppError;
pub use db_error::{BackendError, DbError};

pub type Result<T, E = ApplicationError> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum ApplicationError {
    #[error(transparent)]
    App(#[from] AppError),

    #[error(transparent)]
    Db(#[from] DbError),

    #[error("Infrastructure error: {0}")]
    Infrastructure(String),
}

/// Backend-agnostic classification of a failure, used by callers to pick a
/// transport-level outcome without looking at backend details.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Duplicate,
    NotFound,
    Schema,
    Canceled,
    Invalid,
    Backend,
}

impl ApplicationError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ApplicationError::Db(e) => e.kind(),
            ApplicationError::App(_) => ErrorKind::Invalid,
            ApplicationError::Infrastructure(_) => ErrorKind::Backend,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::PlayerSelector;

    #[test]
    fn test_kind_follows_wrapped_error() {
        let not_found: ApplicationError =
            DbError::PlayerNotFound(PlayerSelector::ByKey("leo-messi".into())).into();
        assert_eq!(not_found.kind(), ErrorKind::NotFound);
        assert_eq!(not_found.to_string(), "Player with key 'leo-messi' not found");

        let duplicate: ApplicationError = DbError::Duplicate("Leo Messi".to_string()).into();
        assert_eq!(duplicate.kind(), ErrorKind::Duplicate);

        let invalid: ApplicationError = AppError::MissingField("position").into();
        assert_eq!(invalid.kind(), ErrorKind::Invalid);

        let malformed: ApplicationError = AppError::InvalidPayload("expected value".into()).into();
        assert_eq!(malformed.kind(), ErrorKind::Invalid);

        let infra = ApplicationError::Infrastructure("bind failed".to_string());
        assert_eq!(infra.kind(), ErrorKind::Backend);
    }

    #[test]
    fn test_cancellation_kinds() {
        assert_eq!(
            ApplicationError::from(DbError::Canceled).kind(),
            ErrorKind::Canceled
        );
        assert_eq!(
            ApplicationError::from(DbError::DeadlineExceeded).kind(),
            ErrorKind::Canceled
        );
    }
}
