use roster_types::{
    common::PlayerSelector,
    errors::{BackendError, DbError, ErrorKind},
};

/// PostgreSQL SQLSTATE for `unique_violation`.
const UNIQUE_VIOLATION: &str = "23505";

/// Maps a driver error onto the backend-agnostic error kinds.
pub fn classify_backend_error(err: &BackendError) -> ErrorKind {
    match err {
        BackendError::RowNotFound => ErrorKind::NotFound,
        BackendError::Database(db_err) if db_err.code().as_deref() == Some(UNIQUE_VIOLATION) => {
            ErrorKind::Duplicate
        }
        _ => ErrorKind::Backend,
    }
}

fn is_decode_error(err: &BackendError) -> bool {
    matches!(
        err,
        BackendError::ColumnDecode { .. }
            | BackendError::Decode(_)
            | BackendError::ColumnNotFound(_)
            | BackendError::ColumnIndexOutOfBounds { .. }
    )
}

/// Converts a driver error raised while operating on `selector` into a `DbError`.
pub(crate) fn into_db_error(err: BackendError, selector: PlayerSelector) -> DbError {
    match classify_backend_error(&err) {
        ErrorKind::Duplicate => {
            tracing::warn!("Unique constraint violated for player {selector}");
            DbError::Duplicate(subject(&selector))
        }
        ErrorKind::NotFound => DbError::PlayerNotFound(selector),
        _ if is_decode_error(&err) => DbError::Decode(err),
        _ => DbError::Database(err),
    }
}

/// Converts a driver error raised while scanning the whole table.
pub(crate) fn into_scan_error(err: BackendError) -> DbError {
    if is_decode_error(&err) {
        DbError::Decode(err)
    } else {
        DbError::Database(err)
    }
}

fn subject(selector: &PlayerSelector) -> String {
    match selector {
        PlayerSelector::ByKey(key) => key.to_string(),
        PlayerSelector::ByName {
            first_name,
            last_name,
        } => format!("{first_name} {last_name}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::error::{DatabaseError, ErrorKind as SqlxErrorKind};
    use std::{borrow::Cow, error::Error as StdError, fmt};

    #[derive(Debug)]
    struct FakePgError {
        code: &'static str,
    }

    impl fmt::Display for FakePgError {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "fake error {}", self.code)
        }
    }

    impl StdError for FakePgError {}

    impl DatabaseError for FakePgError {
        fn message(&self) -> &str {
            "fake error"
        }

        fn code(&self) -> Option<Cow<'_, str>> {
            Some(Cow::Borrowed(self.code))
        }

        fn as_error(&self) -> &(dyn StdError + Send + Sync + 'static) {
            self
        }

        fn as_error_mut(&mut self) -> &mut (dyn StdError + Send + Sync + 'static) {
            self
        }

        fn into_error(self: Box<Self>) -> Box<dyn StdError + Send + Sync + 'static> {
            self
        }

        fn kind(&self) -> SqlxErrorKind {
            SqlxErrorKind::Other
        }
    }

    fn pg_error(code: &'static str) -> BackendError {
        BackendError::Database(Box::new(FakePgError { code }))
    }

    #[test]
    fn test_classify_unique_violation() {
        assert_eq!(classify_backend_error(&pg_error("23505")), ErrorKind::Duplicate);
        // not_null_violation stays opaque
        assert_eq!(classify_backend_error(&pg_error("23502")), ErrorKind::Backend);
    }

    #[test]
    fn test_classify_other_errors() {
        assert_eq!(
            classify_backend_error(&BackendError::RowNotFound),
            ErrorKind::NotFound
        );
        assert_eq!(
            classify_backend_error(&BackendError::PoolTimedOut),
            ErrorKind::Backend
        );
    }

    #[test]
    fn test_into_db_error() {
        let dup = into_db_error(pg_error("23505"), PlayerSelector::by_name("Leo", "Messi"));
        assert!(matches!(&dup, DbError::Duplicate(name) if name == "Leo Messi"));

        let missing = into_db_error(BackendError::RowNotFound, PlayerSelector::ByKey("7".into()));
        assert!(matches!(missing, DbError::PlayerNotFound(_)));

        let decode = into_db_error(
            BackendError::ColumnNotFound("position".to_string()),
            PlayerSelector::ByKey("7".into()),
        );
        assert!(matches!(decode, DbError::Decode(_)));

        let opaque = into_db_error(BackendError::PoolClosed, PlayerSelector::ByKey("7".into()));
        assert!(matches!(opaque, DbError::Database(_)));
    }

    #[test]
    fn test_into_scan_error() {
        let decode = into_scan_error(BackendError::ColumnNotFound("kit_number".to_string()));
        assert!(matches!(decode, DbError::Decode(_)));
        assert!(matches!(
            into_scan_error(BackendError::PoolTimedOut),
            DbError::Database(_)
        ));
    }
}
