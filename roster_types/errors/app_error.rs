use thiserror::Error;

/// Errors for app logic.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Field '{0}' must not be empty")]
    MissingField(&'static str),

    #[error("Invalid payload: {0}")]
    InvalidPayload(String),
}
