use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

use roster_types::errors::{AppError, ApplicationError, DbError, ErrorKind};

/// Handler error: an `ApplicationError` rendered with the status code of its kind.
#[derive(Debug)]
pub struct ApiError(pub ApplicationError);

impl From<ApplicationError> for ApiError {
    fn from(err: ApplicationError) -> Self {
        ApiError(err)
    }
}

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        ApiError(err.into())
    }
}

/// Unreadable JSON bodies are reported like any other invalid input.
impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError(AppError::InvalidPayload(rejection.body_text()).into())
    }
}

pub(crate) fn status_for(err: &ApplicationError) -> StatusCode {
    if let ApplicationError::Db(DbError::DeadlineExceeded) = err {
        return StatusCode::GATEWAY_TIMEOUT;
    }

    match err.kind() {
        ErrorKind::NotFound => StatusCode::NOT_FOUND,
        ErrorKind::Duplicate => StatusCode::CONFLICT,
        ErrorKind::Invalid => StatusCode::UNPROCESSABLE_ENTITY,
        ErrorKind::Canceled => StatusCode::SERVICE_UNAVAILABLE,
        ErrorKind::Schema | ErrorKind::Backend => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = status_for(&self.0);

        let message = if status.is_server_error() {
            tracing::error!("Request failed: {}", self.0);
            match status {
                StatusCode::INTERNAL_SERVER_ERROR => "Internal server error.".to_string(),
                _ => self.0.to_string(),
            }
        } else {
            tracing::debug!("Request rejected: {}", self.0);
            self.0.to_string()
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}
