use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use database::DbError;
use serde_json::json;
use thiserror::Error;

/// Message returned for every failure the client cannot act on.
pub const INTERNAL_ERROR_MESSAGE: &str = "Operation could not be performed";

#[derive(Error, Debug)]
pub enum AppError {
    /// The request body could not be decoded into the expected shape.
    #[error("Invalid request payload")]
    InvalidPayload(String),

    /// A query that is expected to return something returned nothing.
    #[error("document not found")]
    NotFound,

    #[error(transparent)]
    Database(#[from] DbError),
}

impl AppError {
    /// The single error-to-status mapping used by every handler.
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::InvalidPayload(_) | AppError::Database(DbError::InvalidId) => {
                StatusCode::BAD_REQUEST
            }
            AppError::NotFound | AppError::Database(DbError::NotFound) => StatusCode::NOT_FOUND,
            AppError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Converts our custom `AppError` into an HTTP response.
///
/// Client errors echo their message. Server errors are logged with the full
/// cause and answered with a generic message.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let error_message = if status.is_server_error() {
            tracing::error!(error = %self, "Database error.");
            INTERNAL_ERROR_MESSAGE.to_string()
        } else {
            if let AppError::InvalidPayload(detail) = &self {
                tracing::debug!(%detail, "Rejected request payload.");
            }
            self.to_string()
        };

        let body = Json(json!({ "error": error_message }));
        (status, body).into_response()
    }
}
