use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

use crate::api::{ErrorResponse, MSG_INVALID_DATA, MSG_NOT_FOUND};
use crate::validation::ValidationError;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("note not found")]
    NotFound,
    /// Store or infrastructure failure. `message` is what the caller sees.
    #[error("{message}: {cause:#}")]
    Store {
        message: &'static str,
        cause: anyhow::Error,
    },
}

impl ApiError {
    /// Adapter for `map_err` on store calls.
    pub fn store(message: &'static str) -> impl FnOnce(anyhow::Error) -> ApiError {
        move |cause| ApiError::Store { message, cause }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::Store { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match self {
            Self::Validation(err) => ErrorResponse::with_details(MSG_INVALID_DATA, err.0),
            Self::NotFound => ErrorResponse::new(MSG_NOT_FOUND),
            Self::Store { message, cause } => {
                tracing::error!(error = ?cause, "{}", message);
                ErrorResponse::new(message)
            }
        };
        (status, Json(body)).into_response()
    }
}
