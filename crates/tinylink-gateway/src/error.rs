use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;
use tinylink_core::{ShortenerError, StorageError};
use tracing::error;

pub type Result<T> = std::result::Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    BadRequest(String),
    #[error("{0}")]
    NotFound(String),
    #[error(transparent)]
    Shortener(#[from] ShortenerError),
    #[error("{0}")]
    Internal(String),
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

/// JSON error body, e.g. `{"statusCode":404,"message":"URL not found","error":"Not Found"}`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorBody {
    pub status_code: u16,
    pub message: String,
    pub error: &'static str,
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Shortener(ShortenerError::Storage(
                StorageError::Unavailable(_) | StorageError::Timeout(_),
            )) => StatusCode::SERVICE_UNAVAILABLE,
            AppError::Shortener(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        // Server-side details stay in the logs.
        let message = if status.is_server_error() {
            error!(error = %self, status = status.as_u16(), "request failed");
            status.canonical_reason().unwrap_or("Error").to_string()
        } else {
            self.to_string()
        };

        let body = ErrorBody {
            status_code: status.as_u16(),
            message,
            error: status.canonical_reason().unwrap_or("Error"),
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_errors_to_status_codes() {
        let cases = [
            (AppError::BadRequest("bad".into()), StatusCode::BAD_REQUEST),
            (AppError::NotFound("gone".into()), StatusCode::NOT_FOUND),
            (
                AppError::Shortener(ShortenerError::AllocationExhausted { attempts: 10 }),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (
                AppError::Shortener(StorageError::Unavailable("down".into()).into()),
                StatusCode::SERVICE_UNAVAILABLE,
            ),
            (
                AppError::Shortener(StorageError::Timeout("slow".into()).into()),
                StatusCode::SERVICE_UNAVAILABLE,
            ),
            (
                AppError::Shortener(StorageError::Query("syntax".into()).into()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (AppError::Internal("oops".into()), StatusCode::INTERNAL_SERVER_ERROR),
        ];

        for (error, expected) in cases {
            assert_eq!(error.status(), expected, "{error}");
        }
    }
}
