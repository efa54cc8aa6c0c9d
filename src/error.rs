use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::{payments::PaymentError, response::ErrorResponse};

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    Unauthorized(String),

    #[error("Forbidden")]
    Forbidden,

    #[error("Database error")]
    Database(#[from] sea_orm::DbErr),

    #[error("Error saving order")]
    OrderNotSaved(#[source] sea_orm::DbErr),

    #[error("Failed to create payment intent")]
    Payment(#[from] PaymentError),

    #[error("Internal Server Error")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::Forbidden => StatusCode::FORBIDDEN,
            AppError::Database(_)
            | AppError::OrderNotSaved(_)
            | AppError::Payment(_)
            | AppError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Underlying failure text, only exposed for server-side errors.
    fn detail(&self) -> Option<String> {
        match self {
            AppError::Database(err) | AppError::OrderNotSaved(err) => Some(err.to_string()),
            AppError::Payment(err) => Some(err.to_string()),
            AppError::Internal(err) => Some(err.to_string()),
            _ => None,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let error = self.detail();

        if status.is_server_error() {
            tracing::error!(status = %status, error = ?error, "{}", self);
        }

        let body = ErrorResponse {
            success: false,
            message: self.to_string(),
            error,
        };

        (status, axum::Json(body)).into_response()
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

pub type AppResult<T> = Result<T, AppError>;
