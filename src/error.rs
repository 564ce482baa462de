use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::{payment::GatewayError, response::ApiResponse};

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Cannot Bind Data")]
    Bind(String),

    #[error("Validate Error")]
    Validation(#[from] validator::ValidationErrors),

    #[error("Cannot Convert ID")]
    IdConversion,

    #[error("Data Not Found")]
    NotFound,

    #[error("{0}")]
    Conflict(String),

    #[error("{0}")]
    BadRequest(String),

    #[error("Unauthorized")]
    Unauthorized,

    #[error("Invalid Signature")]
    InvalidSignature,

    #[error("Cannot Access Database")]
    OrmError(#[from] sea_orm::DbErr),

    #[error("Payment Gateway Error")]
    Gateway(#[from] GatewayError),

    #[error("Internal Server Error")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Bind(_) => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            AppError::Validation(_) | AppError::IdConversion => StatusCode::NOT_ACCEPTABLE,
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized => StatusCode::UNAUTHORIZED,
            AppError::InvalidSignature => StatusCode::FORBIDDEN,
            AppError::OrmError(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Gateway(_) => StatusCode::BAD_GATEWAY,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match &self {
            AppError::Bind(detail) => tracing::debug!(%detail, "request body rejected"),
            AppError::Validation(errors) => tracing::debug!(?errors, "validation failed"),
            AppError::OrmError(err) => tracing::error!(error = %err, "database error"),
            AppError::Gateway(err) => tracing::error!(error = %err, "payment gateway error"),
            AppError::Internal(err) => tracing::error!(error = %err, "internal error"),
            _ => {}
        }

        ApiResponse::failure(self.status_code(), self.to_string()).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;
