use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::modules::persistence::StoreError;
use crate::shared::types::ErrorResponse;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A uniqueness constraint was violated; carries the constraint name
    #[error("Already exists: {0}")]
    AlreadyExists(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Internal server error: {0}")]
    Internal(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Domain outcomes the CMS clients branch on carry no body.
        let (status, message, errors) = match self {
            AppError::AlreadyExists(ref constraint) => {
                tracing::debug!(constraint = %constraint, "Rejected duplicate entity");
                return StatusCode::BAD_REQUEST.into_response();
            }
            AppError::NotFound(ref msg) => {
                tracing::debug!("Not found: {}", msg);
                return StatusCode::NOT_FOUND.into_response();
            }
            AppError::Forbidden(ref msg) => {
                tracing::debug!("Forbidden: {}", msg);
                return StatusCode::FORBIDDEN.into_response();
            }
            AppError::Database(ref e) => {
                tracing::error!("Database error: {:?}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Database error occurred".to_string(),
                    None,
                )
            }
            AppError::Validation(ref msg) => (
                StatusCode::BAD_REQUEST,
                msg.clone(),
                Some(vec![msg.clone()]),
            ),
            AppError::BadRequest(ref msg) => (StatusCode::BAD_REQUEST, msg.clone(), None),
            AppError::Internal(ref msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                    None,
                )
            }
            AppError::Unauthorized(ref msg) => (StatusCode::UNAUTHORIZED, msg.clone(), None),
        };

        let body = Json(ErrorResponse::new(message, errors));

        (status, body).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;

/// Convert a store failure into an [`AppError`].
///
/// Unique violations become [`AppError::AlreadyExists`] keyed by the violated
/// constraint; everything else is passed through as a database error.
pub fn handle_database_error(e: StoreError) -> AppError {
    match e {
        StoreError::UniqueViolation { constraint } => AppError::AlreadyExists(constraint),
        StoreError::Database(e) => AppError::Database(e),
    }
}
