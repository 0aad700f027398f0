//! Error taxonomy and HTTP status mapping.
//!
//! # Responsibilities
//! - Single error type for all handlers
//! - Map errors to 400/404/503 with a generic envelope body
//! - Log internal causes without leaking them to clients
//!
//! # Design Decisions
//! - Bodies carry only a generic message; details go to the log
//! - No retries: a failed call is reported as-is

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;

use crate::http::response::ApiResponse;

/// Errors that can occur while serving a request.
#[derive(Debug, Error)]
pub enum AppError {
    /// Request carried invalid or unusable input.
    #[error("{0}")]
    InvalidInput(String),

    /// The referenced entity does not exist.
    #[error("{0} Not Found")]
    NotFound(&'static str),

    /// A document could not be persisted.
    #[error("{0} Creation Failure")]
    CreationFailure(&'static str),

    /// Database operation failed.
    #[error("Database unavailable")]
    Database(#[from] mongodb::error::Error),

    /// Postal lookup failed.
    #[error("Postal lookup unavailable")]
    Postal(#[from] crate::postal::PostalError),
}

/// Result type for handler bodies.
pub type AppResult<T> = Result<T, AppError>;

/// Parse a path-supplied ObjectId. A malformed id can never name an
/// existing entity, so it reports as not-found rather than bad-request.
pub fn parse_object_id(
    raw: &str,
    entity: &'static str,
) -> Result<mongodb::bson::oid::ObjectId, AppError> {
    mongodb::bson::oid::ObjectId::parse_str(raw).map_err(|_| AppError::NotFound(entity))
}

impl AppError {
    fn status(&self) -> StatusCode {
        match self {
            AppError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::CreationFailure(_) => StatusCode::SERVICE_UNAVAILABLE,
            AppError::Database(_) => StatusCode::SERVICE_UNAVAILABLE,
            AppError::Postal(_) => StatusCode::SERVICE_UNAVAILABLE,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match &self {
            AppError::Database(e) => {
                tracing::error!(error = %e, "Database operation failed");
            }
            AppError::Postal(e) => {
                tracing::error!(error = %e, "Postal lookup failed");
            }
            _ => {}
        }

        let status = self.status();
        (status, Json(ApiResponse::<()>::failure(self.to_string()))).into_response()
    }
}
