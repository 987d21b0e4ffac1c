use axum::http::StatusCode;
use models::errors::ModelError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Validation(String),
    #[error("Resource not found")]
    UnknownResource(String),
    #[error("Method not allowed")]
    MethodNotAllowed,
    #[error(transparent)]
    Model(#[from] ModelError),
}

impl ServiceError {
    pub fn not_found(label: &str) -> Self { Self::NotFound(format!("{} not found", label)) }

    pub fn id_required(label: &str) -> Self { Self::Validation(format!("{} ID is required", label)) }

    /// HTTP status the error surfaces as.
    pub fn status(&self) -> StatusCode {
        match self {
            ServiceError::NotFound(_) | ServiceError::UnknownResource(_) => StatusCode::NOT_FOUND,
            ServiceError::Validation(_) => StatusCode::BAD_REQUEST,
            ServiceError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            ServiceError::Model(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}
