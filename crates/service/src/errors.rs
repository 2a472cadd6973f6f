use common::types::{ApiResponse, FieldError};
use thiserror::Error;

/// Business errors for the directory and leave workflows.
///
/// `Validation` carries the full list of field errors collected by the input
/// validators; every other variant surfaces as a single general message.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("validation failed")]
    Validation(Vec<FieldError>),
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    InvalidState(String),
    #[error("storage error: {0}")]
    Storage(String),
}

impl ServiceError {
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    pub fn invalid_state(message: impl Into<String>) -> Self {
        Self::InvalidState(message.into())
    }

    /// Single field-tagged validation error.
    pub fn field(field: &str, message: &str) -> Self {
        Self::Validation(vec![FieldError::new(field, message)])
    }
}

/// Convert a service outcome into the presentation envelope.
///
/// Validation errors map to the `errors` list shape; everything else maps to
/// the single `error` string shape. Which shape is produced drives the UI's
/// error-display path, so the mapping must stay one-to-one with the variants.
pub fn respond<T>(result: Result<T, ServiceError>) -> ApiResponse<T> {
    match result {
        Ok(data) => ApiResponse::ok(data),
        Err(ServiceError::Validation(errors)) => ApiResponse::field_errors(errors),
        Err(err) => ApiResponse::error(err.to_string()),
    }
}
