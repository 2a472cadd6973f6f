use serde::{Deserialize, Serialize};

/// A validation failure tagged with the offending input field.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self { field: field.into(), message: message.into() }
    }
}

/// Uniform call/response envelope handed to the presentation layer.
///
/// Exactly three wire shapes exist:
/// - `{"success":true,"data":...}`
/// - `{"success":false,"error":"..."}` (general error)
/// - `{"success":false,"errors":[{"field":...,"message":...}]}` (field errors)
///
/// Callers branch on which failure shape they received, so the two failure
/// variants must never be merged into one struct with optional fields.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum ApiResponse<T> {
    Success { success: bool, data: T },
    FieldErrors { success: bool, errors: Vec<FieldError> },
    Error { success: bool, error: String },
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        ApiResponse::Success { success: true, data }
    }

    pub fn error(message: impl Into<String>) -> Self {
        ApiResponse::Error { success: false, error: message.into() }
    }

    pub fn field_errors(errors: Vec<FieldError>) -> Self {
        ApiResponse::FieldErrors { success: false, errors }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, ApiResponse::Success { .. })
    }

    pub fn data(self) -> Option<T> {
        match self {
            ApiResponse::Success { data, .. } => Some(data),
            _ => None,
        }
    }
}
