//! Response types for the Increment Engine API.
//!
//! This module defines the success acknowledgements, the error response
//! structure, and the mapping from [`EngineError`] to HTTP status codes.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// Acknowledgement for create, update and delete requests.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionResponse {
    /// Human-readable outcome.
    pub message: String,
    /// The affected employee, when the action targeted one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub employee_id: Option<String>,
    /// The affected policy, when the action targeted one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub policy_id: Option<i64>,
}

impl ActionResponse {
    /// Acknowledges an action on an employee.
    pub fn employee(message: impl Into<String>, employee_id: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            employee_id: Some(employee_id.into()),
            policy_id: None,
        }
    }

    /// Acknowledges an action on a policy.
    pub fn policy(message: impl Into<String>, policy_id: i64) -> Self {
        Self {
            message: message.into(),
            employee_id: None,
            policy_id: Some(policy_id),
        }
    }
}

/// API error response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Optional details about the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Creates a new API error with details.
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: Some(details.into()),
        }
    }

    /// Creates a validation error response.
    pub fn validation_error(message: impl Into<String>) -> Self {
        Self::new("VALIDATION_ERROR", message)
    }

    /// Creates a malformed JSON error response.
    pub fn malformed_json(message: impl Into<String>) -> Self {
        Self::new("MALFORMED_JSON", message)
    }
}

/// API error with HTTP status code.
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.error)).into_response()
    }
}

impl From<EngineError> for ApiErrorResponse {
    fn from(error: EngineError) -> Self {
        let message = error.to_string();
        let (status, error) = match error {
            EngineError::ConfigNotFound { .. } | EngineError::ConfigParseError { .. } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ApiError::with_details("CONFIG_ERROR", "Configuration error", message),
            ),
            EngineError::MalformedRange { .. } => (
                StatusCode::BAD_REQUEST,
                ApiError::with_details(
                    "MALFORMED_RANGE",
                    message,
                    "Experience range must look like '2-5 years' or '10+ years'",
                ),
            ),
            EngineError::InvalidEmployee { .. } => (
                StatusCode::BAD_REQUEST,
                ApiError::new("INVALID_EMPLOYEE", message),
            ),
            EngineError::InvalidPolicy { .. } => (
                StatusCode::BAD_REQUEST,
                ApiError::new("INVALID_POLICY", message),
            ),
            EngineError::EmptyUpdate { .. } => (
                StatusCode::BAD_REQUEST,
                ApiError::new("EMPTY_UPDATE", message),
            ),
            EngineError::EmployeeNotFound { .. } => (
                StatusCode::NOT_FOUND,
                ApiError::new("EMPLOYEE_NOT_FOUND", message),
            ),
            EngineError::PolicyNotFound { .. } => (
                StatusCode::NOT_FOUND,
                ApiError::new("POLICY_NOT_FOUND", message),
            ),
            EngineError::DuplicateEmployee { .. } => (
                StatusCode::CONFLICT,
                ApiError::new("DUPLICATE_EMPLOYEE", message),
            ),
            EngineError::Storage { .. } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ApiError::with_details("STORAGE_ERROR", "Storage failure", message),
            ),
        };
        ApiErrorResponse { status, error }
    }
}
