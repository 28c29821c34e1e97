//! Response types for the Tip Distribution Engine API.
//!
//! This module defines the error response structures and error handling
//! for the HTTP API.

use axum::{
    Json,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

use crate::error::EngineError;

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

    /// Creates a malformed JSON error response.
    pub fn malformed_json(message: impl Into<String>) -> Self {
        Self::new("MALFORMED_JSON", message)
    }

    /// Creates an invalid path or query parameter error response.
    pub fn invalid_parameter(message: impl Into<String>) -> Self {
        Self::new("INVALID_PARAMETER", message)
    }
}

/// API error with HTTP status code.
#[derive(Debug)]
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl ApiErrorResponse {
    /// A 400 response with the given body.
    pub fn bad_request(error: ApiError) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            error,
        }
    }
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (
            self.status,
            [(header::CONTENT_TYPE, "application/json")],
            Json(self.error),
        )
            .into_response()
    }
}

impl From<EngineError> for ApiErrorResponse {
    fn from(error: EngineError) -> Self {
        let message = error.to_string();
        let (status, error) = match error {
            EngineError::ConfigNotFound { path } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ApiError::with_details(
                    "CONFIG_ERROR",
                    "Configuration error",
                    format!("Configuration file not found: {}", path),
                ),
            ),
            EngineError::ConfigParseError { path, message } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ApiError::with_details(
                    "CONFIG_ERROR",
                    "Configuration parse error",
                    format!("Failed to parse {}: {}", path, message),
                ),
            ),
            EngineError::InvalidInput { field, .. } => (
                StatusCode::BAD_REQUEST,
                ApiError::with_details(
                    "INVALID_INPUT",
                    message,
                    format!("The field '{}' was rejected", field),
                ),
            ),
            EngineError::InvalidRoster { .. } => (
                StatusCode::BAD_REQUEST,
                ApiError::with_details(
                    "INVALID_ROSTER",
                    message,
                    "The roster cannot be divided proportionally",
                ),
            ),
            EngineError::InvalidPool { .. } => (
                StatusCode::BAD_REQUEST,
                ApiError::new("INVALID_POOL", message),
            ),
            EngineError::DuplicateShift { date } => (
                StatusCode::CONFLICT,
                ApiError::with_details(
                    "DUPLICATE_SHIFT",
                    message,
                    format!("Edit the existing shift for {} instead", date),
                ),
            ),
            EngineError::ShiftNotFound { .. } => (
                StatusCode::NOT_FOUND,
                ApiError::new("SHIFT_NOT_FOUND", message),
            ),
            EngineError::EmployeeNotFound { .. } => (
                StatusCode::NOT_FOUND,
                ApiError::new("EMPLOYEE_NOT_FOUND", message),
            ),
            EngineError::Persistence { message } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ApiError::with_details("PERSISTENCE_ERROR", "Storage failure", message),
            ),
        };
        ApiErrorResponse { status, error }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_api_error_serialization() {
        let error = ApiError::new("TEST_ERROR", "Test message");
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("\"code\":\"TEST_ERROR\""));
        assert!(json.contains("\"message\":\"Test message\""));
        assert!(!json.contains("details"));
    }

    #[test]
    fn test_api_error_with_details_serialization() {
        let error = ApiError::with_details("TEST_ERROR", "Test message", "Some details");
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("\"details\":\"Some details\""));
    }

    #[test]
    fn test_validation_errors_map_to_400() {
        let cases = [
            EngineError::invalid_input("cash_tips", "must not be negative"),
            EngineError::invalid_roster("roster is empty"),
            EngineError::InvalidPool {
                amount: rust_decimal::Decimal::NEGATIVE_ONE,
            },
        ];
        for error in cases {
            let response: ApiErrorResponse = error.into();
            assert_eq!(response.status, StatusCode::BAD_REQUEST);
        }
    }

    #[test]
    fn test_duplicate_shift_maps_to_409() {
        let error = EngineError::DuplicateShift {
            date: NaiveDate::from_ymd_opt(2025, 3, 14).unwrap(),
        };
        let response: ApiErrorResponse = error.into();
        assert_eq!(response.status, StatusCode::CONFLICT);
        assert_eq!(response.error.code, "DUPLICATE_SHIFT");
        assert!(response.error.message.contains("2025-03-14"));
    }

    #[test]
    fn test_not_found_errors_map_to_404() {
        let shift: ApiErrorResponse = EngineError::ShiftNotFound {
            shift_id: "x".to_string(),
        }
        .into();
        let employee: ApiErrorResponse = EngineError::EmployeeNotFound {
            id: "emp_404".to_string(),
        }
        .into();

        assert_eq!(shift.status, StatusCode::NOT_FOUND);
        assert_eq!(employee.status, StatusCode::NOT_FOUND);
        assert_eq!(employee.error.code, "EMPLOYEE_NOT_FOUND");
    }

    #[test]
    fn test_persistence_maps_to_500() {
        let response: ApiErrorResponse = EngineError::Persistence {
            message: "disk full".to_string(),
        }
        .into();
        assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(response.error.details.as_deref(), Some("disk full"));
    }
}
