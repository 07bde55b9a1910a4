//! API error handling

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use tracing::{error, warn};

use core_kernel::{PortError, TemporalError};
use domain_motor::MotorError;

/// API error types
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Validation error: {message}")]
    Validation {
        message: String,
        details: Vec<String>,
    },

    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::BadRequest(_) | ApiError::Validation { .. } => StatusCode::BAD_REQUEST,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::ServiceUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<String>>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let (error_type, message, details) = match self {
            ApiError::NotFound(msg) => ("not_found", msg, None),
            ApiError::BadRequest(msg) => ("bad_request", msg, None),
            ApiError::Conflict(msg) => ("conflict", msg, None),
            ApiError::Validation { message, details } => ("validation_error", message, Some(details)),
            ApiError::ServiceUnavailable(msg) => ("service_unavailable", msg, None),
            ApiError::Internal(msg) => ("internal_error", msg, None),
        };

        let body = ErrorResponse {
            error: error_type.to_string(),
            message,
            details,
        };

        (status, Json(body)).into_response()
    }
}

impl From<TemporalError> for ApiError {
    fn from(err: TemporalError) -> Self {
        ApiError::BadRequest(err.to_string())
    }
}

impl From<PortError> for ApiError {
    fn from(err: PortError) -> Self {
        match &err {
            PortError::NotFound { .. } => ApiError::NotFound(err.to_string()),
            PortError::Validation { .. } => ApiError::BadRequest(err.to_string()),
            PortError::Conflict { message } => ApiError::Conflict(message.clone()),
            _ if err.is_transient() => {
                warn!(error = %err, "Record store unavailable");
                ApiError::ServiceUnavailable("Record store unavailable".to_string())
            }
            _ => {
                error!(error = %err, "Record store failure");
                ApiError::Internal("Record store failure".to_string())
            }
        }
    }
}

impl From<MotorError> for ApiError {
    fn from(err: MotorError) -> Self {
        match err {
            MotorError::CarNotFound(_) => ApiError::NotFound("Car not found".to_string()),
            MotorError::ClaimNotFound(_) => ApiError::NotFound("Claim not found".to_string()),
            MotorError::InvalidClaim(message) => ApiError::Validation {
                details: vec![message.clone()],
                message,
            },
            MotorError::Store(port) => port.into(),
            other => {
                error!(error = %other, "Unexpected domain error");
                ApiError::Internal(other.to_string())
            }
        }
    }
}

impl From<validator::ValidationErrors> for ApiError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut details: Vec<String> = errors
            .field_errors()
            .into_iter()
            .flat_map(|(field, errs)| {
                errs.iter().map(move |e| match &e.message {
                    Some(message) => format!("{field}: {message}"),
                    None => format!("{field}: {}", e.code),
                })
            })
            .collect();
        details.sort();

        ApiError::Validation {
            message: "Invalid claim payload".to_string(),
            details,
        }
    }
}
