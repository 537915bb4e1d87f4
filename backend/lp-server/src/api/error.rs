//! REST API error types
//!
//! Every failure leaves the server as `{"error": {"code", "message", "field"?}}`
//! with a status derived from the error's category.

use lp_core::SupervisorError;

use std::panic::Location;

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use error_location::ErrorLocation;
use serde::Serialize;
use thiserror::Error;

/// JSON error response body
#[derive(Debug, Serialize)]
pub struct ApiErrorResponse {
    pub error: ApiErrorBody,
}

#[derive(Debug, Serialize)]
pub struct ApiErrorBody {
    /// Machine-readable: NOT_FOUND, VALIDATION_ERROR, CONFLICT, BAD_REQUEST, INTERNAL_ERROR
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

#[derive(Debug, Error)]
pub enum ApiError {
    /// 404
    #[error("Resource not found: {message} {location}")]
    NotFound {
        message: String,
        location: ErrorLocation,
    },

    /// 400
    #[error("Validation failed: {message} {location}")]
    Validation {
        message: String,
        field: Option<String>,
        location: ErrorLocation,
    },

    /// 409: the request collides with current state
    #[error("Conflict: {message} {location}")]
    Conflict {
        message: String,
        location: ErrorLocation,
    },

    /// 500
    #[error("Internal error: {message} {location}")]
    Internal {
        message: String,
        location: ErrorLocation,
    },

    /// 400: body could not be decoded
    #[error("Bad request: {message} {location}")]
    BadRequest {
        message: String,
        location: ErrorLocation,
    },
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        log::error!("{}", self);

        let (status, body) = match self {
            ApiError::NotFound { message, .. } => (
                StatusCode::NOT_FOUND,
                ApiErrorBody {
                    code: "NOT_FOUND".into(),
                    message,
                    field: None,
                },
            ),
            ApiError::Validation { message, field, .. } => (
                StatusCode::BAD_REQUEST,
                ApiErrorBody {
                    code: "VALIDATION_ERROR".into(),
                    message,
                    field,
                },
            ),
            ApiError::Conflict { message, .. } => (
                StatusCode::CONFLICT,
                ApiErrorBody {
                    code: "CONFLICT".into(),
                    message,
                    field: None,
                },
            ),
            ApiError::Internal { message, .. } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ApiErrorBody {
                    code: "INTERNAL_ERROR".into(),
                    message,
                    field: None,
                },
            ),
            ApiError::BadRequest { message, .. } => (
                StatusCode::BAD_REQUEST,
                ApiErrorBody {
                    code: "BAD_REQUEST".into(),
                    message,
                    field: None,
                },
            ),
        };

        (status, Json(ApiErrorResponse { error: body })).into_response()
    }
}

/// Client-facing messages drop the source location the core error carries.
fn client_message(e: &SupervisorError) -> String {
    match e {
        SupervisorError::Validation { message, .. } => message.clone(),
        SupervisorError::DuplicateName { name, .. } => format!("App '{name}' already exists"),
        SupervisorError::DuplicatePort { port, owner, .. } => {
            format!("Port {port} is already assigned to app '{owner}'")
        }
        SupervisorError::NotFound { name, .. } => format!("App '{name}' not found"),
        SupervisorError::LogNotFound { name, .. } => {
            format!("No log file available for app '{name}'")
        }
        SupervisorError::AlreadyRunning { name, pid, .. } => {
            format!("App '{name}' is already running with PID {pid}")
        }
        SupervisorError::InvalidCommand { name, command, .. } => {
            format!("Invalid command for app '{name}': {command:?}")
        }
        SupervisorError::LaunchFailed { name, source, .. } => {
            format!("Failed to launch app '{name}': {source}")
        }
        SupervisorError::LogDirUnavailable { path, source, .. } => {
            format!("Failed to create log directory {}: {source}", path.display())
        }
        SupervisorError::LogFile { path, source, .. } => {
            format!("Failed to prepare log file {}: {source}", path.display())
        }
        SupervisorError::Io { .. } | SupervisorError::Serde { .. } => {
            "App store operation failed".to_string()
        }
    }
}

impl From<SupervisorError> for ApiError {
    #[track_caller]
    fn from(e: SupervisorError) -> Self {
        let location = ErrorLocation::from(Location::caller());
        let message = client_message(&e);

        if let SupervisorError::Validation { field, .. } = &e {
            return ApiError::Validation {
                message,
                field: field.map(str::to_string),
                location,
            };
        }

        if e.is_validation() {
            ApiError::Validation {
                message,
                field: Some("command".into()),
                location,
            }
        } else if e.is_conflict() {
            ApiError::Conflict { message, location }
        } else if e.is_not_found() {
            ApiError::NotFound { message, location }
        } else {
            log::error!("Supervisor error: {e}");
            ApiError::Internal { message, location }
        }
    }
}

impl From<tokio::task::JoinError> for ApiError {
    #[track_caller]
    fn from(e: tokio::task::JoinError) -> Self {
        log::error!("Blocking task failed: {e}");
        ApiError::Internal {
            message: "Operation aborted".to_string(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<JsonRejection> for ApiError {
    #[track_caller]
    fn from(e: JsonRejection) -> Self {
        ApiError::BadRequest {
            message: e.body_text(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

pub type Result<T> = std::result::Result<T, ApiError>;
