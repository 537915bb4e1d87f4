use std::panic::Location;
use std::path::PathBuf;
use std::result::Result as StdResult;

use error_location::ErrorLocation;
use thiserror::Error;

/// Failures of store and lifecycle operations.
///
/// Every variant is scoped to the one app or operation it concerns; none of
/// them is fatal to the supervisor.
#[derive(Error, Debug)]
pub enum SupervisorError {
    #[error("Validation error: {message} {location}")]
    Validation {
        message: String,
        field: Option<&'static str>,
        location: ErrorLocation,
    },

    #[error("App '{name}' already exists {location}")]
    DuplicateName {
        name: String,
        location: ErrorLocation,
    },

    #[error("Port {port} is already assigned to app '{owner}' {location}")]
    DuplicatePort {
        port: u16,
        owner: String,
        location: ErrorLocation,
    },

    #[error("App '{name}' not found {location}")]
    NotFound {
        name: String,
        location: ErrorLocation,
    },

    #[error("No log file available for app '{name}' {location}")]
    LogNotFound {
        name: String,
        location: ErrorLocation,
    },

    #[error("App '{name}' is already running with PID {pid} {location}")]
    AlreadyRunning {
        name: String,
        pid: u32,
        location: ErrorLocation,
    },

    #[error("Failed to create log directory {path}: {source} {location}")]
    LogDirUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
        location: ErrorLocation,
    },

    #[error("Failed to prepare log file {path}: {source} {location}")]
    LogFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
        location: ErrorLocation,
    },

    #[error("Invalid command for app '{name}': {command:?} {location}")]
    InvalidCommand {
        name: String,
        command: String,
        location: ErrorLocation,
    },

    #[error("Failed to launch app '{name}': {source} {location}")]
    LaunchFailed {
        name: String,
        #[source]
        source: std::io::Error,
        location: ErrorLocation,
    },

    #[error("IO error on {path}: {source} {location}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
        location: ErrorLocation,
    },

    #[error("Malformed app store {path}: {source} {location}")]
    Serde {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
        location: ErrorLocation,
    },
}

impl SupervisorError {
    #[track_caller]
    pub fn validation<S: Into<String>>(field: &'static str, message: S) -> Self {
        Self::Validation {
            message: message.into(),
            field: Some(field),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn not_found<S: Into<String>>(name: S) -> Self {
        Self::NotFound {
            name: name.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn log_not_found<S: Into<String>>(name: S) -> Self {
        Self::LogNotFound {
            name: name.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }

    /// Caller mistakes that left all state untouched.
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation { .. } | Self::InvalidCommand { .. })
    }

    /// The request collides with existing state.
    pub fn is_conflict(&self) -> bool {
        matches!(
            self,
            Self::DuplicateName { .. } | Self::DuplicatePort { .. } | Self::AlreadyRunning { .. }
        )
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. } | Self::LogNotFound { .. })
    }
}

pub type Result<T> = StdResult<T, SupervisorError>;
