use crate::{Result, SupervisorError, command_line};

use std::panic::Location;

use error_location::ErrorLocation;
use serde::{Deserialize, Serialize};

/// Declaration and last-known runtime state of one managed app.
///
/// `pid` is advisory: a non-zero value is only as fresh as the last liveness
/// probe and must be re-probed before it is trusted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppRecord {
    pub name: String,
    pub port: u16,
    pub command: String,
    /// 0 = not running
    #[serde(default, skip_serializing_if = "is_zero")]
    pub pid: u32,
    /// Empty until the first start
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub log_file: String,
}

fn is_zero(pid: &u32) -> bool {
    *pid == 0
}

impl AppRecord {
    /// A stopped app that has never been started.
    pub fn new(name: impl Into<String>, port: u16, command: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            port,
            command: command.into(),
            pid: 0,
            log_file: String::new(),
        }
    }

    /// Check the required fields.
    ///
    /// The name doubles as the log file stem, so it must not be able to
    /// address anything outside the logs directory.
    #[track_caller]
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(SupervisorError::validation("name", "name is required"));
        }

        if self.name == "." || self.name == ".." || self.name.contains(['/', '\\', '\0']) {
            return Err(SupervisorError::validation(
                "name",
                format!("name {:?} cannot be used as a log file name", self.name),
            ));
        }

        if self.port == 0 {
            return Err(SupervisorError::validation("port", "port is required"));
        }

        if self.command.trim().is_empty() {
            return Err(SupervisorError::validation("command", "command is required"));
        }

        if command_line::tokenize(&self.command).is_empty() {
            return Err(SupervisorError::InvalidCommand {
                name: self.name.clone(),
                command: self.command.clone(),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        Ok(())
    }

    pub fn has_log(&self) -> bool {
        !self.log_file.is_empty()
    }
}
