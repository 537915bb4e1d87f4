//! Per-app output log.
//!
//! Start truncates the file and writes a header; everything after that is
//! appended, including the child's own output and the stop/exit markers, so
//! the output of a run survives its stop.

use crate::{Result, SupervisorError};

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::panic::Location;
use std::path::{Path, PathBuf};

use error_location::ErrorLocation;
use log::warn;

/// Marker lines are stamped in RFC 3339, local offset.
fn timestamp() -> String {
    chrono::Local::now().to_rfc3339()
}

/// Handle on an app's log file, opened in append mode.
pub struct AppLog {
    path: PathBuf,
    file: File,
}

impl AppLog {
    /// Truncate (or create) the log and write the start header.
    #[track_caller]
    pub fn create_fresh(path: &Path, app_name: &str) -> Result<Self> {
        let caller = Location::caller();
        let log_file_error = |source| SupervisorError::LogFile {
            path: path.to_path_buf(),
            source,
            location: ErrorLocation::from(caller),
        };

        let mut file = File::create(path).map_err(log_file_error)?;
        writeln!(file, "=== Started {app_name} at {} ===", timestamp()).map_err(log_file_error)?;
        drop(file);

        let file = OpenOptions::new()
            .append(true)
            .open(path)
            .map_err(log_file_error)?;

        Ok(Self {
            path: path.to_path_buf(),
            file,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// A second descriptor for a child's stdout or stderr. It shares the
    /// append flag, so child output and our own lines never overwrite each other.
    pub fn child_stdio(&self) -> std::io::Result<File> {
        self.file.try_clone()
    }

    /// Append one line; failures are logged, never returned.
    pub fn line(&mut self, text: &str) {
        if let Err(e) = writeln!(self.file, "{text}") {
            warn!("Failed to write to {}: {e}", self.path.display());
        }
    }

    /// Append a marker line to an existing log.
    ///
    /// Used for stop/exit markers, which must not fail the operation that
    /// produced them. An empty path (app never started) is a no-op.
    pub fn append_marker(path: &str, marker: &str) {
        if path.is_empty() {
            return;
        }

        let result = OpenOptions::new()
            .append(true)
            .create(true)
            .open(path)
            .and_then(|mut file| writeln!(file, "=== {marker} at {} ===", timestamp()));

        if let Err(e) = result {
            warn!("Failed to append marker to {path}: {e}");
        }
    }
}
