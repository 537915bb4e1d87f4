//! Durable record set.

use crate::{AppRecord, Result, SupervisorError};

use std::io::Write;
use std::panic::Location;
use std::path::{Path, PathBuf};

use error_location::ErrorLocation;
use log::debug;
use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;

/// On-disk shape: `{"apps": [...]}`.
#[derive(Debug, Deserialize)]
struct StoreFile {
    #[serde(default)]
    apps: Vec<AppRecord>,
}

/// Ordered app records backed by one JSON file.
///
/// Every mutating method persists before returning. Insertion order is kept.
#[derive(Debug)]
pub struct AppStore {
    path: PathBuf,
    records: Vec<AppRecord>,
}

impl AppStore {
    /// Read the store. A missing file is an empty store, not an error.
    #[track_caller]
    pub fn load(path: impl Into<PathBuf>) -> Result<Self> {
        let caller = Location::caller();
        let path = path.into();

        let contents = match std::fs::read_to_string(&path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("No app store at {}, starting empty", path.display());
                return Ok(Self {
                    path,
                    records: Vec::new(),
                });
            }
            Err(e) => return Err(SupervisorError::io(path, e)),
        };

        let file: StoreFile =
            serde_json::from_str(&contents).map_err(|e| SupervisorError::Serde {
                path: path.clone(),
                source: e,
                location: ErrorLocation::from(caller),
            })?;

        Ok(Self {
            path,
            records: file.apps,
        })
    }

    /// Write the full record set: temp file in the same directory, then rename.
    #[track_caller]
    pub fn save(&self) -> Result<()> {
        let caller = Location::caller();
        let parent = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };

        std::fs::create_dir_all(&parent).map_err(|e| SupervisorError::Io {
            path: parent.clone(),
            source: e,
            location: ErrorLocation::from(caller),
        })?;

        let mut json = serde_json::to_string_pretty(&StoreFileRef {
            apps: &self.records,
        })
        .map_err(|e| SupervisorError::Serde {
            path: self.path.clone(),
            source: e,
            location: ErrorLocation::from(caller),
        })?;
        json.push('\n');

        let io_error = |source| SupervisorError::Io {
            path: self.path.clone(),
            source,
            location: ErrorLocation::from(caller),
        };

        let mut tmp = NamedTempFile::new_in(&parent).map_err(io_error)?;
        tmp.write_all(json.as_bytes()).map_err(io_error)?;
        tmp.as_file().sync_all().map_err(io_error)?;
        tmp.persist(&self.path).map_err(|e| io_error(e.error))?;

        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn records(&self) -> &[AppRecord] {
        &self.records
    }

    pub fn records_mut(&mut self) -> &mut [AppRecord] {
        &mut self.records
    }

    pub fn find(&self, name: &str) -> Option<&AppRecord> {
        self.records.iter().find(|r| r.name == name)
    }

    pub fn find_mut(&mut self, name: &str) -> Option<&mut AppRecord> {
        self.records.iter_mut().find(|r| r.name == name)
    }

    /// Like `find_mut`, but a missing app is `NotFound`.
    #[track_caller]
    pub fn get_mut(&mut self, name: &str) -> Result<&mut AppRecord> {
        let caller = Location::caller();
        self.records
            .iter_mut()
            .find(|r| r.name == name)
            .ok_or_else(|| SupervisorError::NotFound {
                name: name.to_string(),
                location: ErrorLocation::from(caller),
            })
    }

    /// Validate, check uniqueness, append and persist.
    ///
    /// Nothing changes (in memory or on disk) when any check or the save fails.
    #[track_caller]
    pub fn add(&mut self, record: AppRecord) -> Result<()> {
        let caller = Location::caller();
        record.validate()?;

        if self.find(&record.name).is_some() {
            return Err(SupervisorError::DuplicateName {
                name: record.name,
                location: ErrorLocation::from(caller),
            });
        }

        if let Some(owner) = self.records.iter().find(|r| r.port == record.port) {
            return Err(SupervisorError::DuplicatePort {
                port: record.port,
                owner: owner.name.clone(),
                location: ErrorLocation::from(caller),
            });
        }

        self.records.push(record);
        if let Err(e) = self.save() {
            self.records.pop();
            return Err(e);
        }

        Ok(())
    }

    /// Remove by name and persist. Returns the removed record.
    #[track_caller]
    pub fn remove(&mut self, name: &str) -> Result<AppRecord> {
        let caller = Location::caller();
        let index = self
            .records
            .iter()
            .position(|r| r.name == name)
            .ok_or_else(|| SupervisorError::NotFound {
                name: name.to_string(),
                location: ErrorLocation::from(caller),
            })?;

        let removed = self.records.remove(index);
        if let Err(e) = self.save() {
            self.records.insert(index, removed);
            return Err(e);
        }

        Ok(removed)
    }
}

#[derive(Serialize)]
struct StoreFileRef<'a> {
    apps: &'a [AppRecord],
}
