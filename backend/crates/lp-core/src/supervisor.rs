//! Serialized entry point for every caller of the core.

use crate::{
    AppRecord, AppStore, BulkReport, ProcessManager, Result, StopOutcome, SupervisorError,
};

use std::panic::Location;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, PoisonError};

use error_location::ErrorLocation;
use log::{info, warn};

/// Owns the store location and the process manager.
///
/// Each operation holds one lock across load, mutate and save, so concurrent
/// callers (HTTP handlers) never interleave their read-modify-write cycles.
/// The store is re-read every time; the file stays the only source of truth.
#[derive(Debug)]
pub struct Supervisor {
    store_path: PathBuf,
    manager: ProcessManager,
    guard: Mutex<()>,
}

impl Supervisor {
    pub fn new(store_path: impl Into<PathBuf>, logs_dir: impl Into<PathBuf>) -> Self {
        Self {
            store_path: store_path.into(),
            manager: ProcessManager::new(logs_dir),
            guard: Mutex::new(()),
        }
    }

    pub fn store_path(&self) -> &Path {
        &self.store_path
    }

    pub fn manager(&self) -> &ProcessManager {
        &self.manager
    }

    fn lock(&self) -> MutexGuard<'_, ()> {
        // The guarded value is (), so a panicked holder leaves nothing inconsistent
        self.guard.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// All records after reconciling their PIDs against the OS.
    pub fn list_records(&self) -> Result<Vec<AppRecord>> {
        let _guard = self.lock();
        let mut store = AppStore::load(&self.store_path)?;

        let cleared = self.manager.reconcile_all(store.records_mut());
        if cleared > 0
            && let Err(e) = store.save()
        {
            warn!("Failed to persist {cleared} cleared PIDs: {e}");
        }

        Ok(store.records().to_vec())
    }

    /// Declare a new, stopped app.
    pub fn add_record(&self, name: &str, port: u16, command: &str) -> Result<AppRecord> {
        let _guard = self.lock();
        let mut store = AppStore::load(&self.store_path)?;

        let record = AppRecord::new(name, port, command);
        store.add(record.clone())?;
        info!("Added {name} (port {port}): {command}");

        Ok(record)
    }

    /// Stop the app if it is live, then forget it.
    pub fn delete_record(&self, name: &str) -> Result<AppRecord> {
        let _guard = self.lock();
        let mut store = AppStore::load(&self.store_path)?;

        let record = store.get_mut(name)?;
        self.manager.stop(record);

        let removed = store.remove(name)?;
        info!("Deleted {name}");

        Ok(removed)
    }

    /// Start one app and persist its PID and log path.
    ///
    /// A launch failure still persists the fresh log path so the failure can
    /// be read back.
    pub fn start_record(&self, name: &str) -> Result<AppRecord> {
        let _guard = self.lock();
        let mut store = AppStore::load(&self.store_path)?;

        let record = store.get_mut(name)?;
        let started = self.manager.start(record);
        let snapshot = record.clone();

        match started {
            Ok(()) => {
                store.save()?;
                Ok(snapshot)
            }
            Err(e) => {
                if matches!(e, SupervisorError::LaunchFailed { .. })
                    && let Err(save_err) = store.save()
                {
                    warn!("Failed to persist launch failure of {name}: {save_err}");
                }
                Err(e)
            }
        }
    }

    /// Start every app that is not already live.
    ///
    /// Per-app errors are collected, never returned. Only a store that cannot
    /// be read fails the whole batch.
    pub fn start_all(&self) -> Result<BulkReport> {
        let _guard = self.lock();
        let mut store = AppStore::load(&self.store_path)?;
        let mut report = BulkReport::default();

        let names: Vec<String> = store.records().iter().map(|r| r.name.clone()).collect();
        for name in names {
            let Some(record) = store.find_mut(&name) else {
                continue;
            };

            if record.pid != 0 && crate::process::is_running(record.pid) {
                report.skipped.push(name);
                continue;
            }

            let started = self.manager.start(record);
            let persist = store.save();

            match (started, persist) {
                (Ok(()), Ok(())) => report.succeeded.push(name),
                (Err(e), _) => report.fail(&name, e),
                (Ok(()), Err(e)) => report.fail(&name, e),
            }
        }

        info!(
            "Start all: {} started, {} already running, {} failed",
            report.succeeded.len(),
            report.skipped.len(),
            report.failed.len()
        );

        Ok(report)
    }

    /// Stop one app. Stopping a stopped app succeeds.
    ///
    /// Once the app exists this never fails: the process has already been
    /// signalled, so a failed save is only logged.
    pub fn stop_record(&self, name: &str) -> Result<AppRecord> {
        let _guard = self.lock();
        let mut store = AppStore::load(&self.store_path)?;

        let record = store.get_mut(name)?;
        let previous_pid = record.pid;
        let outcome = self.manager.stop(record);
        let snapshot = record.clone();

        if previous_pid != 0
            && let Err(e) = store.save()
        {
            warn!("Failed to persist stop of {name}: {e}");
        }
        if outcome == StopOutcome::Killed {
            warn!("{name} had to be killed");
        }

        Ok(snapshot)
    }

    /// Stop every app with a recorded PID.
    pub fn stop_all(&self) -> Result<BulkReport> {
        let _guard = self.lock();
        let mut store = AppStore::load(&self.store_path)?;
        let mut report = BulkReport::default();

        let names: Vec<String> = store.records().iter().map(|r| r.name.clone()).collect();
        for name in names {
            let Some(record) = store.find_mut(&name) else {
                continue;
            };

            if record.pid == 0 {
                report.skipped.push(name);
                continue;
            }

            self.manager.stop(record);
            match store.save() {
                Ok(()) => report.succeeded.push(name),
                Err(e) => report.fail(&name, e),
            }
        }

        info!(
            "Stop all: {} stopped, {} not running, {} failed",
            report.succeeded.len(),
            report.skipped.len(),
            report.failed.len()
        );

        Ok(report)
    }

    /// Contents of the app's log file.
    #[track_caller]
    pub fn read_log(&self, name: &str) -> Result<Vec<u8>> {
        let caller = Location::caller();
        let _guard = self.lock();
        let store = AppStore::load(&self.store_path)?;

        let record = store.find(name).ok_or_else(|| SupervisorError::NotFound {
            name: name.to_string(),
            location: ErrorLocation::from(caller),
        })?;

        if !record.has_log() {
            return Err(SupervisorError::LogNotFound {
                name: name.to_string(),
                location: ErrorLocation::from(caller),
            });
        }

        match std::fs::read(&record.log_file) {
            Ok(bytes) => Ok(bytes),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(SupervisorError::LogNotFound {
                    name: name.to_string(),
                    location: ErrorLocation::from(caller),
                })
            }
            Err(e) => Err(SupervisorError::Io {
                path: PathBuf::from(&record.log_file),
                source: e,
                location: ErrorLocation::from(caller),
            }),
        }
    }
}
