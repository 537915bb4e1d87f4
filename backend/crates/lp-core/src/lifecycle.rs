//! Process lifecycle for managed apps.

use crate::app_log::AppLog;
use crate::{AppRecord, Result, SupervisorError, command_line, process};

use std::panic::Location;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::time::Duration;

use error_location::ErrorLocation;
use log::{debug, info, warn};
use nix::sys::signal::Signal;

/// How long a SIGTERM'd app gets to exit on its own.
pub const GRACEFUL_STOP_TIMEOUT: Duration = Duration::from_secs(2);
/// How long to wait after SIGKILL before clearing the PID anyway.
pub const FORCEFUL_STOP_TIMEOUT: Duration = Duration::from_secs(1);

/// What `stop` found and did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopOutcome {
    /// No live process behind the record (pid 0, stale, or vanished before the signal).
    NotRunning,
    /// Exited within the grace interval after SIGTERM.
    Terminated,
    /// Needed SIGKILL.
    Killed,
}

/// Starts, stops and re-probes app processes.
///
/// Operates on records in memory only; persisting the result is up to the
/// caller.
#[derive(Debug, Clone)]
pub struct ProcessManager {
    logs_dir: PathBuf,
}

impl ProcessManager {
    pub fn new(logs_dir: impl Into<PathBuf>) -> Self {
        Self {
            logs_dir: logs_dir.into(),
        }
    }

    pub fn logs_dir(&self) -> &Path {
        &self.logs_dir
    }

    /// `<logs_dir>/<name>.log`
    pub fn log_path(&self, name: &str) -> PathBuf {
        self.logs_dir.join(format!("{name}.log"))
    }

    /// Launch the app as a detached child with output captured to its log.
    ///
    /// On success `record.pid` holds the child's PID. On `LaunchFailed` the
    /// fresh log (with the failure line) is kept on the record and `pid` is 0.
    #[track_caller]
    pub fn start(&self, record: &mut AppRecord) -> Result<()> {
        let caller = Location::caller();

        if record.pid != 0 {
            if process::is_running(record.pid) {
                return Err(SupervisorError::AlreadyRunning {
                    name: record.name.clone(),
                    pid: record.pid,
                    location: ErrorLocation::from(caller),
                });
            }
            debug!("Clearing stale PID {} for {}", record.pid, record.name);
            record.pid = 0;
        }

        let tokens = command_line::tokenize(&record.command);
        let Some((program, args)) = tokens.split_first() else {
            return Err(SupervisorError::InvalidCommand {
                name: record.name.clone(),
                command: record.command.clone(),
                location: ErrorLocation::from(caller),
            });
        };

        std::fs::create_dir_all(&self.logs_dir).map_err(|e| {
            SupervisorError::LogDirUnavailable {
                path: self.logs_dir.clone(),
                source: e,
                location: ErrorLocation::from(caller),
            }
        })?;

        let log_path = self.log_path(&record.name);
        let mut log = AppLog::create_fresh(&log_path, &record.name)?;
        record.log_file = log.path().to_string_lossy().into_owned();

        let (executable, working_dir) = resolve_program(program);

        let mut cmd = Command::new(&executable);
        cmd.args(args).env("PORT", record.port.to_string());
        if let Some(dir) = &working_dir {
            cmd.current_dir(dir);
        }

        // New session: signals aimed at the supervisor's group skip the app
        #[cfg(unix)]
        {
            use std::os::unix::process::CommandExt;
            unsafe {
                cmd.pre_exec(|| {
                    libc::setsid();
                    Ok(())
                });
            }
        }

        let spawned = log.child_stdio().and_then(|stdout| {
            let stderr = log.child_stdio()?;
            cmd.stdin(Stdio::null())
                .stdout(Stdio::from(stdout))
                .stderr(Stdio::from(stderr))
                .spawn()
        });

        let child = match spawned {
            Ok(child) => child,
            Err(e) => {
                log.line(&format!("Failed to launch: {e}"));
                warn!("Failed to launch {}: {e}", record.name);
                return Err(SupervisorError::LaunchFailed {
                    name: record.name.clone(),
                    source: e,
                    location: ErrorLocation::from(caller),
                });
            }
        };

        let pid = child.id();
        // Detached: the liveness probe reaps it once it exits
        drop(child);

        record.pid = pid;

        log.line(&format!("Command: {}", record.command));
        log.line(&format!("PID: {pid}"));
        if let Some(dir) = &working_dir {
            log.line(&format!("Working directory: {}", dir.display()));
        }
        log.line("--- Application Output ---");

        info!(
            "Started {} on port {} with PID {pid} ({})",
            record.name,
            record.port,
            executable.display()
        );

        Ok(())
    }

    /// Stop the app: SIGTERM, wait, SIGKILL if needed, then clear the PID.
    ///
    /// Never fails. The PID is always 0 afterwards.
    pub fn stop(&self, record: &mut AppRecord) -> StopOutcome {
        let pid = record.pid;

        if pid == 0 {
            return StopOutcome::NotRunning;
        }

        if !process::is_running(pid) {
            info!("{} (PID {pid}) was not running", record.name);
            record.pid = 0;
            AppLog::append_marker(&record.log_file, &format!("{} was not running", record.name));
            return StopOutcome::NotRunning;
        }

        info!("Stopping {} (PID {pid})", record.name);

        if let Err(e) = process::send_signal(pid, Signal::SIGTERM) {
            debug!("SIGTERM to PID {pid} failed: {e}");
            record.pid = 0;
            AppLog::append_marker(&record.log_file, &format!("{} was not running", record.name));
            return StopOutcome::NotRunning;
        }

        let outcome = if process::wait_for_exit(pid, GRACEFUL_STOP_TIMEOUT) {
            StopOutcome::Terminated
        } else {
            warn!(
                "{} (PID {pid}) ignored SIGTERM for {:?}, sending SIGKILL",
                record.name, GRACEFUL_STOP_TIMEOUT
            );
            if let Err(e) = process::send_signal(pid, Signal::SIGKILL) {
                debug!("SIGKILL to PID {pid} failed: {e}");
            }
            if !process::wait_for_exit(pid, FORCEFUL_STOP_TIMEOUT) {
                warn!("{} (PID {pid}) still present after SIGKILL", record.name);
            }
            StopOutcome::Killed
        };

        record.pid = 0;
        AppLog::append_marker(&record.log_file, &format!("Stopped {}", record.name));
        info!("Stopped {} ({outcome:?})", record.name);

        outcome
    }

    /// Clear every recorded PID whose process is gone.
    ///
    /// Returns how many records changed.
    pub fn reconcile_all(&self, records: &mut [AppRecord]) -> usize {
        let mut cleared = 0;

        for record in records.iter_mut().filter(|r| r.pid != 0) {
            if process::is_running(record.pid) {
                continue;
            }

            info!("{} (PID {}) has exited", record.name, record.pid);
            record.pid = 0;
            AppLog::append_marker(
                &record.log_file,
                &format!("{} exited (detected via status check)", record.name),
            );
            cleared += 1;
        }

        cleared
    }
}

/// Decide what to exec and where to run it.
///
/// Absolute programs run from their own directory. Programs given with a
/// path separator resolve against the current directory, bare names against
/// `PATH`. Anything unresolved runs as given, in the inherited directory.
pub(crate) fn resolve_program(program: &str) -> (PathBuf, Option<PathBuf>) {
    let as_path = Path::new(program);

    let resolved = if as_path.is_absolute() {
        Some(as_path.to_path_buf())
    } else if program.contains(std::path::MAIN_SEPARATOR) {
        std::env::current_dir()
            .ok()
            .map(|cwd| cwd.join(as_path))
            .and_then(|candidate| candidate.canonicalize().ok())
    } else {
        search_path(program)
    };

    match resolved {
        Some(path) => {
            let working_dir = path.parent().map(Path::to_path_buf);
            (path, working_dir)
        }
        None => (as_path.to_path_buf(), None),
    }
}

fn search_path(program: &str) -> Option<PathBuf> {
    let path_var = std::env::var_os("PATH")?;
    std::env::split_paths(&path_var)
        .filter(|dir| !dir.as_os_str().is_empty())
        .map(|dir| dir.join(program))
        .find(|candidate| is_executable_file(candidate))
}

#[cfg(unix)]
fn is_executable_file(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;

    std::fs::metadata(path)
        .map(|meta| meta.is_file() && meta.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}
