#![allow(dead_code)]

use lp_core::{AppRecord, ProcessManager, Supervisor};

use std::path::PathBuf;
use std::time::{Duration, Instant};

use tempfile::TempDir;

/// Supervisor over a throwaway store and logs directory.
pub struct TestSupervisor {
    pub temp: TempDir,
    pub supervisor: Supervisor,
}

impl TestSupervisor {
    pub fn new() -> Self {
        let temp = TempDir::new().unwrap();
        let supervisor = Supervisor::new(temp.path().join("apps.json"), temp.path().join("logs"));
        Self { temp, supervisor }
    }

    pub fn store_path(&self) -> PathBuf {
        self.temp.path().join("apps.json")
    }

    pub fn log_text(&self, name: &str) -> String {
        let bytes = self.supervisor.read_log(name).unwrap();
        String::from_utf8_lossy(&bytes).into_owned()
    }
}

impl Drop for TestSupervisor {
    fn drop(&mut self) {
        // Never leak children past the test
        let _ = self.supervisor.stop_all();
    }
}

pub fn test_manager() -> (TempDir, ProcessManager) {
    let temp = TempDir::new().unwrap();
    let manager = ProcessManager::new(temp.path().join("logs"));
    (temp, manager)
}

pub fn record(name: &str, port: u16, command: &str) -> AppRecord {
    AppRecord::new(name, port, command)
}

pub fn read_log(record: &AppRecord) -> String {
    std::fs::read_to_string(&record.log_file).unwrap()
}

/// Poll `condition` every 50ms until it holds or `timeout` passes.
pub fn wait_until(timeout: Duration, mut condition: impl FnMut() -> bool) -> bool {
    let deadline = Instant::now() + timeout;
    while Instant::now() < deadline {
        if condition() {
            return true;
        }
        std::thread::sleep(Duration::from_millis(50));
    }
    condition()
}

/// PID of a `sleep 100` whose parent shell has already exited.
///
/// The process is re-parented away from the test, so `waitpid` cannot see it.
pub fn spawn_orphan() -> u32 {
    let output = std::process::Command::new("sh")
        .args(["-c", "sleep 100 >/dev/null 2>&1 & echo $!"])
        .output()
        .unwrap();
    String::from_utf8_lossy(&output.stdout).trim().parse().unwrap()
}

/// Toggle write access to the store's directory.
///
/// Returns false when running as root, where permission bits do not stop
/// writes and the caller should skip.
pub fn set_store_writable(env: &TestSupervisor, writable: bool) -> bool {
    use std::os::unix::fs::PermissionsExt;

    // SAFETY: geteuid has no preconditions and cannot fail.
    if unsafe { libc::geteuid() } == 0 {
        return false;
    }
    let mode = if writable { 0o755 } else { 0o555 };
    std::fs::set_permissions(env.temp.path(), std::fs::Permissions::from_mode(mode)).unwrap();
    true
}
