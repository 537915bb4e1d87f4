//! OS process probes and signals.
//!
//! Every answer here is true only as of the instant it was computed: a
//! process can exit between a probe and whatever the caller does next.

use std::time::{Duration, Instant};

use log::debug;
use nix::errno::Errno;
use nix::sys::signal::{Signal, kill};
use nix::sys::wait::{WaitPidFlag, WaitStatus, waitpid};
use nix::unistd::Pid;

const EXIT_POLL_INTERVAL: Duration = Duration::from_millis(100);

fn to_pid(pid: u32) -> Option<Pid> {
    match i32::try_from(pid) {
        Ok(raw) if raw > 0 => Some(Pid::from_raw(raw)),
        _ => None,
    }
}

/// Liveness probe.
///
/// A child of this process that has exited stays a zombie (and still answers
/// signal 0) until reaped, so children are checked with a non-blocking
/// `waitpid` first. Anything else gets `kill(pid, 0)`; any failure to confirm
/// existence, including EPERM, counts as not running.
pub fn is_running(pid: u32) -> bool {
    let Some(target) = to_pid(pid) else {
        return false;
    };

    match waitpid(target, Some(WaitPidFlag::WNOHANG)) {
        Ok(WaitStatus::StillAlive) => return true,
        Ok(WaitStatus::Exited(_, code)) => {
            debug!("Reaped PID {pid} (exit code {code})");
            return false;
        }
        Ok(WaitStatus::Signaled(_, signal, _)) => {
            debug!("Reaped PID {pid} (killed by {signal})");
            return false;
        }
        Ok(_) => return true,
        // ECHILD: not our child, fall through to the signal probe
        Err(_) => {}
    }

    kill(target, None::<Signal>).is_ok()
}

/// Deliver `signal` to `pid`.
pub fn send_signal(pid: u32, signal: Signal) -> Result<(), Errno> {
    let target = to_pid(pid).ok_or(Errno::ESRCH)?;
    kill(target, signal)
}

/// Poll the liveness probe until `pid` is gone or `timeout` elapses.
///
/// Returns whether the process exited within the bound.
pub fn wait_for_exit(pid: u32, timeout: Duration) -> bool {
    let deadline = Instant::now() + timeout;
    loop {
        if !is_running(pid) {
            return true;
        }
        let now = Instant::now();
        if now >= deadline {
            return false;
        }
        std::thread::sleep(EXIT_POLL_INTERVAL.min(deadline - now));
    }
}
