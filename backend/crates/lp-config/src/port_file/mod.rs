pub(crate) mod port_file_info;

/// Whether a process with the given PID currently exists.
///
/// `kill(pid, 0)` checks existence without delivering a signal. A PID that
/// does not fit in `pid_t`, or that we may not signal, counts as not running.
#[cfg(unix)]
pub fn is_process_running(pid: u32) -> bool {
    let Ok(raw) = libc::pid_t::try_from(pid) else {
        return false;
    };
    if raw <= 0 {
        return false;
    }
    // SAFETY: signal 0 performs only the existence/permission check.
    unsafe { libc::kill(raw, 0) == 0 }
}
