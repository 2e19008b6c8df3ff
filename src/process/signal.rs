use std::io;

use libc::{
    c_int, sighandler_t, SIGINT, SIGQUIT, SIGTSTP, SIGTTIN, SIGTTOU, SIG_DFL, SIG_ERR, SIG_IGN,
};

use crate::process::ProcessError;

/// Signals meant for foreground jobs that must not stop or kill the shell.
pub const JOB_CONTROL_SIGNALS: [c_int; 5] = [SIGINT, SIGQUIT, SIGTSTP, SIGTTIN, SIGTTOU];

fn set_disposition(sig: c_int, handler: sighandler_t) -> io::Result<()> {
    // SAFETY: SIG_IGN and SIG_DFL are valid dispositions for every signal in
    // JOB_CONTROL_SIGNALS; no Rust handler is installed.
    if unsafe { libc::signal(sig, handler) } == SIG_ERR {
        return Err(io::Error::last_os_error());
    }
    Ok(())
}

pub fn ignore_job_control_signals() -> Result<(), ProcessError> {
    for sig in JOB_CONTROL_SIGNALS {
        set_disposition(sig, SIG_IGN).map_err(|e| {
            ProcessError::SignalError(format!("cannot ignore signal {}: {}", sig, e))
        })?;
    }
    Ok(())
}

/// Puts the job control signals back to their defaults.
///
/// Only calls `signal(2)`, so it is safe to run between fork and exec.
pub fn restore_default_signals() -> io::Result<()> {
    for sig in JOB_CONTROL_SIGNALS {
        set_disposition(sig, SIG_DFL)?;
    }
    Ok(())
}
