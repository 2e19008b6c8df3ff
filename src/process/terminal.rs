use std::io;
use std::os::unix::io::RawFd;

use libc::{c_int, pid_t};

use super::signal;
use super::ProcessError;

/// Job control primitives used while setting up the shell session.
///
/// [`SystemTerminal`] calls straight into libc. Tests drive
/// [`crate::core::state::ShellState::init`] through a scripted
/// implementation instead of a real terminal.
pub trait Terminal {
    fn fd(&self) -> RawFd;

    fn is_tty(&self) -> bool;

    /// `tcgetpgrp`
    fn foreground_group(&self) -> io::Result<pid_t>;

    /// `getpgrp`
    fn process_group(&self) -> pid_t;

    fn pid(&self) -> pid_t;

    /// `killpg`
    fn signal_group(&mut self, pgid: pid_t, sig: c_int) -> io::Result<()>;

    /// `setpgid`
    fn set_process_group(&mut self, pid: pid_t, pgid: pid_t) -> io::Result<()>;

    /// `tcsetpgrp`
    fn set_foreground_group(&mut self, pgid: pid_t) -> io::Result<()>;

    /// `tcgetattr`
    fn attributes(&self) -> io::Result<libc::termios>;

    /// `tcsetattr` with `TCSADRAIN`
    fn set_attributes(&mut self, modes: &libc::termios) -> io::Result<()>;

    fn ignore_job_control_signals(&mut self) -> Result<(), ProcessError>;
}

fn check(ret: c_int) -> io::Result<()> {
    if ret < 0 {
        Err(io::Error::last_os_error())
    } else {
        Ok(())
    }
}

/// The controlling terminal on standard input.
#[derive(Debug, Clone, Copy)]
pub struct SystemTerminal {
    fd: RawFd,
}

impl Default for SystemTerminal {
    fn default() -> Self {
        Self::new()
    }
}

impl SystemTerminal {
    pub fn new() -> Self {
        Self {
            fd: libc::STDIN_FILENO,
        }
    }
}

// SAFETY (all blocks below): the wrapped calls take plain integers or a
// pointer to a termios owned by the caller, and report failure through the
// return value and errno.
impl Terminal for SystemTerminal {
    fn fd(&self) -> RawFd {
        self.fd
    }

    fn is_tty(&self) -> bool {
        unsafe { libc::isatty(self.fd) == 1 }
    }

    fn foreground_group(&self) -> io::Result<pid_t> {
        let pgid = unsafe { libc::tcgetpgrp(self.fd) };
        check(pgid)?;
        Ok(pgid)
    }

    fn process_group(&self) -> pid_t {
        unsafe { libc::getpgrp() }
    }

    fn pid(&self) -> pid_t {
        unsafe { libc::getpid() }
    }

    fn signal_group(&mut self, pgid: pid_t, sig: c_int) -> io::Result<()> {
        check(unsafe { libc::killpg(pgid, sig) })
    }

    fn set_process_group(&mut self, pid: pid_t, pgid: pid_t) -> io::Result<()> {
        check(unsafe { libc::setpgid(pid, pgid) })
    }

    fn set_foreground_group(&mut self, pgid: pid_t) -> io::Result<()> {
        check(unsafe { libc::tcsetpgrp(self.fd, pgid) })
    }

    fn attributes(&self) -> io::Result<libc::termios> {
        let mut modes = unsafe { std::mem::zeroed::<libc::termios>() };
        check(unsafe { libc::tcgetattr(self.fd, &mut modes) })?;
        Ok(modes)
    }

    fn set_attributes(&mut self, modes: &libc::termios) -> io::Result<()> {
        check(unsafe { libc::tcsetattr(self.fd, libc::TCSADRAIN, modes) })
    }

    fn ignore_job_control_signals(&mut self) -> Result<(), ProcessError> {
        signal::ignore_job_control_signals()
    }
}
