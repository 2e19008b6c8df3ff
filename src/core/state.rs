use std::os::unix::io::RawFd;

use libc::pid_t;

use crate::error::ShellError;
use crate::process::Terminal;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Running,
    Terminated,
}

/// Session attributes of the running shell.
///
/// The value is owned by whoever called [`ShellState::init`]; [`ShellState::destroy`]
/// only releases what the state allocated itself (the prompt).
pub struct ShellState {
    terminal: RawFd,
    interactive: bool,
    pgid: pid_t,
    modes: Option<libc::termios>,
    prompt: Option<String>,
    phase: Phase,
}

impl ShellState {
    /// Ignores the job control signals and takes over the controlling
    /// terminal when standard input is one.
    ///
    /// When launched in the background this keeps stopping its own process
    /// group with SIGTTIN until the parent hands over the terminal. The wait
    /// is unbounded. A failing `setpgid` is returned as
    /// [`ShellError::ProcessGroup`], which the caller must treat as fatal.
    pub fn init(term: &mut dyn Terminal) -> Result<Self, ShellError> {
        let terminal = term.fd();
        let interactive = term.is_tty();
        let mut pgid = term.process_group();
        let mut modes = None;

        if interactive {
            loop {
                pgid = term.process_group();
                if term.foreground_group()? == pgid {
                    break;
                }
                log::debug!("process group {} is in the background, stopping", pgid);
                term.signal_group(pgid, libc::SIGTTIN)?;
            }
        }

        // SIGTTOU must already be ignored when the new group takes the terminal.
        term.ignore_job_control_signals()?;

        if interactive {
            let pid = term.pid();
            if pgid != pid {
                term.set_process_group(pid, pid)
                    .map_err(ShellError::ProcessGroup)?;
            }
            pgid = pid;

            if let Err(e) = term.set_foreground_group(pgid) {
                log::warn!("tcsetpgrp: {}", e);
            }
            modes = match term.attributes() {
                Ok(modes) => Some(modes),
                Err(e) => {
                    log::warn!("tcgetattr: {}", e);
                    None
                }
            };
            log::debug!("interactive session on fd {} with pgid {}", terminal, pgid);
        }

        Ok(ShellState {
            terminal,
            interactive,
            pgid,
            modes,
            prompt: None,
            phase: Phase::Running,
        })
    }

    pub fn terminal(&self) -> RawFd {
        self.terminal
    }

    pub fn is_interactive(&self) -> bool {
        self.interactive
    }

    pub fn pgid(&self) -> pid_t {
        self.pgid
    }

    pub fn saved_modes(&self) -> Option<&libc::termios> {
        self.modes.as_ref()
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn prompt(&self) -> Option<&str> {
        self.prompt.as_deref()
    }

    pub fn set_prompt(&mut self, prompt: String) {
        self.prompt = Some(prompt);
    }

    /// Writes the attributes captured at startup back to the terminal.
    pub fn restore_modes(&self, term: &mut dyn Terminal) {
        if let Some(modes) = &self.modes {
            if let Err(e) = term.set_attributes(modes) {
                log::warn!("tcsetattr: {}", e);
            }
        }
    }

    /// Releases the prompt. Calling it again is a no-op.
    pub fn destroy(&mut self) {
        self.prompt = None;
        self.phase = Phase::Terminated;
    }

    /// Teardown shared by `exit` and end of input.
    pub fn shutdown(&mut self, term: &mut dyn Terminal) {
        self.restore_modes(term);
        self.destroy();
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use crate::process::ProcessError;
    use libc::c_int;
    use std::io;

    /// Scripted terminal. The shell becomes foreground after `grant_after`
    /// SIGTTIN deliveries to its group.
    pub struct ScriptedTerminal {
        pub tty: bool,
        pub pid: pid_t,
        pub pgrp: pid_t,
        pub foreground: pid_t,
        pub grant_after: usize,
        pub setpgid_error: Option<i32>,
        pub tcgetattr_error: bool,
        pub sent: Vec<(pid_t, c_int)>,
        pub calls: Vec<&'static str>,
        pub signals_ignored: bool,
        pub restored: bool,
    }

    impl ScriptedTerminal {
        pub fn interactive() -> Self {
            Self {
                tty: true,
                pid: 4242,
                pgrp: 4000,
                foreground: 4000,
                grant_after: 0,
                setpgid_error: None,
                tcgetattr_error: false,
                sent: Vec::new(),
                calls: Vec::new(),
                signals_ignored: false,
                restored: false,
            }
        }

        pub fn piped() -> Self {
            Self {
                tty: false,
                ..Self::interactive()
            }
        }
    }

    impl Terminal for ScriptedTerminal {
        fn fd(&self) -> RawFd {
            0
        }

        fn is_tty(&self) -> bool {
            self.tty
        }

        fn foreground_group(&self) -> io::Result<pid_t> {
            if self.sent.len() >= self.grant_after {
                Ok(self.pgrp)
            } else {
                Ok(self.foreground)
            }
        }

        fn process_group(&self) -> pid_t {
            self.pgrp
        }

        fn pid(&self) -> pid_t {
            self.pid
        }

        fn signal_group(&mut self, pgid: pid_t, sig: c_int) -> io::Result<()> {
            self.sent.push((pgid, sig));
            Ok(())
        }

        fn set_process_group(&mut self, pid: pid_t, pgid: pid_t) -> io::Result<()> {
            self.calls.push("setpgid");
            if let Some(errno) = self.setpgid_error {
                return Err(io::Error::from_raw_os_error(errno));
            }
            assert_eq!(pid, pgid);
            self.pgrp = pgid;
            Ok(())
        }

        fn set_foreground_group(&mut self, pgid: pid_t) -> io::Result<()> {
            self.calls.push("tcsetpgrp");
            self.foreground = pgid;
            Ok(())
        }

        fn attributes(&self) -> io::Result<libc::termios> {
            if self.tcgetattr_error {
                return Err(io::Error::from_raw_os_error(libc::ENOTTY));
            }
            // SAFETY: termios is plain old data.
            Ok(unsafe { std::mem::zeroed() })
        }

        fn set_attributes(&mut self, _modes: &libc::termios) -> io::Result<()> {
            self.restored = true;
            Ok(())
        }

        fn ignore_job_control_signals(&mut self) -> Result<(), ProcessError> {
            self.calls.push("ignore");
            self.signals_ignored = true;
            Ok(())
        }
    }
}
