use std::os::unix::process::{CommandExt, ExitStatusExt};
use std::process::{Command, ExitStatus, Stdio};

use super::{signal, ProcessError};
use crate::input::Args;

/// Runs external commands in the foreground and waits for them.
///
/// The child stays in the shell's process group; only the signal
/// dispositions the shell ignores are reset before exec.
#[derive(Debug, Clone, Default)]
pub struct ProcessExecutor {
    quiet_mode: bool,
}

impl ProcessExecutor {
    pub fn new(quiet_mode: bool) -> Self {
        ProcessExecutor { quiet_mode }
    }

    pub fn spawn_process(&self, args: &Args) -> Result<ExitStatus, ProcessError> {
        let program = args
            .command()
            .ok_or_else(|| ProcessError::Other("empty command".to_string()))?;

        let mut command = Command::new(program);
        command
            .args(args.rest())
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit());

        // SAFETY: the hook only calls signal(2), which is async-signal-safe.
        unsafe {
            command.pre_exec(signal::restore_default_signals);
        }

        let mut child = match command.spawn() {
            Ok(child) => child,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(ProcessError::CommandNotFound(program.to_string()));
            }
            Err(e) => return Err(e.into()),
        };

        log::debug!("spawned {} as pid {}", program, child.id());
        let status = child.wait()?;
        log::debug!("{} exited with {}", program, status);

        if !status.success() && !self.quiet_mode {
            match status.signal() {
                Some(sig) => eprintln!("{}: terminated by signal {}", program, sig),
                None => eprintln!(
                    "{}: exited with status {}",
                    program,
                    status.code().unwrap_or(-1)
                ),
            }
        }
        Ok(status)
    }
}
