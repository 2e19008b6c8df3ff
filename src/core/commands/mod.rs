use std::collections::BTreeMap;
use std::io::Write;
use std::path::PathBuf;

mod cd;
mod exit;
mod history;

pub use cd::CdCommand;
pub use exit::{ExitCommand, EXIT_SUCCESS};
pub use history::HistoryCommand;

use crate::core::context::Context;
use crate::core::state::ShellState;
use crate::input::Args;
use crate::process::Terminal;

#[derive(Debug)]
pub enum CommandError {
    HomeDirNotFound,
    ChangeDir { path: PathBuf, source: std::io::Error },
    IoError(std::io::Error),
}

impl std::fmt::Display for CommandError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CommandError::HomeDirNotFound => write!(f, "cd: home directory not found"),
            CommandError::ChangeDir { path, source } => {
                write!(f, "cd: {}: {}", path.display(), source)
            }
            CommandError::IoError(err) => write!(f, "IO error: {}", err),
        }
    }
}

impl std::error::Error for CommandError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CommandError::ChangeDir { source, .. } => Some(source),
            CommandError::IoError(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for CommandError {
    fn from(err: std::io::Error) -> Self {
        CommandError::IoError(err)
    }
}

/// Everything a builtin may touch while it runs.
pub struct Session<'a> {
    pub state: &'a mut ShellState,
    pub ctx: &'a mut dyn Context,
    pub terminal: &'a mut dyn Terminal,
    pub out: &'a mut dyn Write,
}

pub trait Command {
    fn execute(&self, args: &[String], session: &mut Session<'_>) -> Result<(), CommandError>;
}

#[derive(Clone)]
enum CommandType {
    Cd(CdCommand),
    Exit(ExitCommand),
    History(HistoryCommand),
}

impl Command for CommandType {
    fn execute(&self, args: &[String], session: &mut Session<'_>) -> Result<(), CommandError> {
        match self {
            CommandType::Cd(cmd) => cmd.execute(args, session),
            CommandType::Exit(cmd) => cmd.execute(args, session),
            CommandType::History(cmd) => cmd.execute(args, session),
        }
    }
}

/// Dispatches the shell builtins by their first token.
#[derive(Clone)]
pub struct CommandExecutor {
    commands: BTreeMap<&'static str, CommandType>,
}

impl Default for CommandExecutor {
    fn default() -> Self {
        Self::new()
    }
}

impl CommandExecutor {
    pub fn new() -> Self {
        let mut commands = BTreeMap::new();
        commands.insert("cd", CommandType::Cd(CdCommand::new()));
        commands.insert("exit", CommandType::Exit(ExitCommand::new()));
        commands.insert("history", CommandType::History(HistoryCommand::new()));
        Self { commands }
    }

    /// Runs `args` if it names a builtin.
    ///
    /// `Ok(false)` means the command is not a builtin (or `args` is empty) and
    /// should be executed externally. Errors are recoverable; the caller
    /// reports them and keeps reading input.
    pub fn execute(&self, args: &Args, session: &mut Session<'_>) -> Result<bool, CommandError> {
        let Some(name) = args.command() else {
            return Ok(false);
        };

        match self.commands.get(name) {
            Some(cmd) => {
                log::debug!("builtin {} {:?}", name, args.rest());
                cmd.execute(args.rest(), session)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }
}
