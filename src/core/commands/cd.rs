use std::path::PathBuf;

use super::{Command, CommandError, Session};

#[derive(Clone, Default)]
pub struct CdCommand;

impl CdCommand {
    pub fn new() -> Self {
        Self
    }
}

impl Command for CdCommand {
    /// `cd` goes home; `cd DIR` goes to DIR. Extra arguments are ignored.
    fn execute(&self, args: &[String], session: &mut Session<'_>) -> Result<(), CommandError> {
        let target = match args.first() {
            Some(dir) => PathBuf::from(dir),
            None => session.ctx.home_dir().ok_or(CommandError::HomeDirNotFound)?,
        };

        session
            .ctx
            .set_current_dir(&target)
            .map_err(|source| CommandError::ChangeDir {
                path: target.clone(),
                source,
            })?;

        log::debug!("changed directory to {}", target.display());
        Ok(())
    }
}
