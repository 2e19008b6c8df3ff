use super::{Command, CommandError, Session};

#[derive(Clone, Default)]
pub struct HistoryCommand;

impl HistoryCommand {
    pub fn new() -> Self {
        Self
    }
}

impl Command for HistoryCommand {
    /// Prints `<n>: <line>` for every entry, oldest first, numbered from 1.
    /// Prints nothing when no history is attached.
    fn execute(&self, _args: &[String], session: &mut Session<'_>) -> Result<(), CommandError> {
        let Some(lines) = session.ctx.history() else {
            return Ok(());
        };

        for (index, line) in lines.iter().enumerate() {
            writeln!(session.out, "{}: {}", index + 1, line)?;
        }
        session.out.flush()?;
        Ok(())
    }
}
