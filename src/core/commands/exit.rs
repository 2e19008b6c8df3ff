use super::{Command, CommandError, Session};

pub const EXIT_SUCCESS: i32 = 0;

#[derive(Clone, Default)]
pub struct ExitCommand;

impl ExitCommand {
    pub fn new() -> Self {
        Self
    }

    fn status(args: &[String]) -> i32 {
        match args.first() {
            None => EXIT_SUCCESS,
            Some(arg) => arg.parse().unwrap_or_else(|_| {
                eprintln!("exit: {}: numeric argument required", arg);
                EXIT_SUCCESS
            }),
        }
    }
}

impl Command for ExitCommand {
    /// Restores the terminal, tears the shell state down and terminates the
    /// process. Never returns.
    fn execute(&self, args: &[String], session: &mut Session<'_>) -> Result<(), CommandError> {
        let code = Self::status(args);
        session.state.shutdown(session.terminal);
        session.ctx.exit(code)
    }
}
