use std::io;

use rustyline::error::ReadlineError;
use rustyline::{config::Configurer, history::FileHistory, Editor};

use crate::{
    config::Config,
    core::{CommandExecutor, Session, ShellState, SystemContext},
    error::ShellError,
    highlight::Highlighter,
    input::{get_prompt, CommandParser},
    process::{ProcessExecutor, SystemTerminal},
};

/// The interactive read-eval loop.
pub struct Shell {
    pub(crate) editor: Editor<(), FileHistory>,
    pub(crate) state: ShellState,
    pub(crate) terminal: SystemTerminal,
    pub(crate) parser: CommandParser,
    pub(crate) builtins: CommandExecutor,
    pub(crate) executor: ProcessExecutor,
    pub(crate) highlighter: Highlighter,
    pub(crate) config: Config,
}

impl Shell {
    /// Takes over the terminal and prepares the line editor.
    ///
    /// Any error from here is fatal for the session.
    pub fn new(config: Config) -> Result<Self, ShellError> {
        let mut terminal = SystemTerminal::new();
        let state = ShellState::init(&mut terminal)?;

        let mut editor = Editor::<(), FileHistory>::new()?;
        editor.set_max_history_size(config.history_size)?;

        if let Some(path) = &config.history_file {
            if path.exists() {
                if let Err(e) = editor.load_history(path) {
                    log::warn!("could not load history from {}: {}", path.display(), e);
                }
            }
        }

        Ok(Shell {
            editor,
            state,
            terminal,
            parser: CommandParser::new(),
            builtins: CommandExecutor::new(),
            executor: ProcessExecutor::new(config.quiet),
            highlighter: Highlighter::new(),
            config,
        })
    }

    pub fn run(&mut self) -> Result<(), ShellError> {
        let result = self.read_loop();
        self.shutdown();
        result
    }

    fn read_loop(&mut self) -> Result<(), ShellError> {
        loop {
            let prompt = get_prompt(&SystemContext::default(), &self.config.prompt_var);
            self.state.set_prompt(prompt);
            let prompt = self.state.prompt().unwrap_or_default().to_string();

            match self.editor.readline(&prompt) {
                Ok(line) => {
                    self.record(&line);
                    self.execute_line(&line);
                }
                Err(ReadlineError::Interrupted) => continue,
                Err(ReadlineError::Eof) => {
                    if self.state.is_interactive() && !self.config.quiet {
                        println!();
                    }
                    return Ok(());
                }
                Err(e) => return Err(e.into()),
            }
        }
    }

    /// Runs one line: builtins first, everything else as an external command.
    pub fn execute_line(&mut self, line: &str) {
        let args = self.parser.parse(line);
        if args.is_empty() {
            return;
        }

        let handled = {
            let mut ctx = SystemContext::new(Some(self.editor.history()));
            let mut stdout = io::stdout();
            let mut session = Session {
                state: &mut self.state,
                ctx: &mut ctx,
                terminal: &mut self.terminal,
                out: &mut stdout,
            };
            self.builtins.execute(&args, &mut session)
        };

        match handled {
            Ok(true) => {}
            Ok(false) => {
                if let Err(e) = self.executor.spawn_process(&args) {
                    self.report(&e);
                }
            }
            Err(e) => self.report(&e),
        }
        args.release();
    }

    fn report(&self, err: &dyn std::error::Error) {
        eprintln!("{}", self.highlighter.highlight_error(&err.to_string()));
    }

    // The history file is appended after every line so `exit` cannot lose entries.
    fn record(&mut self, line: &str) {
        if line.trim().is_empty() {
            return;
        }
        if let Err(e) = self.editor.add_history_entry(line) {
            if !self.config.quiet {
                eprintln!("Warning: Couldn't add to history: {}", e);
            }
        }

        let Some(path) = &self.config.history_file else {
            return;
        };
        if let Err(e) = self.editor.append_history(path) {
            if !self.config.quiet {
                eprintln!("Warning: Couldn't save history: {}", e);
            }
        }
    }

    fn shutdown(&mut self) {
        self.state.shutdown(&mut self.terminal);
    }
}
