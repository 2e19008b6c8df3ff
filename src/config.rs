use std::path::PathBuf;

use crate::flags::Flags;

pub const DEFAULT_PROMPT_VAR: &str = "MY_PROMPT";
pub const HISTORY_FILE_NAME: &str = ".labsh_history";
pub const DEFAULT_HISTORY_SIZE: usize = 1000;

/// Runtime settings resolved from the command line.
#[derive(Debug, Clone)]
pub struct Config {
    pub prompt_var: String,
    /// `None` when no home directory could be found; history is then kept in memory only.
    pub history_file: Option<PathBuf>,
    pub history_size: usize,
    pub quiet: bool,
    pub debug: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            prompt_var: DEFAULT_PROMPT_VAR.to_string(),
            history_file: dirs::home_dir().map(|home| home.join(HISTORY_FILE_NAME)),
            history_size: DEFAULT_HISTORY_SIZE,
            quiet: false,
            debug: false,
        }
    }
}

impl Config {
    pub fn from_flags(flags: &Flags) -> Self {
        let mut config = Config::default();
        if let Some(var) = flags.get_value("prompt-var") {
            config.prompt_var = var.clone();
        }
        config.quiet = flags.is_set("quiet");
        config.debug = flags.is_set("debug");
        config
    }

    pub fn log_level(&self) -> log::LevelFilter {
        if self.debug {
            log::LevelFilter::Debug
        } else {
            log::LevelFilter::Warn
        }
    }
}
