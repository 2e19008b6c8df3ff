pub mod parser;
pub mod prompt;

pub use parser::{cmd_parse, trim_white, Args, CommandParser};
pub use prompt::{get_prompt, DEFAULT_PROMPT};
