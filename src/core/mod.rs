pub mod commands;
pub mod context;
pub mod state;

pub use commands::{CommandError, CommandExecutor, Session};
pub use context::{Context, SystemContext};
pub use state::ShellState;
