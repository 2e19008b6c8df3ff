use crate::core::context::Context;

pub const DEFAULT_PROMPT: &str = "shell>";

/// Value of the environment variable `var`, or [`DEFAULT_PROMPT`] when it is unset.
pub fn get_prompt(ctx: &dyn Context, var: &str) -> String {
    ctx.var(var).unwrap_or_else(|| DEFAULT_PROMPT.to_string())
}
