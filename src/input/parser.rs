/// Used when `sysconf(_SC_ARG_MAX)` cannot be queried.
pub const FALLBACK_MAX_ARGS: usize = 4096;

/// Returns an owned copy of `line` without leading or trailing whitespace.
pub fn trim_white(line: &str) -> String {
    line.trim().to_string()
}

/// Platform limit on process arguments, used as the token cap.
pub fn max_args() -> usize {
    // SAFETY: sysconf has no preconditions.
    let limit = unsafe { libc::sysconf(libc::_SC_ARG_MAX) };
    if limit > 0 {
        limit as usize
    } else {
        FALLBACK_MAX_ARGS
    }
}

/// The owned argument vector of one command invocation.
///
/// Every element is a non-empty owned string. Iteration and [`Args::get`]
/// return `None` past the last argument, which marks the end of the vector.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Args {
    args: Vec<String>,
}

impl Args {
    pub fn command(&self) -> Option<&str> {
        self.get(0)
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.args.get(index).map(String::as_str)
    }

    /// Arguments after the command name.
    pub fn rest(&self) -> &[String] {
        self.args.get(1..).unwrap_or(&[])
    }

    pub fn len(&self) -> usize {
        self.args.len()
    }

    pub fn is_empty(&self) -> bool {
        self.args.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.args.iter()
    }

    pub fn as_slice(&self) -> &[String] {
        &self.args
    }

    /// Frees every argument and the vector itself. Consuming `self` makes a
    /// second release impossible; dropping has the same effect.
    pub fn release(self) {
        drop(self)
    }
}

impl<'a> IntoIterator for &'a Args {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.args.iter()
    }
}

impl IntoIterator for Args {
    type Item = String;
    type IntoIter = std::vec::IntoIter<String>;

    fn into_iter(self) -> Self::IntoIter {
        self.args.into_iter()
    }
}

/// Splits command lines on runs of whitespace. No quoting, escaping or
/// globbing is performed.
#[derive(Debug, Clone, Copy)]
pub struct CommandParser {
    max_args: usize,
}

impl Default for CommandParser {
    fn default() -> Self {
        Self::new()
    }
}

impl CommandParser {
    pub fn new() -> Self {
        Self::with_max_args(max_args())
    }

    pub fn with_max_args(max_args: usize) -> Self {
        Self { max_args }
    }

    pub fn max_args(&self) -> usize {
        self.max_args
    }

    /// Tokens beyond the cap are dropped silently; the first `max_args` are kept in order.
    pub fn parse(&self, line: &str) -> Args {
        let trimmed = trim_white(line);
        let args: Vec<String> = trimmed
            .split_whitespace()
            .take(self.max_args)
            .map(str::to_owned)
            .collect();

        if log::log_enabled!(log::Level::Debug)
            && trimmed.split_whitespace().count() > args.len()
        {
            log::debug!("command line truncated to {} arguments", self.max_args);
        }

        Args { args }
    }
}

/// Parses `line` with the platform argument cap.
pub fn cmd_parse(line: &str) -> Args {
    CommandParser::new().parse(line)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trim_strips_both_ends() {
        assert_eq!(trim_white("  ls -l \t\n"), "ls -l");
        assert_eq!(trim_white("\t echo  hi"), "echo  hi");
        assert_eq!(trim_white("pwd"), "pwd");
    }

    #[test]
    fn test_trim_whitespace_only_is_empty() {
        for input in ["", " ", "\t\t", "\n", " \r\n\t \x0b\x0c"] {
            assert_eq!(trim_white(input), "");
        }
    }

    #[test]
    fn test_trim_is_idempotent() {
        for input in ["  a b  ", "abc", "\tx\ty\t", ""] {
            let once = trim_white(input);
            assert_eq!(trim_white(&once), once);
        }
    }

    #[test]
    fn test_trim_leaves_input_untouched() {
        let line = String::from("  cd /tmp  ");
        let trimmed = trim_white(&line);
        assert_eq!(line, "  cd /tmp  ");
        assert_eq!(trimmed, "cd /tmp");
    }

    #[test]
    fn test_absent_line_stays_absent() {
        let line: Option<&str> = None;
        assert_eq!(line.map(trim_white), None);
        assert_eq!(line.map(cmd_parse), None);
    }

    #[test]
    fn test_parse_splits_on_whitespace_runs() {
        let args = cmd_parse("  ls   -l \t /tmp\n");
        assert_eq!(args.as_slice(), ["ls", "-l", "/tmp"]);
        assert_eq!(args.command(), Some("ls"));
        assert_eq!(args.rest(), ["-l", "/tmp"]);
    }

    #[test]
    fn test_parse_empty_line() {
        let args = cmd_parse("   \t ");
        assert!(args.is_empty());
        assert_eq!(args.command(), None);
        assert!(args.rest().is_empty());
    }

    #[test]
    fn test_end_of_arguments() {
        let args = cmd_parse("echo hello");
        assert_eq!(args.get(1), Some("hello"));
        assert_eq!(args.get(2), None);

        let mut iter = args.iter();
        assert_eq!(iter.next().map(String::as_str), Some("echo"));
        assert_eq!(iter.next().map(String::as_str), Some("hello"));
        assert_eq!(iter.next(), None);
    }

    #[test]
    fn test_no_quoting_or_globbing() {
        let args = cmd_parse("echo \"a b\" *.rs \\n");
        assert_eq!(args.as_slice(), ["echo", "\"a", "b\"", "*.rs", "\\n"]);
    }

    #[test]
    fn test_single_space_round_trip() {
        for line in ["ls -l /tmp", "echo one two three", "pwd"] {
            let args = cmd_parse(&format!("  {}\n", line));
            let joined: Vec<&str> = args.iter().map(String::as_str).collect();
            assert_eq!(joined.join(" "), line);
        }
    }

    #[test]
    fn test_truncates_to_max_args() {
        let parser = CommandParser::with_max_args(3);
        let args = parser.parse("a b c d e f");
        assert_eq!(args.len(), 3);
        assert_eq!(args.as_slice(), ["a", "b", "c"]);
        assert_eq!(args.get(3), None);
    }

    #[test]
    fn test_exactly_max_args_is_kept() {
        let parser = CommandParser::with_max_args(2);
        assert_eq!(parser.parse("cd /tmp").as_slice(), ["cd", "/tmp"]);
    }

    #[test]
    fn test_default_cap_is_platform_limit() {
        assert!(max_args() > 0);
        assert_eq!(CommandParser::new().max_args(), max_args());
    }

    #[test]
    fn test_tokens_are_independent_copies() {
        let line = String::from("cat file");
        let args = cmd_parse(&line);
        drop(line);
        assert_eq!(args.get(1), Some("file"));
    }

    #[test]
    fn test_release_is_single_owner() {
        let args = cmd_parse("history now");
        let copy = args.clone();
        args.release();
        assert_eq!(copy.as_slice(), ["history", "now"]);

        let absent: Option<Args> = None;
        absent.into_iter().for_each(Args::release);
    }
}
