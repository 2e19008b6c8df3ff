use std::env;
use std::ffi::{CStr, OsStr};
use std::io;
use std::os::unix::ffi::OsStrExt;
use std::path::{Path, PathBuf};

use rustyline::history::FileHistory;

/// Ambient process state the builtins and the prompt resolver work against.
///
/// Production code uses [`SystemContext`]; tests substitute an in-memory
/// implementation so nothing depends on the real environment or terminal.
pub trait Context {
    fn var(&self, name: &str) -> Option<String>;

    /// Home directory from the user database entry of the effective uid.
    fn user_home(&self) -> Option<PathBuf>;

    fn current_dir(&self) -> io::Result<PathBuf>;

    fn set_current_dir(&mut self, path: &Path) -> io::Result<()>;

    /// Past input lines, oldest first. `None` when no history is attached.
    fn history(&self) -> Option<Vec<String>>;

    fn exit(&mut self, code: i32) -> !;

    /// `$HOME`, or the user database entry when it is unset or empty.
    fn home_dir(&self) -> Option<PathBuf> {
        self.var("HOME")
            .filter(|home| !home.is_empty())
            .map(PathBuf::from)
            .or_else(|| self.user_home())
    }
}

pub struct SystemContext<'a> {
    history: Option<&'a FileHistory>,
}

impl<'a> SystemContext<'a> {
    pub fn new(history: Option<&'a FileHistory>) -> Self {
        Self { history }
    }
}

impl Default for SystemContext<'_> {
    fn default() -> Self {
        Self::new(None)
    }
}

impl Context for SystemContext<'_> {
    fn var(&self, name: &str) -> Option<String> {
        env::var(name).ok()
    }

    fn user_home(&self) -> Option<PathBuf> {
        // SAFETY: getpwuid returns either null or a pointer to static storage
        // that stays valid until the next getpw* call; the directory is copied
        // out before returning.
        unsafe {
            let entry = libc::getpwuid(libc::geteuid());
            if entry.is_null() || (*entry).pw_dir.is_null() {
                return None;
            }
            let dir = CStr::from_ptr((*entry).pw_dir);
            Some(PathBuf::from(OsStr::from_bytes(dir.to_bytes())))
        }
    }

    fn current_dir(&self) -> io::Result<PathBuf> {
        env::current_dir()
    }

    fn set_current_dir(&mut self, path: &Path) -> io::Result<()> {
        env::set_current_dir(path)
    }

    fn history(&self) -> Option<Vec<String>> {
        self.history
            .map(|history| history.iter().cloned().collect())
    }

    fn exit(&mut self, code: i32) -> ! {
        log::debug!("exiting with status {}", code);
        std::process::exit(code)
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use std::collections::HashMap;

    /// In-memory context. `exit` panics with `"exit(<code>)"` so the
    /// non-returning path can be observed with `catch_unwind`.
    #[derive(Debug, Default, Clone)]
    pub struct FakeContext {
        pub vars: HashMap<String, String>,
        pub user_home: Option<PathBuf>,
        pub cwd: PathBuf,
        pub dirs: Vec<PathBuf>,
        pub history: Option<Vec<String>>,
    }

    impl FakeContext {
        pub fn new() -> Self {
            Self {
                cwd: PathBuf::from("/"),
                dirs: vec![PathBuf::from("/")],
                ..Default::default()
            }
        }

        pub fn with_var(mut self, name: &str, value: &str) -> Self {
            self.vars.insert(name.to_string(), value.to_string());
            self
        }

        pub fn with_dir(mut self, dir: &str) -> Self {
            self.dirs.push(PathBuf::from(dir));
            self
        }

        pub fn with_history(mut self, lines: &[&str]) -> Self {
            self.history = Some(lines.iter().map(|s| s.to_string()).collect());
            self
        }
    }

    impl Context for FakeContext {
        fn var(&self, name: &str) -> Option<String> {
            self.vars.get(name).cloned()
        }

        fn user_home(&self) -> Option<PathBuf> {
            self.user_home.clone()
        }

        fn current_dir(&self) -> io::Result<PathBuf> {
            Ok(self.cwd.clone())
        }

        fn set_current_dir(&mut self, path: &Path) -> io::Result<()> {
            let target = self.cwd.join(path);
            if self.dirs.contains(&target) {
                self.cwd = target;
                Ok(())
            } else {
                Err(io::Error::from_raw_os_error(libc::ENOENT))
            }
        }

        fn history(&self) -> Option<Vec<String>> {
            self.history.clone()
        }

        fn exit(&mut self, code: i32) -> ! {
            panic!("exit({})", code)
        }
    }
}
