//! Command runner - synchronous external command execution
//!
//! Every external tool the setup drives (wrangler, bun, drizzle-kit) goes
//! through a [`CommandRunner`]. The runner normalizes exit status and spawn
//! errors into a closed [`CommandOutcome`] so callers pattern-match instead
//! of inspecting raw process output.
//!
//! # Example
//!
//! ```no_run
//! use worker_setup::runner::{CommandOutcome, CommandRunner, CommandSpec, SystemRunner};
//!
//! let runner = SystemRunner::new();
//! let whoami = CommandSpec::new("bunx").args(["wrangler", "whoami"]);
//! match runner.run(&whoami) {
//!     CommandOutcome::Ok(stdout) => println!("{stdout}"),
//!     CommandOutcome::Err(message) => eprintln!("{message}"),
//! }
//! ```

mod internal;

#[cfg(test)]
pub(crate) mod fake;

use std::fmt;
use std::path::{Path, PathBuf};

/// Locale forced on every child so output parsing is locale-independent.
pub const FORCED_LOCALE: &str = "en_US.UTF-8";

/// An external command line plus extra environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    pub program: String,
    pub args: Vec<String>,
    pub env: Vec<(String, String)>,
    /// Working directory; `None` inherits ours.
    pub cwd: Option<PathBuf>,
}

impl CommandSpec {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            env: Vec::new(),
            cwd: None,
        }
    }

    /// Build from an argv vector (program first). Returns `None` when empty.
    pub fn from_argv(argv: &[String]) -> Option<Self> {
        let (program, args) = argv.split_first()?;
        Some(Self::new(program.clone()).args(args.iter().cloned()))
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.push((key.into(), value.into()));
        self
    }

    pub fn current_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.cwd = Some(dir.as_ref().to_path_buf());
        self
    }

    /// Command line as shown to the user (env omitted).
    pub fn display_line(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl fmt::Display for CommandSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display_line())
    }
}

/// Result of running one command.
///
/// `Err` does not always mean the tool failed in a way the caller cares
/// about; some tools write informational text on stderr. Callers inspect
/// the message when that matters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandOutcome {
    /// Zero exit status; captured stdout.
    Ok(String),
    /// Non-zero exit or spawn failure; captured output or error text.
    Err(String),
}

impl CommandOutcome {
    pub fn is_ok(&self) -> bool {
        matches!(self, CommandOutcome::Ok(_))
    }

    /// The captured text regardless of variant.
    pub fn text(&self) -> &str {
        match self {
            CommandOutcome::Ok(text) | CommandOutcome::Err(text) => text,
        }
    }

    /// Stdout on success, `None` on failure.
    pub fn stdout(&self) -> Option<&str> {
        match self {
            CommandOutcome::Ok(text) => Some(text),
            CommandOutcome::Err(_) => None,
        }
    }
}

/// Executes external commands synchronously.
pub trait CommandRunner {
    fn run(&self, command: &CommandSpec) -> CommandOutcome;
}

impl<R: CommandRunner + ?Sized> CommandRunner for &R {
    fn run(&self, command: &CommandSpec) -> CommandOutcome {
        (**self).run(command)
    }
}

/// Runs commands as child processes of this one.
#[derive(Debug, Clone)]
pub struct SystemRunner {
    echo: bool,
}

impl SystemRunner {
    /// Runner that echoes each command line before running it.
    pub fn new() -> Self {
        Self { echo: true }
    }

    /// Runner that runs silently (used by read-only subcommands).
    pub fn quiet() -> Self {
        Self { echo: false }
    }
}

impl Default for SystemRunner {
    fn default() -> Self {
        Self::new()
    }
}

impl CommandRunner for SystemRunner {
    fn run(&self, command: &CommandSpec) -> CommandOutcome {
        internal::run_process(command, self.echo)
    }
}
