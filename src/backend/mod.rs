//! Backend CLI boundary (the `juju` executable, or whatever is configured).
//!
//! Backend::from_command_line -> program + leading args (shell-split)
//! capture  : listing calls, stdout captured, stderr inherited
//! run      : action calls, all streams inherited, exit code returned
//!
use std::process::Stdio;

use shell_words::split as shell_split;
use tokio::process::Command;

use crate::error::{Error, Result};
use crate::lister::{ListKind, Lister, parse_listing};
use crate::utils::{InterruptGuard, block_on, exit_code};

/// Executes a fully built backend argument vector and reports its exit code.
pub trait Runner {
    fn run(&self, args: &[String]) -> Result<i32>;
}

/// A backend command line: program plus any fixed leading arguments.
#[derive(Debug, Clone)]
pub struct Backend {
    program: String,
    args: Vec<String>,
}

impl Backend {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Backend {
            program: program.into(),
            args,
        }
    }

    /// Parse a configured command line such as `juju` or `snap run juju`.
    pub fn from_command_line(raw: &str) -> Result<Self> {
        let mut parts = shell_split(raw.trim())
            .map_err(|e| Error::Config(format!("cannot parse backend command `{raw}`: {e}")))?;
        if parts.is_empty() {
            return Err(Error::Config("backend command is empty".into()));
        }
        let program = parts.remove(0);
        Ok(Backend::new(program, parts))
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    /// Render the full command line for logs and messages.
    pub fn command_line<S: AsRef<str>>(&self, extra: &[S]) -> String {
        let words = std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .chain(extra.iter().map(AsRef::<str>::as_ref));
        shell_words::join(words)
    }

    fn command<S: AsRef<str>>(&self, extra: &[S]) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args);
        cmd.args(extra.iter().map(AsRef::<str>::as_ref));
        cmd
    }

    fn unavailable<S: AsRef<str>>(&self, extra: &[S], reason: impl ToString) -> Error {
        Error::BackendUnavailable {
            command: self.command_line(extra),
            reason: reason.to_string(),
        }
    }

    /// Run a read-only listing call and return its stdout.
    pub fn capture(&self, extra: &[&str]) -> Result<Vec<u8>> {
        let mut cmd = self.command(extra);
        cmd.stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit());
        tracing::debug!(command = %self.command_line(extra), "listing");

        // spawn inside the runtime; `output()` would also re-pipe stderr
        let output = block_on(async move { cmd.spawn()?.wait_with_output().await })
            .and_then(|r| r)
            .map_err(|e| self.unavailable(extra, e))?;
        if !output.status.success() {
            return Err(self.unavailable(extra, output.status));
        }
        Ok(output.stdout)
    }
}

impl Lister for Backend {
    fn list(&self, kind: ListKind) -> Result<Vec<String>> {
        let raw = self.capture(&kind.listing_args())?;
        let names = parse_listing(kind, &raw)?;
        tracing::debug!(%kind, count = names.len(), "candidates");
        Ok(names)
    }
}

impl Runner for Backend {
    /// Start the action with inherited stdio and wait for it.
    fn run(&self, args: &[String]) -> Result<i32> {
        let mut cmd = self.command(args);
        cmd.stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit());
        tracing::debug!(command = %self.command_line(args), "dispatch");

        let status = block_on(async move {
            let _guard = InterruptGuard::install();
            cmd.status().await
        })
        .and_then(|r| r)
        .map_err(|e| self.unavailable(args, e))?;

        Ok(exit_code(status))
    }
}
