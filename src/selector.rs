//! Interactive single-select over a candidate list, delegated to an external
//! line selector (`fzf` by default).
//!
//! The selector always receives the full list, even when empty; the
//! `--select-1` / `--exit-0` options make it auto-accept a single candidate
//! and return at once on an empty one.

use std::process::{Output, Stdio};

use shell_words::split as shell_split;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

use crate::error::{Error, Result};
use crate::utils::{InterruptGuard, block_on};

/// Outcome of one selection round.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    Selected(String),
    NoneSelected,
}

impl Selection {
    pub fn into_option(self) -> Option<String> {
        match self {
            Selection::Selected(s) => Some(s),
            Selection::NoneSelected => None,
        }
    }
}

pub trait Selector {
    fn select(&self, candidates: &[String], prompt_label: &str) -> Result<Selection>;
}

/// Display options shared by every enhanced subcommand.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectorOptions {
    pub height: String,
    pub pointer: String,
}

impl Default for SelectorOptions {
    fn default() -> Self {
        SelectorOptions {
            height: "40%".into(),
            pointer: "▶".into(),
        }
    }
}

/// fzf-compatible selector run as a subprocess.
#[derive(Debug, Clone)]
pub struct FzfSelector {
    program: String,
    args: Vec<String>,
    options: SelectorOptions,
}

impl FzfSelector {
    pub fn new(program: impl Into<String>, args: Vec<String>, options: SelectorOptions) -> Self {
        FzfSelector {
            program: program.into(),
            args,
            options,
        }
    }

    /// Parse a configured command line such as `fzf` or `fzf --ansi`.
    pub fn from_command_line(raw: &str, options: SelectorOptions) -> Result<Self> {
        let mut parts = shell_split(raw.trim())
            .map_err(|e| Error::Config(format!("cannot parse selector command `{raw}`: {e}")))?;
        if parts.is_empty() {
            return Err(Error::Config("selector command is empty".into()));
        }
        let program = parts.remove(0);
        Ok(FzfSelector::new(program, parts, options))
    }

    /// Arguments after the program: configured extras, then the fixed behaviour flags.
    pub fn argv(&self, prompt_label: &str) -> Vec<String> {
        let mut argv = self.args.clone();
        argv.extend([
            "--no-multi".to_string(),
            "--select-1".to_string(),
            "--exit-0".to_string(),
            format!("--height={}", self.options.height),
            "--cycle".to_string(),
            format!("--pointer={}", self.options.pointer),
            format!("--prompt={prompt_label}> "),
        ]);
        argv
    }

    fn command_line(&self, prompt_label: &str) -> String {
        shell_words::join(std::iter::once(self.program.clone()).chain(self.argv(prompt_label)))
    }

    fn unavailable(&self, prompt_label: &str, reason: impl ToString) -> Error {
        Error::SelectorUnavailable {
            command: self.command_line(prompt_label),
            reason: reason.to_string(),
        }
    }
}

/// Map the selector's exit code and stdout onto a selection.
///
/// 0 with a line is a pick; 0 without one, 1 (no match / empty input) and
/// 130 (interrupted) mean nothing was picked. `None` is signal death.
pub fn interpret(code: Option<i32>, stdout: &[u8]) -> std::result::Result<Selection, String> {
    match code {
        Some(0) => {
            let text = String::from_utf8_lossy(stdout);
            match text.lines().next() {
                Some(line) if !line.is_empty() => Ok(Selection::Selected(line.to_string())),
                _ => Ok(Selection::NoneSelected),
            }
        }
        Some(1) | Some(130) | None => Ok(Selection::NoneSelected),
        Some(other) => Err(format!("exit status {other}")),
    }
}

/// Spawn the selector, stream the candidates into it and collect its output.
async fn feed_and_wait(mut cmd: Command, input: String) -> std::io::Result<Output> {
    let _guard = InterruptGuard::install();
    let mut child = cmd.spawn()?;
    let stdin = child.stdin.take();
    let feed = async move {
        if let Some(mut stdin) = stdin {
            match stdin.write_all(input.as_bytes()).await {
                Err(e) if e.kind() != std::io::ErrorKind::BrokenPipe => return Err(e),
                _ => {}
            }
            // closing stdin tells the selector the list is complete
            drop(stdin);
        }
        Ok::<(), std::io::Error>(())
    };
    let (fed, output) = tokio::join!(feed, child.wait_with_output());
    fed?;
    output
}

impl Selector for FzfSelector {
    fn select(&self, candidates: &[String], prompt_label: &str) -> Result<Selection> {
        let mut cmd = Command::new(&self.program);
        cmd.args(self.argv(prompt_label))
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit());

        let mut input = String::new();
        for c in candidates {
            input.push_str(c);
            input.push('\n');
        }

        let output = block_on(feed_and_wait(cmd, input))
            .and_then(|r| r)
            .map_err(|e| self.unavailable(prompt_label, e))?;

        let selection = interpret(output.status.code(), &output.stdout)
            .map_err(|reason| self.unavailable(prompt_label, reason))?;
        tracing::debug!(
            label = prompt_label,
            candidates = candidates.len(),
            ?selection,
            "selector returned"
        );
        Ok(selection)
    }
}
