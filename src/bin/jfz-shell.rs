use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};

use jfz::cmd::SubcommandKind;
use jfz::config::Config;
use jfz::lister::{ListKind, Lister};
use jfz::shell::{ShellKind, integration_script};
use jfz::utils;

/// jfz-shell - shell integration helpers for jfz
///
///   jfz-shell init <bash|zsh> [--alias NAME] [--output PATH]
///   jfz-shell complete <controllers|models|units>
///   jfz-shell subcommands
///
/// Examples:
///   eval "$(jfz-shell init bash)"
///   jfz-shell init zsh --alias juju --output ~/.config/jfz/init.zsh
#[derive(Parser, Debug)]
#[command(
    name = "jfz-shell",
    version,
    author,
    about = "Shell integration helpers for jfz",
    propagate_version = true,
    disable_help_subcommand = true
)]
pub struct Cli {
    /// Increase verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Silence all non-error output
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print (or write) the shell integration script
    Init(InitArgs),

    /// Print completion candidates, one per line
    Complete(CompleteArgs),

    /// Print the enhanced subcommand names, one per line
    Subcommands,
}

#[derive(Args, Debug)]
pub struct InitArgs {
    /// Target shell
    pub shell: ShellKind,

    /// Also define a wrapper function with this name (e.g. `juju`)
    #[arg(long, value_name = "NAME")]
    pub alias: Option<String>,

    /// Write the script to PATH instead of stdout
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct CompleteArgs {
    /// Candidate kind to list
    pub kind: ListKind,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = utils::derive_level(cli.verbose, cli.quiet);
    utils::init_logging(level);

    match cli.command {
        Commands::Init(args) => execute_init(args),
        Commands::Complete(args) => execute_complete(args),
        Commands::Subcommands => execute_subcommands(),
    }
}

fn execute_init(args: InitArgs) -> Result<()> {
    let script = integration_script(args.shell, args.alias.as_deref());
    match args.output {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("failed to create {}", parent.display()))?;
            }
            std::fs::write(&path, script)
                .with_context(|| format!("failed to write {}", path.display()))?;
            tracing::info!(path = %path.display(), shell = %args.shell, "integration script written");
        }
        None => print!("{script}"),
    }
    Ok(())
}

/// Completion must never break the prompt: listing failures print nothing.
fn execute_complete(args: CompleteArgs) -> Result<()> {
    let names = match Config::load().and_then(|c| c.backend()) {
        Ok(backend) => backend.list(args.kind).unwrap_or_else(|e| {
            tracing::debug!("completion listing failed: {e}");
            Vec::new()
        }),
        Err(e) => {
            tracing::debug!("completion disabled: {e}");
            Vec::new()
        }
    };
    write_lines(&names)
}

fn execute_subcommands() -> Result<()> {
    let names: Vec<String> = SubcommandKind::enhanced()
        .iter()
        .map(|k| k.to_string())
        .collect();
    write_lines(&names)
}

fn write_lines(lines: &[String]) -> Result<()> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    for l in lines {
        writeln!(out, "{l}")?;
    }
    out.flush()?;
    Ok(())
}
