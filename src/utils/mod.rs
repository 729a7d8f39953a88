//! Utilities: logging setup (tracing, level derived from verbosity), a small
//! blocking bridge into tokio for subprocess work, exit-status mapping and
//! the interrupt guard used while a child owns the terminal.
//!
//! Key items:
//!   init_logging / derive_level
//!   block_on
//!   exit_code
//!   InterruptGuard

use std::future::Future;
use std::process::ExitStatus;

/// Logging helpers.
pub mod logging {
    use tracing_subscriber::EnvFilter;

    #[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd)]
    pub enum LogLevel {
        Error = 0,
        Warn = 1,
        Debug = 2,
        Trace = 3,
    }

    impl LogLevel {
        pub fn as_str(&self) -> &'static str {
            match self {
                LogLevel::Error => "error",
                LogLevel::Warn => "warn",
                LogLevel::Debug => "debug",
                LogLevel::Trace => "trace",
            }
        }
    }

    pub fn derive_level(verbose: u8, quiet: bool) -> LogLevel {
        if quiet {
            return LogLevel::Error;
        }
        match verbose {
            0 => LogLevel::Warn,
            1 => LogLevel::Debug,
            _ => LogLevel::Trace,
        }
    }

    /// Verbosity for the `jfz` binary, which takes no flags of its own.
    ///
    /// `JFZ_VERBOSE` is a count (0, 1, 2); any non-empty `JFZ_QUIET` wins.
    pub fn level_from_env() -> LogLevel {
        let verbose = std::env::var("JFZ_VERBOSE")
            .ok()
            .and_then(|v| v.trim().parse::<u8>().ok())
            .unwrap_or(0);
        let quiet = std::env::var("JFZ_QUIET")
            .map(|v| !v.trim().is_empty())
            .unwrap_or(false);
        derive_level(verbose, quiet)
    }

    /// Install the global subscriber. `RUST_LOG` overrides the derived level.
    /// Output goes to stderr; stdout belongs to the backend and selector.
    pub fn init_logging(level: LogLevel) {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(format!("jfz={}", level.as_str())));
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .without_time()
            .try_init();
    }
}

pub use logging::{derive_level, init_logging};

/// Drive a future to completion on a fresh current-thread runtime.
///
/// Every subprocess call is a short blocking episode; nothing outlives it.
pub fn block_on<F: Future>(fut: F) -> std::io::Result<F::Output> {
    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    Ok(rt.block_on(fut))
}

/// Shell-style exit code for a finished child: its code, or 128 + signal.
pub fn exit_code(status: ExitStatus) -> i32 {
    if let Some(code) = status.code() {
        return code;
    }
    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(sig) = status.signal() {
            return 128 + sig;
        }
    }
    1
}

/// Keeps SIGINT from terminating `jfz` while a child owns the terminal.
///
/// The child (selector, ssh, log stream) receives the interrupt itself and
/// its exit status is what gets reported. Must be created inside a runtime.
/// tokio never unregisters the OS handler, so the effect lasts for the rest
/// of the process once installed.
pub struct InterruptGuard {
    #[cfg(unix)]
    _signal: Option<tokio::signal::unix::Signal>,
}

impl InterruptGuard {
    pub fn install() -> Self {
        #[cfg(unix)]
        {
            use tokio::signal::unix::{SignalKind, signal};
            let sig = match signal(SignalKind::interrupt()) {
                Ok(s) => Some(s),
                Err(e) => {
                    tracing::debug!("could not install SIGINT guard: {e}");
                    None
                }
            };
            InterruptGuard { _signal: sig }
        }
        #[cfg(not(unix))]
        {
            InterruptGuard {}
        }
    }
}
