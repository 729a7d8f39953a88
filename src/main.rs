use std::ffi::OsString;

use anyhow::{Context, Result, anyhow};

use jfz::cmd::Dispatcher;
use jfz::cmd::format::{StyleOptions, failure_line};
use jfz::config::Config;
use jfz::error::{EXIT_RESOLUTION_FAILED, Error};
use jfz::utils::logging;

/// jfz - fuzzy selection front-end for the juju CLI
///
/// Enhanced subcommands (target optional; selected with fzf when omitted):
///   jfz controllers [CONTROLLER]            -> juju switch <controller>
///   jfz models [MODEL]                      -> juju switch <model>
///     (extra arguments after the target are dropped with a warning)
///   jfz ssh [UNIT] [ARGS...]                -> juju ssh <unit> [ARGS...]
///   jfz debug-log [UNIT] [ARGS...]          -> juju debug-log [-i <unit>] [ARGS...]
///   jfz destroy-model [MODEL] [ARGS...]     -> juju destroy-model <model> --no-wait --force
///                                              --destroy-storage --no-prompt [ARGS...]
///
/// Anything else is forwarded verbatim: `jfz status` runs `juju status`.
/// Arguments must be valid UTF-8; anything else is rejected with exit 4
/// before juju is started, passthrough included.
///
/// Environment:
///   JFZ_BACKEND / JFZ_SELECTOR   command lines for juju / fzf
///   JFZ_HEIGHT / JFZ_POINTER     selector display
///   JFZ_CONFIG                   YAML or JSON config file
///   JFZ_VERBOSE / JFZ_QUIET      log level (RUST_LOG overrides)
///
/// Exit codes: backend's own once dispatched; 3 nothing selected; 4 listing,
/// selector or configuration failure.
fn main() {
    logging::init_logging(logging::level_from_env());
    let style = StyleOptions::detect();

    let code = match invocation().and_then(|args| run(&args)) {
        Ok(code) => code,
        Err(err) => {
            let (code, cancelled, hint) = match err.downcast_ref::<Error>() {
                Some(e) => (e.exit_code(), e.is_user_cancel(), selection_hint(e)),
                None => (EXIT_RESOLUTION_FAILED, false, None),
            };
            eprintln!(
                "{}",
                failure_line(&format!("{err:#}"), hint.as_deref(), cancelled, &style)
            );
            code
        }
    };
    std::process::exit(code);
}

fn selection_hint(err: &Error) -> Option<String> {
    match err {
        Error::NoTargetSelected { kind } => {
            Some(format!("pass a {} to skip selection", kind.target_noun()))
        }
        _ => None,
    }
}

/// Raw arguments after the program name.
fn invocation() -> Result<Vec<String>> {
    utf8_arguments(std::env::args_os().skip(1))
}

/// Tokens must be valid UTF-8.
fn utf8_arguments(args: impl IntoIterator<Item = OsString>) -> Result<Vec<String>> {
    args.into_iter()
        .map(|a| {
            a.into_string()
                .map_err(|raw| anyhow!("argument is not valid UTF-8: {raw:?}"))
        })
        .collect()
}

fn run(args: &[String]) -> Result<i32> {
    let config = Config::load().context("loading jfz configuration")?;
    let backend = config.backend()?;
    let selector = config.selector()?;
    tracing::debug!(backend = %config.backend, selector = %config.selector, "configured");

    let code = Dispatcher::new(&backend, &selector, &backend).run(args)?;
    tracing::debug!(code, "backend exited");
    Ok(code)
}
