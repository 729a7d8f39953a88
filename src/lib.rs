//! jfz: fuzzy target selection in front of the `juju` CLI.
//!
//! `jfz ssh` lists units, lets the user pick one in `fzf`, then runs
//! `juju ssh <unit>`. An explicit target skips the selection, and any
//! subcommand jfz does not enhance is forwarded unchanged.
//!
//! Layout:
//!   cmd/      resolution + dispatch core
//!   lister    structured listings -> candidates
//!   selector  external single-select UI
//!   backend   backend process boundary
//!   config    JFZ_* environment / config file
//!   shell     completion integration scripts
//!   utils     logging, runtime bridge, exit codes

pub mod backend;
pub mod cmd;
pub mod config;
pub mod error;
pub mod lister;
pub mod selector;
pub mod shell;
pub mod utils;

pub use error::{Error, Result};
