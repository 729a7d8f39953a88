//! Error taxonomy for target resolution and dispatch.
//!
//! Anything that goes wrong *before* the backend action is started ends up
//! here. Once the backend action runs, its exit code is the result and no
//! error crosses back.

use crate::cmd::subcommand::SubcommandKind;
use crate::lister::ListKind;

pub type Result<T> = std::result::Result<T, Error>;

/// Exit code used when the user picked nothing for a subcommand that needs a target.
pub const EXIT_NO_TARGET: i32 = 3;

/// Exit code used for lister / selector / configuration failures.
pub const EXIT_RESOLUTION_FAILED: i32 = 4;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The backend could not be started, or a listing call exited non-zero.
    #[error("backend command `{command}` failed: {reason}")]
    BackendUnavailable { command: String, reason: String },

    /// A listing call succeeded but its structured output had the wrong shape.
    #[error("could not read {kind} listing: {reason}")]
    MalformedOutput { kind: ListKind, reason: String },

    /// The selector could not be started or exited with an unexpected status.
    #[error("selector `{command}` failed: {reason}")]
    SelectorUnavailable { command: String, reason: String },

    /// Nothing was selected and the subcommand cannot run without a target.
    #[error("no {} selected, `{kind}` not run", .kind.target_noun())]
    NoTargetSelected { kind: SubcommandKind },

    #[error("configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Process exit code reported for this failure.
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::NoTargetSelected { .. } => EXIT_NO_TARGET,
            _ => EXIT_RESOLUTION_FAILED,
        }
    }

    /// True when this is a normal user outcome (cancel / empty list) rather than a fault.
    pub fn is_user_cancel(&self) -> bool {
        matches!(self, Error::NoTargetSelected { .. })
    }
}
