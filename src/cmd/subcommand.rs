/*!
Subcommand classification and the fixed descriptor table.

Variants:
  controllers / models   (switch)
  ssh                    (ssh into a unit)
  debug-log              (log stream, optionally narrowed to a unit)
  destroy-model          (forced, non-interactive destroy)
  passthrough            (everything else, forwarded verbatim)

Helpers:
  - resolve()        first-argument classification
  - from_token()     exact token match
  - descriptor()     listing source / prompt / backend template
*/

use std::fmt;

use crate::lister::ListKind;

/// The enhanced subcommands plus the passthrough catch-all.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum SubcommandKind {
    Controllers,
    Models,
    Ssh,
    DebugLog,
    DestroyModel,
    /// Not enhanced: the whole invocation goes to the backend untouched.
    Passthrough,
}

/// Static description of how one enhanced subcommand lists, prompts and dispatches.
#[derive(Debug)]
pub struct Descriptor {
    /// Token the user types as the first argument.
    pub token: &'static str,
    /// Candidate source used when no explicit target is given.
    pub list: ListKind,
    /// Prompt label shown by the selector.
    pub label: &'static str,
    /// Backend subcommand that performs the action.
    pub action: &'static str,
    /// Whether dispatch is refused without a target.
    pub target_required: bool,
    /// Flag placed in front of the target (`debug-log -i <unit>`).
    pub target_flag: Option<&'static str>,
    /// Flags appended right after the target.
    pub fixed_flags: &'static [&'static str],
    /// Whether the remaining arguments are forwarded to the action.
    pub forwards_trailing: bool,
}

static CONTROLLERS: Descriptor = Descriptor {
    token: "controllers",
    list: ListKind::Controllers,
    label: "Controller",
    action: "switch",
    target_required: true,
    target_flag: None,
    fixed_flags: &[],
    forwards_trailing: false,
};

static MODELS: Descriptor = Descriptor {
    token: "models",
    list: ListKind::Models,
    label: "Model",
    action: "switch",
    target_required: true,
    target_flag: None,
    fixed_flags: &[],
    forwards_trailing: false,
};

static SSH: Descriptor = Descriptor {
    token: "ssh",
    list: ListKind::Units,
    label: "Unit",
    action: "ssh",
    target_required: true,
    target_flag: None,
    fixed_flags: &[],
    forwards_trailing: true,
};

static DEBUG_LOG: Descriptor = Descriptor {
    token: "debug-log",
    list: ListKind::Units,
    label: "Unit",
    action: "debug-log",
    target_required: false,
    target_flag: Some("-i"),
    fixed_flags: &[],
    forwards_trailing: true,
};

static DESTROY_MODEL: Descriptor = Descriptor {
    token: "destroy-model",
    list: ListKind::Models,
    label: "Model",
    action: "destroy-model",
    target_required: true,
    target_flag: None,
    fixed_flags: &["--no-wait", "--force", "--destroy-storage", "--no-prompt"],
    forwards_trailing: true,
};

impl SubcommandKind {
    /// Enhanced variants in help/completion order.
    pub const fn enhanced() -> &'static [SubcommandKind] {
        &[
            SubcommandKind::Controllers,
            SubcommandKind::Models,
            SubcommandKind::Ssh,
            SubcommandKind::DebugLog,
            SubcommandKind::DestroyModel,
        ]
    }

    /// Exact, case-sensitive match against the enhanced set.
    pub fn from_token(token: &str) -> Option<Self> {
        Self::enhanced()
            .iter()
            .copied()
            .find(|k| k.descriptor().is_some_and(|d| d.token == token))
    }

    pub fn descriptor(&self) -> Option<&'static Descriptor> {
        match self {
            SubcommandKind::Controllers => Some(&CONTROLLERS),
            SubcommandKind::Models => Some(&MODELS),
            SubcommandKind::Ssh => Some(&SSH),
            SubcommandKind::DebugLog => Some(&DEBUG_LOG),
            SubcommandKind::DestroyModel => Some(&DESTROY_MODEL),
            SubcommandKind::Passthrough => None,
        }
    }

    /// Lower-case name of what gets selected ("controller", "unit", ...).
    pub fn target_noun(&self) -> String {
        self.descriptor()
            .map(|d| d.label.to_ascii_lowercase())
            .unwrap_or_else(|| "target".to_string())
    }
}

impl fmt::Display for SubcommandKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.descriptor() {
            Some(d) => f.write_str(d.token),
            None => f.write_str("passthrough"),
        }
    }
}

/// Classify an invocation by its first argument.
///
/// Returns the kind and the trailing arguments. For `Passthrough` the
/// trailing list is empty: the caller keeps the original invocation and
/// forwards all of it.
pub fn resolve(invocation: &[String]) -> (SubcommandKind, Vec<String>) {
    let Some((first, rest)) = invocation.split_first() else {
        return (SubcommandKind::Passthrough, Vec::new());
    };
    match SubcommandKind::from_token(first) {
        Some(kind) => (kind, rest.to_vec()),
        None => (SubcommandKind::Passthrough, Vec::new()),
    }
}

/* --------------------------------- Tests ---------------------------------- */
