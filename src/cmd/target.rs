/*!
Target resolution policy, shared by every enhanced subcommand.

  explicit : first trailing argument is the target, taken as-is (even if it
             looks like a flag); no listing, no selector
  deferred : no trailing arguments -> list candidates -> select one

A deferred round that ends with nothing picked is fatal for every kind that
requires a target and fine for `debug-log`.
*/

use crate::cmd::subcommand::SubcommandKind;
use crate::error::{Error, Result};
use crate::lister::Lister;
use crate::selector::Selector;

/// Where the resolved target came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetSource {
    Explicit,
    Selected,
    /// Nothing picked, and the subcommand can run without a target.
    Absent,
}

/// Result of target resolution for one invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedTarget {
    pub target: Option<String>,
    pub source: TargetSource,
    /// Arguments left for the backend, never inspected.
    pub remaining: Vec<String>,
}

/// Resolve the target for `kind` from its trailing arguments.
///
/// Passthrough has no target slot: the trailing arguments come back as
/// `remaining` and no collaborator is called.
pub fn resolve_target(
    kind: SubcommandKind,
    mut trailing: Vec<String>,
    lister: &dyn Lister,
    selector: &dyn Selector,
) -> Result<ResolvedTarget> {
    let Some(desc) = kind.descriptor() else {
        return Ok(ResolvedTarget {
            target: None,
            source: TargetSource::Absent,
            remaining: trailing,
        });
    };

    if !trailing.is_empty() {
        let explicit = trailing.remove(0);
        tracing::debug!(%kind, target = %explicit, "explicit target");
        return Ok(ResolvedTarget {
            target: Some(explicit),
            source: TargetSource::Explicit,
            remaining: trailing,
        });
    }

    let candidates = lister.list(desc.list)?;
    let picked = selector.select(&candidates, desc.label)?.into_option();

    match picked {
        Some(target) => {
            tracing::debug!(%kind, %target, "selected target");
            Ok(ResolvedTarget {
                target: Some(target),
                source: TargetSource::Selected,
                remaining: trailing,
            })
        }
        None if desc.target_required => Err(Error::NoTargetSelected { kind }),
        None => {
            tracing::debug!(%kind, "no target, continuing untargeted");
            Ok(ResolvedTarget {
                target: None,
                source: TargetSource::Absent,
                remaining: trailing,
            })
        }
    }
}
