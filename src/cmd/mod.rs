/*!
Command resolution and dispatch core.

  src/cmd/
    mod.rs          (this file)
    subcommand.rs   (SubcommandKind + descriptor table + resolve)
    target.rs       (explicit-vs-selected target policy)
    dispatch.rs     (invocation building + Dispatcher)
    format.rs       (stderr styling for failure reports)

Conventions:
  - Collaborators (lister, selector, runner) come in as trait objects so
    the whole flow runs against scripted doubles in tests.
  - Nothing here reads the environment; configuration is resolved by the
    binaries and handed in.
*/

pub mod dispatch;
pub mod format;
pub mod subcommand;
pub mod target;

#[cfg(test)]
pub(crate) mod testing;

pub use dispatch::{Dispatcher, build_invocation, dispatch};
pub use subcommand::{Descriptor, SubcommandKind, resolve};
pub use target::{ResolvedTarget, TargetSource, resolve_target};
