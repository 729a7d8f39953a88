/*!
`dispatch.rs`

Builds and runs the backend invocation for a resolved subcommand.

Invocation shapes:
  controllers / models : switch <target>
  ssh                  : ssh <target> <remaining...>
  debug-log            : debug-log [-i <target>] <remaining...>
  destroy-model        : destroy-model <target> --no-wait --force --destroy-storage --no-prompt <remaining...>
  passthrough          : <original invocation>

Flow:
  resolve subcommand -> passthrough: dispatch
                     -> enhanced: resolve target -> dispatch | NoTargetSelected

Remaining arguments are appended in order, as separate tokens, and never
looked at. Once the backend action starts, its exit code is the result.
*/

use crate::backend::Runner;
use crate::cmd::subcommand::{self, SubcommandKind};
use crate::cmd::target::resolve_target;
use crate::error::{Error, Result};
use crate::lister::Lister;
use crate::selector::Selector;

/// Build the backend argument vector for `kind`.
///
/// For `Passthrough`, `remaining` is the whole original invocation.
pub fn build_invocation(
    kind: SubcommandKind,
    target: Option<&str>,
    remaining: &[String],
) -> Result<Vec<String>> {
    let Some(desc) = kind.descriptor() else {
        return Ok(remaining.to_vec());
    };

    let mut args = vec![desc.action.to_string()];
    match target {
        Some(t) => {
            if let Some(flag) = desc.target_flag {
                args.push(flag.to_string());
            }
            args.push(t.to_string());
            args.extend(desc.fixed_flags.iter().map(|f| f.to_string()));
        }
        None if desc.target_required => return Err(Error::NoTargetSelected { kind }),
        None => {}
    }

    if desc.forwards_trailing {
        args.extend(remaining.iter().cloned());
    } else if !remaining.is_empty() {
        tracing::warn!(%kind, ignored = ?remaining, "extra arguments are not forwarded to `{}`", desc.action);
    }
    Ok(args)
}

/// Build and execute the backend invocation, returning its exit code.
pub fn dispatch(
    kind: SubcommandKind,
    target: Option<&str>,
    remaining: &[String],
    runner: &dyn Runner,
) -> Result<i32> {
    let args = build_invocation(kind, target, remaining)?;
    runner.run(&args)
}

/// The collaborators one invocation runs against.
pub struct Dispatcher<'a> {
    lister: &'a dyn Lister,
    selector: &'a dyn Selector,
    runner: &'a dyn Runner,
}

impl<'a> Dispatcher<'a> {
    pub fn new(lister: &'a dyn Lister, selector: &'a dyn Selector, runner: &'a dyn Runner) -> Self {
        Dispatcher {
            lister,
            selector,
            runner,
        }
    }

    /// Run one invocation end to end.
    ///
    /// `Ok(code)` is the backend's exit code; `Err` means the backend action
    /// was never started.
    pub fn run(&self, invocation: &[String]) -> Result<i32> {
        let (kind, trailing) = subcommand::resolve(invocation);
        tracing::debug!(%kind, args = trailing.len(), "resolved subcommand");

        if kind == SubcommandKind::Passthrough {
            return dispatch(kind, None, invocation, self.runner);
        }

        let resolved = resolve_target(kind, trailing, self.lister, self.selector)?;
        dispatch(
            kind,
            resolved.target.as_deref(),
            &resolved.remaining,
            self.runner,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cmd::testing::{RecordingRunner, ScriptedLister, ScriptedSelector, argv};
    use crate::selector::Selection;

    struct Harness {
        lister: ScriptedLister,
        selector: ScriptedSelector,
        runner: RecordingRunner,
    }

    impl Harness {
        fn new(lister: ScriptedLister, selector: ScriptedSelector) -> Self {
            Harness {
                lister,
                selector,
                runner: RecordingRunner::exiting(0),
            }
        }

        fn run(&self, invocation: &[&str]) -> Result<i32> {
            Dispatcher::new(&self.lister, &self.selector, &self.runner).run(&argv(invocation))
        }

        fn no_resolution_calls(&self) -> bool {
            self.lister.calls().is_empty() && self.selector.calls().is_empty()
        }
    }

    #[test]
    fn controllers_selected_switches() {
        let h = Harness::new(
            ScriptedLister::ok(&["ctrl-a", "ctrl-b"]),
            ScriptedSelector::returning(Selection::Selected("ctrl-b".into())),
        );
        assert_eq!(h.run(&["controllers"]).unwrap(), 0);
        assert_eq!(h.runner.calls(), vec![argv(&["switch", "ctrl-b"])]);
    }

    #[test]
    fn explicit_ssh_target_forwards_flags() {
        let h = Harness::new(ScriptedLister::ok(&["x/0"]), ScriptedSelector::first());
        h.run(&["ssh", "app/1", "--proxy"]).unwrap();
        assert_eq!(h.runner.calls(), vec![argv(&["ssh", "app/1", "--proxy"])]);
        assert!(h.no_resolution_calls());

        let h = Harness::new(ScriptedLister::ok(&["x/0"]), ScriptedSelector::first());
        h.run(&["ssh", "app/0", "--proxy", "--no-host-key-checks"])
            .unwrap();
        assert_eq!(
            h.runner.calls(),
            vec![argv(&["ssh", "app/0", "--proxy", "--no-host-key-checks"])]
        );
    }

    #[test]
    fn debug_log_without_units_runs_untargeted() {
        let h = Harness::new(ScriptedLister::ok(&[]), ScriptedSelector::auto_only());
        assert_eq!(h.run(&["debug-log"]).unwrap(), 0);
        assert_eq!(h.runner.calls(), vec![argv(&["debug-log"])]);
    }

    #[test]
    fn debug_log_cancelled_keeps_no_flag() {
        let h = Harness::new(
            ScriptedLister::ok(&["a/0", "b/0"]),
            ScriptedSelector::returning(Selection::NoneSelected),
        );
        h.run(&["debug-log"]).unwrap();
        assert_eq!(h.runner.calls(), vec![argv(&["debug-log"])]);
    }

    #[test]
    fn debug_log_selected_uses_include_flag() {
        let h = Harness::new(ScriptedLister::ok(&["mysql/0"]), ScriptedSelector::auto_only());
        h.run(&["debug-log"]).unwrap();
        assert_eq!(h.runner.calls(), vec![argv(&["debug-log", "-i", "mysql/0"])]);
    }

    #[test]
    fn debug_log_explicit_target_with_replay() {
        let h = Harness::new(ScriptedLister::ok(&[]), ScriptedSelector::first());
        h.run(&["debug-log", "mysql/0", "--replay", "--level", "ERROR"])
            .unwrap();
        assert_eq!(
            h.runner.calls(),
            vec![argv(&[
                "debug-log", "-i", "mysql/0", "--replay", "--level", "ERROR"
            ])]
        );
        assert!(h.no_resolution_calls());
    }

    #[test]
    fn destroy_model_fixed_flags_precede_trailing() {
        let h = Harness::new(ScriptedLister::ok(&[]), ScriptedSelector::first());
        h.run(&["destroy-model", "dev", "--no-prompt-extra"]).unwrap();
        assert_eq!(
            h.runner.calls(),
            vec![argv(&[
                "destroy-model",
                "dev",
                "--no-wait",
                "--force",
                "--destroy-storage",
                "--no-prompt",
                "--no-prompt-extra",
            ])]
        );
        assert!(h.no_resolution_calls());
    }

    #[test]
    fn destroy_model_selected_gets_same_flags() {
        let h = Harness::new(ScriptedLister::ok(&["admin/dev"]), ScriptedSelector::auto_only());
        h.run(&["destroy-model"]).unwrap();
        assert_eq!(
            h.runner.calls(),
            vec![argv(&[
                "destroy-model",
                "admin/dev",
                "--no-wait",
                "--force",
                "--destroy-storage",
                "--no-prompt",
            ])]
        );
    }

    #[test]
    fn passthrough_is_identity() {
        for invocation in [
            vec!["status"],
            vec!["status", "--format=yaml", "mysql"],
            vec!["--help"],
            vec!["deploy", "ssh"],
            vec![],
        ] {
            let h = Harness::new(ScriptedLister::ok(&["x"]), ScriptedSelector::first());
            h.run(&invocation).unwrap();
            assert_eq!(h.runner.calls(), vec![argv(&invocation)]);
            assert!(h.no_resolution_calls());
        }
    }

    #[test]
    fn single_candidate_is_auto_selected() {
        let cases: [(&str, &str, Vec<String>); 4] = [
            ("models", "default", argv(&["switch", "default"])),
            ("controllers", "only", argv(&["switch", "only"])),
            ("ssh", "app/0", argv(&["ssh", "app/0"])),
            (
                "destroy-model",
                "dev",
                argv(&[
                    "destroy-model",
                    "dev",
                    "--no-wait",
                    "--force",
                    "--destroy-storage",
                    "--no-prompt",
                ]),
            ),
        ];
        for (sub, only, expected) in cases {
            let h = Harness::new(ScriptedLister::ok(&[only]), ScriptedSelector::auto_only());
            h.run(&[sub]).unwrap();
            assert_eq!(h.runner.calls(), vec![expected], "{sub}");
        }
    }

    #[test]
    fn empty_listing_blocks_switch() {
        for sub in ["controllers", "models"] {
            let h = Harness::new(ScriptedLister::ok(&[]), ScriptedSelector::auto_only());
            let err = h.run(&[sub]).unwrap_err();
            assert!(matches!(err, Error::NoTargetSelected { .. }), "{sub}");
            assert!(h.runner.calls().is_empty());
        }
    }

    #[test]
    fn lister_failure_never_dispatches() {
        let h = Harness::new(ScriptedLister::failing(), ScriptedSelector::first());
        let err = h.run(&["ssh"]).unwrap_err();
        assert!(matches!(err, Error::BackendUnavailable { .. }));
        assert!(h.runner.calls().is_empty());
        assert!(h.selector.calls().is_empty());
    }

    #[test]
    fn backend_exit_code_is_the_result() {
        let h = Harness {
            lister: ScriptedLister::ok(&[]),
            selector: ScriptedSelector::first(),
            runner: RecordingRunner::exiting(255),
        };
        assert_eq!(h.run(&["ssh", "app/0", "false"]).unwrap(), 255);
    }

    #[test]
    fn explicit_switch_targets_skip_resolution() {
        for (invocation, expected) in [
            (&["controllers", "ctrl-a"][..], &["switch", "ctrl-a"][..]),
            (&["models", "dev"][..], &["switch", "dev"][..]),
            (&["models", "dev", "--unused"][..], &["switch", "dev"][..]),
        ] {
            let h = Harness::new(ScriptedLister::failing(), ScriptedSelector::first());
            assert_eq!(h.run(invocation).unwrap(), 0);
            assert_eq!(h.runner.calls(), vec![argv(expected)]);
            assert!(h.no_resolution_calls());
        }
    }

    #[test]
    fn switch_drops_extra_arguments() {
        let args = build_invocation(
            SubcommandKind::Models,
            Some("dev"),
            &argv(&["--unused"]),
        )
        .unwrap();
        assert_eq!(args, argv(&["switch", "dev"]));
    }

    #[test]
    fn build_refuses_missing_required_target() {
        let err = build_invocation(SubcommandKind::Ssh, None, &[]).unwrap_err();
        assert!(matches!(
            err,
            Error::NoTargetSelected {
                kind: SubcommandKind::Ssh
            }
        ));
    }

    #[test]
    fn trailing_tokens_are_not_resplit() {
        let args = build_invocation(
            SubcommandKind::Ssh,
            Some("app/0"),
            &argv(&["ls -la /var/log", "", "--"]),
        )
        .unwrap();
        assert_eq!(args, argv(&["ssh", "app/0", "ls -la /var/log", "", "--"]));
    }
}
