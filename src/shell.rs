//! Shell integration script generation (bash / zsh).
//!
//! The script registers a completion hook for `jfz` (and optionally a
//! wrapper function such as `juju`) that asks `jfz-shell` for candidates.
//! It is static text derived from the subcommand table; nothing here runs
//! at dispatch time.

use std::fmt;

use crate::cmd::subcommand::SubcommandKind;

#[derive(clap::ValueEnum, Clone, Copy, Debug, Eq, PartialEq)]
pub enum ShellKind {
    Bash,
    Zsh,
}

impl fmt::Display for ShellKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ShellKind::Bash => "bash",
            ShellKind::Zsh => "zsh",
        })
    }
}

/// `case` arms mapping each enhanced subcommand to its listing kind.
fn case_arms() -> String {
    let mut out = String::new();
    for kind in SubcommandKind::enhanced() {
        if let Some(desc) = kind.descriptor() {
            out.push_str(&format!(
                "        {}) kind={} ;;\n",
                desc.token, desc.list
            ));
        }
    }
    out
}

/// Names the completion hook is attached to.
fn completed_names(alias: Option<&str>) -> String {
    match alias {
        Some(a) if a != "jfz" => format!("jfz {a}"),
        _ => "jfz".to_string(),
    }
}

/// Render the integration script for `shell`.
///
/// `alias` installs a function of that name forwarding to `jfz`, so
/// e.g. `juju ssh` goes through the selector.
pub fn integration_script(shell: ShellKind, alias: Option<&str>) -> String {
    let mut script = format!("# jfz shell integration ({shell})\n");

    if shell == ShellKind::Zsh {
        script.push_str("autoload -U +X compinit && compinit\n");
        script.push_str("autoload -U +X bashcompinit && bashcompinit\n");
    }

    if let Some(a) = alias.filter(|a| *a != "jfz") {
        script.push_str(&format!("{a}() {{ command jfz \"$@\"; }}\n"));
    }

    let subcommands = SubcommandKind::enhanced()
        .iter()
        .map(|k| k.to_string())
        .collect::<Vec<_>>()
        .join(" ");

    script.push_str(&format!(
        r#"_jfz_complete() {{
    local cur="${{COMP_WORDS[COMP_CWORD]}}"
    local kind=""
    if [ "$COMP_CWORD" -eq 1 ]; then
        COMPREPLY=( $(compgen -W "{subcommands}" -- "$cur") )
        return 0
    fi
    [ "$COMP_CWORD" -eq 2 ] || return 0
    case "${{COMP_WORDS[1]}}" in
{arms}    esac
    if [ -n "$kind" ]; then
        local IFS=$'\n'
        COMPREPLY=( $(compgen -W "$(jfz-shell complete "$kind" 2>/dev/null)" -- "$cur") )
    fi
}}
complete -o default -F _jfz_complete {names}
"#,
        arms = case_arms(),
        names = completed_names(alias),
    ));
    script
}
