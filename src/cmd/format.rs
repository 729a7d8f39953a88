/*!
format.rs

Terminal styling for the few human-facing lines `jfz` prints itself
(failure reports before dispatch). Everything else on the terminal belongs
to the backend or the selector.

  - Colour ENABLED by default, disabled by NO_COLOR.
  - Glyphs ENABLED by default, disabled by NO_EMOJI.
  - Helpers return strings; callers decide where to print (always stderr).
*/

#[derive(Debug, Clone)]
pub struct StyleOptions {
    pub use_color: bool,
    pub use_emoji: bool,
}

impl Default for StyleOptions {
    fn default() -> Self {
        Self::detect()
    }
}

impl StyleOptions {
    pub fn detect() -> Self {
        StyleOptions {
            use_color: std::env::var_os("NO_COLOR").is_none(),
            use_emoji: std::env::var_os("NO_EMOJI").is_none(),
        }
    }

    pub fn plain() -> Self {
        StyleOptions {
            use_color: false,
            use_emoji: false,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub enum Role {
    Warning,
    Error,
    Dim,
}

pub fn color(role: Role, text: impl AsRef<str>, style: &StyleOptions) -> String {
    if !style.use_color {
        return text.as_ref().to_string();
    }
    let code = match role {
        Role::Warning => "38;5;214", // orange
        Role::Error => "38;5;196",   // red
        Role::Dim => "2",            // faint
    };
    format!("\x1b[{code}m{}\x1b[0m", text.as_ref())
}

pub fn emoji(tag: &str, style: &StyleOptions) -> &'static str {
    if !style.use_emoji {
        return "";
    }
    match tag {
        "error" => "✖",
        "warn" => "⚠",
        "info" => "ℹ",
        _ => "",
    }
}

/// One-line failure report: glyph, coloured message, optional dim hint.
pub fn failure_line(
    message: &str,
    hint: Option<&str>,
    cancelled: bool,
    style: &StyleOptions,
) -> String {
    let (tag, role) = if cancelled {
        ("warn", Role::Warning)
    } else {
        ("error", Role::Error)
    };
    let glyph = emoji(tag, style);
    let mut line = if glyph.is_empty() {
        format!("jfz: {}", color(role, message, style))
    } else {
        format!("{glyph} jfz: {}", color(role, message, style))
    };
    if let Some(h) = hint {
        line.push_str(&format!(" {}", color(Role::Dim, format!("({h})"), style)));
    }
    line
}
