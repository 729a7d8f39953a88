//! Runtime configuration: which backend and selector to run, and how the
//! selector is displayed.
//!
//! Precedence: `JFZ_*` environment variables > file named by `JFZ_CONFIG`
//! (YAML or JSON) > built-in defaults. Read once at the binary edge.

use std::path::Path;

use serde::Deserialize;

use crate::backend::Backend;
use crate::error::{Error, Result};
use crate::selector::{FzfSelector, SelectorOptions};

pub const ENV_CONFIG: &str = "JFZ_CONFIG";
pub const ENV_BACKEND: &str = "JFZ_BACKEND";
pub const ENV_SELECTOR: &str = "JFZ_SELECTOR";
pub const ENV_HEIGHT: &str = "JFZ_HEIGHT";
pub const ENV_POINTER: &str = "JFZ_POINTER";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Backend command line, e.g. `juju`.
    pub backend: String,
    /// Selector command line, e.g. `fzf`.
    pub selector: String,
    /// Selector height (`--height`).
    pub height: String,
    /// Selector pointer glyph (`--pointer`).
    pub pointer: String,
}

impl Default for Config {
    fn default() -> Self {
        let opts = SelectorOptions::default();
        Config {
            backend: "juju".into(),
            selector: "fzf".into(),
            height: opts.height,
            pointer: opts.pointer,
        }
    }
}

impl Config {
    /// Load from the process environment.
    pub fn load() -> Result<Self> {
        Self::load_with(|key| std::env::var(key).ok())
    }

    /// Load using `lookup` for environment variables. Blank values count as unset.
    pub fn load_with(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let mut config = match get(ENV_CONFIG) {
            Some(path) => Self::from_file(Path::new(&path))?,
            None => Config::default(),
        };

        if let Some(v) = get(ENV_BACKEND) {
            config.backend = v;
        }
        if let Some(v) = get(ENV_SELECTOR) {
            config.selector = v;
        }
        if let Some(v) = get(ENV_HEIGHT) {
            config.height = v;
        }
        if let Some(v) = get(ENV_POINTER) {
            config.pointer = v;
        }
        Ok(config)
    }

    /// Read a YAML (`.yaml` / `.yml`) or JSON config file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("failed to read {}: {e}", path.display())))?;
        let lower = path.to_string_lossy().to_ascii_lowercase();

        let parsed = if lower.ends_with(".yaml") || lower.ends_with(".yml") {
            serde_yaml::from_str(&raw).map_err(|e| e.to_string())
        } else {
            serde_json::from_str(&raw).map_err(|e| e.to_string())
        };
        parsed.map_err(|e| Error::Config(format!("failed to parse {}: {e}", path.display())))
    }

    pub fn selector_options(&self) -> SelectorOptions {
        SelectorOptions {
            height: self.height.clone(),
            pointer: self.pointer.clone(),
        }
    }

    pub fn backend(&self) -> Result<Backend> {
        Backend::from_command_line(&self.backend)
    }

    pub fn selector(&self) -> Result<FzfSelector> {
        FzfSelector::from_command_line(&self.selector, self.selector_options())
    }
}
