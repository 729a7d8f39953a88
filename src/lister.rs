//! Structured listing: ask the backend for JSON and flatten it into candidates.
//!
//! list(kind) -> Vec<String>, in the backend's own order. No caching.

use std::fmt;

use serde_json::Value;

use crate::error::{Error, Result};

/// Which entities a listing call enumerates.
#[derive(clap::ValueEnum, Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum ListKind {
    Controllers,
    Models,
    Units,
}

impl ListKind {
    /// Backend arguments producing the structured listing for this kind.
    pub fn listing_args(&self) -> [&'static str; 2] {
        match self {
            ListKind::Controllers => ["controllers", "--format=json"],
            ListKind::Models => ["models", "--format=json"],
            ListKind::Units => ["status", "--format=json"],
        }
    }
}

impl fmt::Display for ListKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ListKind::Controllers => "controllers",
            ListKind::Models => "models",
            ListKind::Units => "units",
        };
        f.write_str(s)
    }
}

/// Source of candidate identifiers.
pub trait Lister {
    fn list(&self, kind: ListKind) -> Result<Vec<String>>;
}

/// Parse raw listing output for `kind` into an ordered candidate list.
pub fn parse_listing(kind: ListKind, raw: &[u8]) -> Result<Vec<String>> {
    let value: Value = serde_json::from_slice(raw).map_err(|e| Error::MalformedOutput {
        kind,
        reason: e.to_string(),
    })?;
    let extracted = match kind {
        ListKind::Controllers => controller_names(&value),
        ListKind::Models => model_names(&value),
        ListKind::Units => unit_names(&value),
    };
    extracted.map_err(|reason| Error::MalformedOutput { kind, reason })
}

/// Keys of the `controllers` map.
fn controller_names(value: &Value) -> std::result::Result<Vec<String>, String> {
    let map = value
        .get("controllers")
        .ok_or("missing `controllers`")?
        .as_object()
        .ok_or("`controllers` is not a map")?;
    Ok(map.keys().cloned().collect())
}

/// `name` of every entry in the `models` array.
fn model_names(value: &Value) -> std::result::Result<Vec<String>, String> {
    let arr = value
        .get("models")
        .ok_or("missing `models`")?
        .as_array()
        .ok_or("`models` is not a list")?;
    arr.iter()
        .enumerate()
        .map(|(idx, m)| {
            m.get("name")
                .and_then(|v| v.as_str())
                .map(str::to_string)
                .ok_or_else(|| format!("model entry {idx} has no `name`"))
        })
        .collect()
}

/// Unit keys of every application, flattened in document order.
///
/// Subordinate applications carry no `units` map and contribute nothing.
fn unit_names(value: &Value) -> std::result::Result<Vec<String>, String> {
    let apps = value
        .get("applications")
        .ok_or("missing `applications`")?
        .as_object()
        .ok_or("`applications` is not a map")?;

    let mut units = Vec::new();
    for (app, body) in apps {
        let body = body
            .as_object()
            .ok_or_else(|| format!("application `{app}` is not a map"))?;
        let Some(app_units) = body.get("units") else {
            continue;
        };
        let app_units = app_units
            .as_object()
            .ok_or_else(|| format!("`units` of `{app}` is not a map"))?;
        units.extend(app_units.keys().cloned());
    }
    Ok(units)
}
