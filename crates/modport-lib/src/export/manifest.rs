//! `info.json` version field access
//!
//! Only `version` is rewritten; every other key keeps its value and position.
//! Reads fall back to the seed version and writes report failure as a value.

use super::VersionScheme;
use serde::Serialize;
use serde_json::{Map, Value};
use std::fs;
use std::path::Path;
use tracing::{debug, warn};

pub const MANIFEST_FILE: &str = "info.json";

/// Result of a manifest version write
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ManifestUpdate {
    Updated { previous: Option<String> },
    Failed { reason: String },
}

impl ManifestUpdate {
    pub fn is_updated(&self) -> bool {
        matches!(self, ManifestUpdate::Updated { .. })
    }
}

#[derive(Debug, Clone, Default)]
pub struct ManifestStore {
    scheme: VersionScheme,
}

impl ManifestStore {
    pub fn new(scheme: VersionScheme) -> Self {
        Self { scheme }
    }

    /// Current `version`, or the seed version when it cannot be read
    pub fn read_version(&self, path: &Path) -> String {
        match load_object(path) {
            Ok(object) => match object.get("version").and_then(Value::as_str) {
                Some(version) => version.to_string(),
                None => {
                    debug!(path = %path.display(), "manifest has no string version");
                    self.scheme.seed()
                }
            },
            Err(reason) => {
                debug!(path = %path.display(), %reason, "manifest unreadable");
                self.scheme.seed()
            }
        }
    }

    pub fn read_name(&self, path: &Path) -> Option<String> {
        let object = load_object(path).ok()?;
        object
            .get("name")
            .and_then(Value::as_str)
            .filter(|name| !name.is_empty())
            .map(str::to_string)
    }

    /// Set `version` in place, preserving all other keys
    pub fn write_version(&self, path: &Path, version: &str) -> ManifestUpdate {
        match rewrite_version(path, version) {
            Ok(previous) => {
                debug!(
                    path = %path.display(),
                    previous = previous.as_deref().unwrap_or("<none>"),
                    version,
                    "manifest version updated"
                );
                ManifestUpdate::Updated { previous }
            }
            Err(reason) => {
                warn!(path = %path.display(), %reason, "could not update manifest version");
                ManifestUpdate::Failed { reason }
            }
        }
    }
}

fn load_object(path: &Path) -> Result<Map<String, Value>, String> {
    let content = fs::read_to_string(path).map_err(|e| e.to_string())?;
    match serde_json::from_str::<Value>(&content).map_err(|e| e.to_string())? {
        Value::Object(object) => Ok(object),
        _ => Err("manifest is not a JSON object".to_string()),
    }
}

fn rewrite_version(path: &Path, version: &str) -> Result<Option<String>, String> {
    let mut object = load_object(path)?;

    let previous = object
        .insert("version".to_string(), Value::String(version.to_string()))
        .and_then(|old| old.as_str().map(str::to_string));

    let mut buffer = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"\t");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buffer, formatter);
    Value::Object(object)
        .serialize(&mut serializer)
        .map_err(|e| e.to_string())?;

    fs::write(path, buffer).map_err(|e| e.to_string())?;
    Ok(previous)
}

#[cfg(test)]
mod tests {
    include!("manifest.test.rs");
}
