//! Inspection helpers for export results
//!
//! Read archives and manifests the way the game would, so tests assert on
//! what actually ships rather than on internal state.

use anyhow::{Context, Result, anyhow};
use serde_json::Value;
use std::fs::{self, File};
use std::io::Read;
use std::path::Path;
use zip::ZipArchive;

/// Every entry name in an archive, in stored order
pub fn archive_entries(archive: &Path) -> Result<Vec<String>> {
    let file = File::open(archive)
        .with_context(|| format!("Failed to open archive: {}", archive.display()))?;
    let zip = ZipArchive::new(file)?;
    Ok(zip.file_names().map(str::to_string).collect())
}

/// The `info.json` stored under `<mod_name>/` inside an archive
pub fn archive_manifest(archive: &Path, mod_name: &str) -> Result<Value> {
    let file = File::open(archive)
        .with_context(|| format!("Failed to open archive: {}", archive.display()))?;
    let mut zip = ZipArchive::new(file)?;
    let mut entry = zip.by_name(&format!("{}/info.json", mod_name))?;

    let mut content = String::new();
    entry.read_to_string(&mut content)?;
    Ok(serde_json::from_str(&content)?)
}

/// The `version` field of a manifest on disk
pub fn manifest_version(manifest: &Path) -> Result<String> {
    let content = fs::read_to_string(manifest)
        .with_context(|| format!("Failed to read manifest: {}", manifest.display()))?;
    let value: Value = serde_json::from_str(&content)?;
    value
        .get("version")
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or_else(|| anyhow!("manifest has no version: {}", manifest.display()))
}
