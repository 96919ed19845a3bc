//! Mods directory resolution
//!
//! Tried in order: explicit argument, config `export.mods_directory`, the
//! install owning the configured Factorio binary, a `factorio` link inside the
//! source tree, and the per-OS user data directory.

use super::{ExportConfig, ExportError};
use crate::platform::{HostOs, expand_home_with};
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DestinationSource {
    Explicit,
    ConfigFile,
    FactorioBinary,
    Symlink,
    OsDefault,
}

impl fmt::Display for DestinationSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            DestinationSource::Explicit => "command line",
            DestinationSource::ConfigFile => "config file",
            DestinationSource::FactorioBinary => "factorio install",
            DestinationSource::Symlink => "factorio link",
            DestinationSource::OsDefault => "platform default",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedDestination {
    pub path: PathBuf,
    pub source: DestinationSource,
}

pub struct DestinationResolver<'a> {
    config: &'a ExportConfig,
}

impl<'a> DestinationResolver<'a> {
    pub fn new(config: &'a ExportConfig) -> Self {
        Self { config }
    }

    /// Resolve the mods directory
    ///
    /// Only the explicit and OS default candidates are returned without an
    /// existence check; validation happens afterwards.
    pub fn resolve(&self, explicit: Option<&Path>) -> Result<ResolvedDestination, ExportError> {
        if let Some(path) = explicit {
            return Ok(self.found(path.to_path_buf(), DestinationSource::Explicit));
        }

        if let Some(configured) = &self.config.mods_directory {
            let path = expand_home_with(configured, self.config.home.as_deref());
            if path.is_dir() {
                return Ok(self.found(path, DestinationSource::ConfigFile));
            }
            debug!(path = %path.display(), "configured mods_directory does not exist");
        } else if let Some(mods) = self.from_factorio_bin() {
            return Ok(self.found(mods, DestinationSource::FactorioBinary));
        }

        let link = self.config.source_dir.join("factorio");
        if link.is_symlink() || link.is_dir() {
            return Ok(self.found(link.join("mods"), DestinationSource::Symlink));
        }

        default_mods_dir(
            self.config.host_os,
            self.config.home.as_deref(),
            self.config.appdata.as_deref(),
        )
        .map(|path| self.found(path, DestinationSource::OsDefault))
        .ok_or(ExportError::DestinationUnresolved)
    }

    /// `<bin>/../../../mods` for a configured binary like `<root>/bin/x64/factorio`
    fn from_factorio_bin(&self) -> Option<PathBuf> {
        let configured = self.config.factorio_bin.as_deref()?;
        let bin = expand_home_with(configured, self.config.home.as_deref());
        if !bin.exists() {
            debug!(path = %bin.display(), "factorio_bin does not exist");
            return None;
        }

        let mods = bin.parent()?.parent()?.parent()?.join("mods");
        if mods.is_dir() {
            Some(mods)
        } else {
            debug!(path = %mods.display(), "factorio install has no mods directory");
            None
        }
    }

    fn found(&self, path: PathBuf, source: DestinationSource) -> ResolvedDestination {
        debug!(path = %path.display(), %source, "resolved destination");
        ResolvedDestination { path, source }
    }
}

/// Per-user mods directory of a standard install
pub fn default_mods_dir(os: HostOs, home: Option<&Path>, appdata: Option<&Path>) -> Option<PathBuf> {
    match os {
        HostOs::Linux => home.map(|home| home.join(".factorio").join("mods")),
        HostOs::MacOs => home.map(|home| {
            home.join("Library")
                .join("Application Support")
                .join("factorio")
                .join("mods")
        }),
        HostOs::Windows => appdata.map(|appdata| appdata.join("Factorio").join("mods")),
        HostOs::Other => None,
    }
}

#[cfg(test)]
mod tests {
    include!("destination.test.rs");
}
