//! Export settings
//!
//! [`ConfigFile`] mirrors the optional YAML file kept next to the mod
//! sources. [`ExportConfig`] is the immutable result of merging it with the
//! command line; every export component takes its settings from there.

use super::{ExcludeFilter, MANIFEST_FILE, ManifestStore, VersionScheme};
use crate::application::AppConfig;
use crate::platform::{self, HostOs};
use crate::primitives::ConfigError;
use serde::{Deserialize, Deserializer};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Config files probed, relative to the source directory, when none is given
pub const CONFIG_CANDIDATES: &[&str] = &[
    "scripts/export_config.yaml",
    "scripts/validate_config.yaml",
    "export_config.yaml",
];

/// Null or missing YAML values become the type's default
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// The `export:` section
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ExportSection {
    pub mods_directory: Option<String>,
    pub mod_name: Option<String>,
    /// Replaces the default exclude list
    pub exclude: Option<Vec<String>>,
    /// Added to whichever exclude list is in effect
    #[serde(deserialize_with = "null_as_default")]
    pub extra_exclude: Vec<String>,
    pub bulk_copy: Option<bool>,
    pub patch_width: Option<usize>,
}

/// On-disk YAML configuration; unknown keys are ignored
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ConfigFile {
    #[serde(deserialize_with = "null_as_default")]
    pub export: ExportSection,
    pub factorio_bin: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub common_paths: Vec<String>,

    /// File this configuration came from
    #[serde(skip)]
    pub path: Option<PathBuf>,
    /// Why a discovered file was ignored
    #[serde(skip)]
    pub ignored: Option<String>,
}

impl ConfigFile {
    /// Parse YAML text; blank or comment-only text is an empty config
    pub fn parse(content: &str) -> Result<Self, String> {
        let blank = content
            .lines()
            .map(str::trim)
            .all(|line| line.is_empty() || line.starts_with('#'));
        if blank {
            return Ok(Self::default());
        }

        serde_saphyr::from_str(content).map_err(|e| e.to_string())
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::ConfigFileUnreadable {
            path: path.to_path_buf(),
            source: e,
        })?;

        let mut file = Self::parse(&content).map_err(|reason| ConfigError::ConfigFileInvalid {
            path: path.to_path_buf(),
            reason,
        })?;
        file.path = Some(path.to_path_buf());
        Ok(file)
    }

    /// Find and load the config file for `source_dir`
    ///
    /// An explicit path that cannot be read is an error. A file that exists
    /// but does not parse is ignored with a warning, as is an unreadable
    /// discovered file.
    pub fn discover(explicit: Option<&Path>, source_dir: &Path) -> Result<Self, ConfigError> {
        let path = match explicit {
            Some(path) => {
                if !path.is_file() {
                    return Err(ConfigError::ConfigFileUnreadable {
                        path: path.to_path_buf(),
                        source: std::io::Error::new(
                            std::io::ErrorKind::NotFound,
                            "config file not found",
                        ),
                    });
                }
                path.to_path_buf()
            }
            None => match CONFIG_CANDIDATES
                .iter()
                .map(|candidate| source_dir.join(candidate))
                .find(|candidate| candidate.is_file())
            {
                Some(path) => path,
                None => {
                    debug!(source = %source_dir.display(), "no config file found");
                    return Ok(Self::default());
                }
            },
        };

        match Self::load(&path) {
            Ok(file) => {
                debug!(path = %path.display(), "loaded config file");
                Ok(file)
            }
            Err(ConfigError::ConfigFileUnreadable { source, .. }) if explicit.is_some() => {
                Err(ConfigError::ConfigFileUnreadable { path, source })
            }
            Err(e) => {
                warn!(error = %e, "ignoring config file");
                Ok(Self {
                    ignored: Some(e.to_string()),
                    ..Self::default()
                })
            }
        }
    }
}

/// Settings for one export run
#[derive(Debug, Clone)]
pub struct ExportConfig {
    pub source_dir: PathBuf,
    pub mod_name: String,
    pub filter: ExcludeFilter,
    pub bulk_copy: bool,
    /// Allocate a version, stamp manifests and write the zip
    pub archive: bool,
    pub scheme: VersionScheme,
    pub mods_directory: Option<String>,
    pub factorio_bin: Option<String>,
    pub common_paths: Vec<String>,
    pub home: Option<PathBuf>,
    pub appdata: Option<PathBuf>,
    pub host_os: HostOs,
}

impl ExportConfig {
    /// Defaults for `source_dir` with a fixed mod name
    pub fn new(source_dir: impl Into<PathBuf>, mod_name: impl Into<String>) -> Self {
        Self {
            source_dir: source_dir.into(),
            mod_name: mod_name.into(),
            filter: ExcludeFilter::default(),
            bulk_copy: true,
            archive: true,
            scheme: VersionScheme::default(),
            mods_directory: None,
            factorio_bin: None,
            common_paths: Vec::new(),
            home: platform::home_dir(),
            appdata: None,
            host_os: HostOs::current(),
        }
    }

    /// Merge command line settings with the config file
    ///
    /// Mod name precedence: `--mod-name`, `export.mod_name`, the source
    /// manifest's `name`, then the source directory's name.
    pub fn from_sources(
        app: &AppConfig,
        file: &ConfigFile,
        appdata: Option<PathBuf>,
    ) -> Result<Self, ConfigError> {
        let source_dir = match &app.source {
            Some(source) => source.clone(),
            None => std::env::current_dir()?,
        };

        let scheme = match file.export.patch_width {
            None => VersionScheme::default(),
            Some(width @ 1..=9) => VersionScheme {
                patch_width: width,
                ..VersionScheme::default()
            },
            Some(width) => {
                return Err(ConfigError::ValidationFailed {
                    reason: format!("export.patch_width must be between 1 and 9, got {}", width),
                });
            }
        };

        let mod_name = resolve_mod_name(app, file, &source_dir, scheme)?;

        let filter = match &file.export.exclude {
            Some(patterns) => ExcludeFilter::new(patterns.iter().cloned()),
            None => ExcludeFilter::default(),
        }
        .extended(file.export.extra_exclude.iter().cloned());

        Ok(Self {
            source_dir,
            mod_name,
            filter,
            bulk_copy: !app.no_bulk_copy && file.export.bulk_copy.unwrap_or(true),
            archive: !app.no_archive,
            scheme,
            mods_directory: non_empty(file.export.mods_directory.as_deref()),
            factorio_bin: non_empty(file.factorio_bin.as_deref()),
            common_paths: file.common_paths.clone(),
            home: platform::home_dir(),
            appdata,
            host_os: HostOs::current(),
        })
    }
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}

fn resolve_mod_name(
    app: &AppConfig,
    file: &ConfigFile,
    source_dir: &Path,
    scheme: VersionScheme,
) -> Result<String, ConfigError> {
    let name = non_empty(app.mod_name.as_deref())
        .or_else(|| non_empty(file.export.mod_name.as_deref()))
        .or_else(|| ManifestStore::new(scheme).read_name(&source_dir.join(MANIFEST_FILE)))
        .or_else(|| {
            source_dir
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
        })
        .ok_or_else(|| ConfigError::InvalidSourceDir {
            path: source_dir.display().to_string(),
        })?;

    if name == "." || name == ".." || name.contains(['/', '\\']) {
        return Err(ConfigError::ValidationFailed {
            reason: format!("'{}' is not a valid mod name", name),
        });
    }

    Ok(name)
}

#[cfg(test)]
mod tests {
    include!("config.test.rs");
}
