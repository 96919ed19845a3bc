//! Cross-platform program capability detection
//!
//! Provides composable APIs for detecting available programs and their
//! capabilities across Windows and Unix systems.

use std::env;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use super::expand_home;

/// Program detection result
#[derive(Debug, Clone, PartialEq)]
pub struct ProgramInfo {
    /// Program name
    pub name: String,
    /// Whether the program is available
    pub available: bool,
    /// Full path to program if found
    pub path: Option<PathBuf>,
}

impl ProgramInfo {
    fn missing(name: &str) -> Self {
        Self {
            name: name.to_string(),
            available: false,
            path: None,
        }
    }

    fn found(name: &str, path: PathBuf) -> Self {
        Self {
            name: name.to_string(),
            available: true,
            path: Some(path),
        }
    }
}

/// Cross-platform program finder
pub struct ProgramFinder;

impl ProgramFinder {
    /// Check if a program exists on the current `PATH`
    pub fn find(program: &str) -> ProgramInfo {
        Self::find_in(program, env::var_os("PATH").as_deref())
    }

    /// Check if a program exists on an explicit search path
    pub fn find_in(program: &str, search_path: Option<&OsStr>) -> ProgramInfo {
        match Self::find_program_path(program, search_path) {
            Some(path) => ProgramInfo::found(program, path),
            None => ProgramInfo::missing(program),
        }
    }

    fn find_program_path(program: &str, search_path: Option<&OsStr>) -> Option<PathBuf> {
        let search_path = search_path?;

        env::split_paths(search_path)
            .filter(|dir| !dir.as_os_str().is_empty())
            .flat_map(|dir| {
                Self::candidate_names(program)
                    .into_iter()
                    .map(move |name| dir.join(name))
            })
            .find(|candidate| is_executable(candidate))
    }

    #[cfg(windows)]
    fn candidate_names(program: &str) -> Vec<String> {
        if Path::new(program).extension().is_some() {
            vec![program.to_string()]
        } else {
            vec![program.to_string(), format!("{}.exe", program)]
        }
    }

    #[cfg(not(windows))]
    fn candidate_names(program: &str) -> Vec<String> {
        vec![program.to_string()]
    }
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;

    path.metadata()
        .map(|meta| meta.is_file() && meta.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    path.is_file()
}

/// Locates the Factorio game binary used by the headless validation tooling
pub struct FactorioCapabilities;

impl FactorioCapabilities {
    /// Install locations probed when the config file lists none
    pub const DEFAULT_COMMON_PATHS: &'static [&'static str] = &[
        // Linux
        "/opt/factorio/bin/x64/factorio",
        "/usr/local/bin/factorio",
        "~/factorio/bin/x64/factorio",
        // macOS
        "/Applications/factorio.app/Contents/MacOS/factorio",
        // Windows
        "C:\\Program Files\\Factorio\\bin\\x64\\factorio.exe",
        "C:\\Program Files (x86)\\Factorio\\bin\\x64\\factorio.exe",
        "/mnt/c/Program Files/Factorio/bin/x64/factorio.exe",
        "/mnt/c/Program Files (x86)/Factorio/bin/x64/factorio.exe",
        // Steam (Linux)
        "~/.steam/steam/steamapps/common/Factorio/bin/x64/factorio",
        "~/.local/share/Steam/steamapps/common/Factorio/bin/x64/factorio",
        "~/Steam/steamapps/common/Factorio/bin/x64/factorio",
        "~/.var/app/com.valvesoftware.Steam/data/Steam/steamapps/common/Factorio/bin/x64/factorio",
        // Steam (macOS)
        "~/Library/Application Support/Steam/steamapps/common/Factorio/factorio.app/Contents/MacOS/factorio",
        // Steam (Windows via WSL)
        "/mnt/c/Program Files (x86)/Steam/steamapps/common/Factorio/bin/x64/factorio.exe",
    ];

    /// Detect the binary: configured path, then `common_paths`, then `PATH`
    pub fn detect(configured: Option<&Path>, common_paths: &[String]) -> ProgramInfo {
        if let Some(path) = configured {
            if path.exists() {
                return ProgramInfo::found("factorio", path.to_path_buf());
            }
            tracing::debug!(path = %path.display(), "configured factorio_bin does not exist");
        }

        let from_common = if common_paths.is_empty() {
            Self::first_existing(Self::DEFAULT_COMMON_PATHS.iter().copied())
        } else {
            Self::first_existing(common_paths.iter().map(String::as_str))
        };

        if let Some(path) = from_common {
            return ProgramInfo::found("factorio", path);
        }

        ProgramFinder::find("factorio")
    }

    fn first_existing<'a>(candidates: impl Iterator<Item = &'a str>) -> Option<PathBuf> {
        candidates.map(expand_home).find(|path| path.exists())
    }
}

#[cfg(test)]
mod tests {
    include!("capabilities.test.rs");
}
