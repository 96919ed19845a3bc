//! Host platform detection
//!
//! Operating system identification, home-directory expansion, and program
//! capability probes used by destination resolution and the requirements
//! report.

pub mod capabilities;

use directories::BaseDirs;
use std::path::{Path, PathBuf};

pub use capabilities::*;

/// Operating systems with a known Factorio data layout
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostOs {
    Linux,
    MacOs,
    Windows,
    Other,
}

impl HostOs {
    /// Detect the OS this binary was compiled for
    pub fn current() -> Self {
        if cfg!(target_os = "linux") {
            HostOs::Linux
        } else if cfg!(target_os = "macos") {
            HostOs::MacOs
        } else if cfg!(windows) {
            HostOs::Windows
        } else {
            HostOs::Other
        }
    }
}

/// Current user's home directory
pub fn home_dir() -> Option<PathBuf> {
    BaseDirs::new().map(|dirs| dirs.home_dir().to_path_buf())
}

/// Expand a leading `~` the way a shell would
pub fn expand_home(path: &str) -> PathBuf {
    expand_home_with(path, home_dir().as_deref())
}

/// Expand a leading `~` against an explicit home directory
pub fn expand_home_with(path: &str, home: Option<&Path>) -> PathBuf {
    let Some(home) = home else {
        return PathBuf::from(path);
    };

    if path == "~" {
        return home.to_path_buf();
    }

    match path
        .strip_prefix("~/")
        .or_else(|| path.strip_prefix("~\\"))
    {
        Some(rest) => home.join(rest),
        None => PathBuf::from(path),
    }
}

#[cfg(test)]
mod tests {
    include!("mod.test.rs");
}
