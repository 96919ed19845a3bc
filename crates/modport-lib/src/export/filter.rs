//! Exclude patterns for the exported tree
//!
//! A pattern is either `*suffix` (matched against the entry's file name) or a
//! plain string matched as a prefix of the `/`-joined relative path or as the
//! exact file name. One match is enough to exclude.

use super::ExportError;
use std::path::{Component, Path};

/// Development files that never ship with the mod
pub const DEFAULT_EXCLUDE_PATTERNS: &[&str] = &[
    ".git",
    ".gitignore",
    ".github",
    "scripts",
    "docs",
    "tests",
    "run_tests.lua",
    "factorio",
    "__pycache__",
    "*.pyc",
    ".vscode",
    ".idea",
    ".venv",
    "venv",
    ".editorconfig",
    ".luarc.json",
    ".markdownlintignore",
    ".stylua.toml",
    "PROJECT_STRUCTURE.md",
    "validate_config.sh",
    "*.zip",
    "*.tar.gz",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExcludeFilter {
    patterns: Vec<String>,
}

impl Default for ExcludeFilter {
    fn default() -> Self {
        Self::new(DEFAULT_EXCLUDE_PATTERNS.iter().map(|p| p.to_string()))
    }
}

impl ExcludeFilter {
    /// Build a filter; empty patterns are dropped since they would match everything
    pub fn new(patterns: impl IntoIterator<Item = String>) -> Self {
        Self {
            patterns: patterns.into_iter().filter(|p| !p.is_empty()).collect(),
        }
    }

    /// Append more patterns, keeping the existing ones
    pub fn extended(mut self, extra: impl IntoIterator<Item = String>) -> Self {
        self.patterns
            .extend(extra.into_iter().filter(|p| !p.is_empty()));
        self
    }

    pub fn patterns(&self) -> &[String] {
        &self.patterns
    }

    /// Decide whether `path`, which must live under `base`, is left out
    pub fn should_exclude(&self, path: &Path, base: &Path) -> Result<bool, ExportError> {
        let relative = path
            .strip_prefix(base)
            .map_err(|_| ExportError::InvalidArgument {
                reason: format!(
                    "'{}' is not inside '{}'",
                    path.display(),
                    base.display()
                ),
            })?;

        Ok(self.matches_relative(relative))
    }

    /// Pattern check on a path already relative to the export root
    pub fn matches_relative(&self, relative: &Path) -> bool {
        let relative_str = slash_joined(relative);
        let name = relative
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_default();

        self.patterns.iter().any(|pattern| match pattern.strip_prefix('*') {
            Some(suffix) => name.ends_with(suffix),
            None => relative_str.starts_with(pattern.as_str()) || name == pattern.as_str(),
        })
    }

    /// Equivalent rsync `--exclude` arguments
    ///
    /// `*suffix` and bare names become unanchored rsync patterns (rsync
    /// matches those against every path component's name). The prefix rule
    /// becomes an anchored `/<pattern>*`, which catches every entry whose
    /// relative path starts with the pattern at the depth where the pattern
    /// ends; anything deeper lives inside an entry that is already excluded.
    pub fn rsync_exclude_args(&self) -> Vec<String> {
        let mut args = Vec::new();

        for pattern in &self.patterns {
            match pattern.strip_prefix('*') {
                Some(suffix) => {
                    if !suffix.contains('/') {
                        args.push(format!("--exclude=*{}", escape_rsync(suffix)));
                    }
                }
                None => {
                    if !pattern.contains('/') {
                        args.push(format!("--exclude={}", escape_rsync(pattern)));
                    }
                    args.push(format!("--exclude=/{}*", escape_rsync(pattern)));
                }
            }
        }

        args
    }
}

/// Relative path rendered with `/` separators on every platform
fn slash_joined(relative: &Path) -> String {
    relative
        .components()
        .filter_map(|component| match component {
            Component::Normal(part) => Some(part.to_string_lossy()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}

/// Escape rsync wildcard characters so the pattern matches literally
fn escape_rsync(pattern: &str) -> String {
    let mut escaped = String::with_capacity(pattern.len());
    for ch in pattern.chars() {
        if matches!(ch, '*' | '?' | '[' | ']' | '\\') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}

#[cfg(test)]
mod tests {
    include!("filter.test.rs");
}
