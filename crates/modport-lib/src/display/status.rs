//! Status display for user feedback
//!
//! Provides semantic status updates that replace raw println! usage
//! with color-aware formatting.

use super::styling::StyleManager;
use std::io::{self, Write};
use std::sync::{Arc, Mutex};

/// Where status lines end up
#[derive(Debug, Clone)]
enum Sink {
    Stdout,
    Buffer(Arc<Mutex<Vec<u8>>>),
}

/// Status display manager for semantic user feedback
#[derive(Debug, Clone)]
pub struct StatusDisplay {
    styling: StyleManager,
    sink: Sink,
}

impl StatusDisplay {
    pub fn new(color: bool) -> Self {
        Self {
            styling: StyleManager::new(color),
            sink: Sink::Stdout,
        }
    }

    /// Uncolored display that records every line in memory
    pub fn capturing() -> (Self, CapturedOutput) {
        let buffer = Arc::new(Mutex::new(Vec::new()));
        let display = Self {
            styling: StyleManager::new(false),
            sink: Sink::Buffer(Arc::clone(&buffer)),
        };
        (display, CapturedOutput { buffer })
    }

    fn line(&self, text: &str) {
        match &self.sink {
            Sink::Stdout => {
                let mut stdout = io::stdout().lock();
                writeln!(stdout, "{}", text).ok();
                stdout.flush().ok();
            }
            Sink::Buffer(buffer) => {
                if let Ok(mut buffer) = buffer.lock() {
                    writeln!(buffer, "{}", text).ok();
                }
            }
        }
    }

    /// Display a working status
    ///
    /// Example: `status.working("Copying mod files")`
    /// Output: `→ Copying mod files...`
    pub fn working(&self, task: &str) {
        let message = format!("{}...", task);
        self.line(&self.styling.format_working(&message));
    }

    /// Display a success status with optional details
    ///
    /// Example: `status.success("Archive created", "/mods/../Mod_1.1.0002.zip")`
    /// Output: `✓ Archive created: /mods/../Mod_1.1.0002.zip`
    pub fn success(&self, item: &str, details: &str) {
        self.line(&self.styling.format_success(&join_details(item, details)));
    }

    /// Display an error status with details
    ///
    /// Example: `status.error("rsync", "not found")`
    /// Output: `✗ rsync: not found`
    pub fn error(&self, item: &str, details: &str) {
        self.line(&self.styling.format_error(&join_details(item, details)));
    }

    /// Display a warning status
    pub fn warning(&self, message: &str) {
        self.line(&self.styling.format_warning(message));
    }

    /// Display an info status
    pub fn info(&self, message: &str) {
        self.line(&self.styling.format_info(message));
    }

    /// Display a simple message without status symbols
    pub fn message(&self, text: &str) {
        self.line(text);
    }

    /// Display a subtle/secondary message
    pub fn subtle(&self, text: &str) {
        self.line(&self.styling.style_subtle(text));
    }

    /// Display a list of items with bullets
    pub fn list(&self, items: &[String]) {
        for item in items {
            self.line(&format!("  {} {}", self.styling.bullet(), item));
        }
    }

    /// Check and report tool availability
    pub fn tool_check(&self, tool: &str, available: bool, details: &str) {
        if available {
            self.success(tool, details);
        } else {
            self.error(tool, "not found");
        }
    }

    /// Display a header for a section of work
    pub fn section(&self, title: &str) {
        self.line("");
        self.line(&self.styling.style_emphasis(title));
    }
}

fn join_details(item: &str, details: &str) -> String {
    if details.is_empty() {
        item.to_string()
    } else {
        format!("{}: {}", item, details)
    }
}

/// Read handle for a capturing display
#[derive(Debug, Clone)]
pub struct CapturedOutput {
    buffer: Arc<Mutex<Vec<u8>>>,
}

impl CapturedOutput {
    pub fn contents(&self) -> String {
        self.buffer
            .lock()
            .map(|buffer| String::from_utf8_lossy(&buffer).into_owned())
            .unwrap_or_default()
    }

    pub fn lines(&self) -> Vec<String> {
        self.contents().lines().map(str::to_string).collect()
    }
}

#[cfg(test)]
mod tests {
    include!("status.test.rs");
}
