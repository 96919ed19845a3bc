//! Semantic styling on top of the `console` crate
//!
//! Colors are only emitted when the resolved color intent allows them.

use console::Style;

const CHECKMARK: &str = "✓";
const CROSS: &str = "✗";
const WARNING_SYMBOL: &str = "!";
const INFO_SYMBOL: &str = "·";
const ARROW: &str = "→";
const BULLET: &str = "•";

/// Style manager holding one `console::Style` per semantic intent
#[derive(Debug, Clone)]
pub struct StyleManager {
    success: Style,
    error: Style,
    warning: Style,
    info: Style,
    bold: Style,
    muted: Style,
}

impl StyleManager {
    pub fn new(color: bool) -> Self {
        let base = || Style::new().force_styling(color);
        Self {
            success: base().green(),
            error: base().red(),
            warning: base().yellow(),
            info: base().cyan(),
            bold: base().bold(),
            muted: base().dim(),
        }
    }

    /// Style text with semantic success intent
    pub fn style_success(&self, text: &str) -> String {
        self.success.apply_to(text).to_string()
    }

    /// Style text with semantic error intent
    pub fn style_error(&self, text: &str) -> String {
        self.error.apply_to(text).to_string()
    }

    /// Style text with semantic warning intent
    pub fn style_warning(&self, text: &str) -> String {
        self.warning.apply_to(text).to_string()
    }

    /// Style text with semantic info intent
    pub fn style_info(&self, text: &str) -> String {
        self.info.apply_to(text).to_string()
    }

    /// Style text with emphasis (bold)
    pub fn style_emphasis(&self, text: &str) -> String {
        self.bold.apply_to(text).to_string()
    }

    /// Style text as subtle/muted
    pub fn style_subtle(&self, text: &str) -> String {
        self.muted.apply_to(text).to_string()
    }

    /// Format success message with symbol and styling
    pub fn format_success(&self, message: &str) -> String {
        format!("{} {}", self.style_success(CHECKMARK), message)
    }

    /// Format error message with symbol and styling
    pub fn format_error(&self, message: &str) -> String {
        format!("{} {}", self.style_error(CROSS), message)
    }

    /// Format warning message with symbol and styling
    pub fn format_warning(&self, message: &str) -> String {
        format!("{} {}", self.style_warning(WARNING_SYMBOL), message)
    }

    /// Format info message with symbol and styling
    pub fn format_info(&self, message: &str) -> String {
        format!("{} {}", self.style_info(INFO_SYMBOL), message)
    }

    /// Format working/progress message (using info color with arrow)
    pub fn format_working(&self, message: &str) -> String {
        format!("{} {}", self.style_info(ARROW), message)
    }

    pub fn bullet(&self) -> &'static str {
        BULLET
    }
}
