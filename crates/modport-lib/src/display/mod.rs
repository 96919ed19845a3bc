//! Terminal display system
//!
//! User-facing status output, kept separate from logging: tracing records
//! what happened, the display tells the person at the terminal.

pub mod status;
pub mod styling;

pub use status::{CapturedOutput, StatusDisplay};
pub use styling::StyleManager;
