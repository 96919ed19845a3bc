// ============================================================================
// COLOR INTENT
// ============================================================================

/// Runtime color detection intent
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum ColorIntent {
    /// Let the terminal decide
    /// alias: auto, automatic, detect, default
    #[value(alias = "automatic", alias = "detect", alias = "default")]
    Auto,

    /// Explicitly enable (useful in non-interactive)
    /// alias: always, force, on
    #[value(alias = "force", alias = "on")]
    Always,

    /// Explicitly disable (also useful in non-interactive)
    /// alias: never, off
    #[value(alias = "off")]
    Never,
}

impl ColorIntent {
    /// Collapse the intent into a concrete on/off decision
    pub fn resolve(self, stream_is_tty: bool) -> bool {
        match self {
            ColorIntent::Auto => stream_is_tty,
            ColorIntent::Always => true,
            ColorIntent::Never => false,
        }
    }
}
