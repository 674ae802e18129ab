//! Embed configuration

use serde::{Deserialize, Serialize};

/// Configuration for the embed surface.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct EmbedConfig {
    /// Name the embed directive is registered under
    pub directive: String,
    /// Theme applied when the directive does not name one
    pub default_theme: String,
}

impl Default for EmbedConfig {
    fn default() -> Self {
        Self {
            directive: "gravityform_global".to_string(),
            default_theme: "gravity-theme".to_string(),
        }
    }
}

impl EmbedConfig {
    /// Default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the directive name
    pub fn with_directive(mut self, name: &str) -> Self {
        self.directive = name.to_string();
        self
    }

    /// Override the default theme
    pub fn with_default_theme(mut self, theme: &str) -> Self {
        self.default_theme = theme.to_string();
        self
    }
}
