//! Check-config command handler

use crate::config::{ConfigLoader, Settings};

/// Prints where the configuration came from and the effective settings
pub struct CheckConfigCommandHandler {
    config: Settings,
    source: String,
}

impl CheckConfigCommandHandler {
    pub fn new(config: Settings, loader: &ConfigLoader) -> Self {
        Self {
            config,
            source: loader.source_description(),
        }
    }

    /// Report text; secrets are redacted by the settings' `Debug` impls
    pub fn report(&self) -> String {
        format!(
            "✓ Configuration is valid\nSource: {}\n{:#?}",
            self.source, self.config
        )
    }

    pub fn execute(&self) {
        println!("{}", self.report());
    }
}
