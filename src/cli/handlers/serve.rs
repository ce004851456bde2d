//! Serve command handler
//!
//! Handles the serve command including dry-run validation and server startup.

use crate::config::Settings;
use crate::error::AppResult;
use crate::server::Server;
use crate::state::AppState;

/// Handler for the serve command
pub struct ServeCommandHandler {
    config: Settings,
}

impl ServeCommandHandler {
    /// Create a new serve command handler
    pub fn new(config: Settings) -> Self {
        Self { config }
    }

    /// Run the server, or with `dry_run` only check that it could start
    ///
    /// # Errors
    /// - Configuration validation errors
    /// - Client construction errors
    /// - Server startup errors (if not dry-run)
    pub async fn execute(self, dry_run: bool) -> anyhow::Result<()> {
        if dry_run {
            self.validate_only()?;
            return Ok(());
        }

        Server::new(self.config).run().await
    }

    /// Validate configuration and build every client without binding
    pub fn validate_only(&self) -> AppResult<()> {
        self.config.validate()?;
        println!("✓ Configuration is valid");

        let address = self.config.server.address();
        AppState::from_settings(self.config.clone())?;
        println!("✓ HTTP and API clients built");
        println!(
            "✓ Message mode: {} ({})",
            self.config.notifier.mode.as_str(),
            self.config.notifier.app_name
        );
        println!("✓ Server would bind to: {}", address);

        println!("Dry run completed successfully - configuration is ready for deployment");
        Ok(())
    }

    /// Get the configuration
    pub fn config(&self) -> &Settings {
        &self.config
    }
}
