//! CLI argument parsing with clap
//!
//! This module defines the command-line interface structure using clap,
//! including all commands, arguments, and their documentation.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// Sends an SMS when your site is visited
#[derive(Parser, Debug)]
#[command(name = "visit-notifier")]
#[command(about = "Sends an SMS when your site is visited")]
#[command(long_about = "
visit-notifier runs a small HTTP service. Point a page's beacon at POST /notify
and every visit sends an SMS through Twilio, either with the posted `message`
field or with a summary of the visitor's browser and location.

EXAMPLES:
    # Start the server with the layered configuration in ./config
    visit-notifier serve

    # Bind to all interfaces on port 8080
    visit-notifier serve --host 0.0.0.0 --port 8080

    # Use a single configuration file
    visit-notifier --config /etc/visit-notifier/notifier.toml serve

    # Build every client and exit without binding
    visit-notifier serve --dry-run

    # Print the effective configuration with secrets redacted
    visit-notifier --env production check-config

Any setting can be overridden with NOTIFIER_<SECTION>__<KEY>, for example
NOTIFIER_TWILIO__AUTH_TOKEN.
")]
#[command(version = crate::clap_long_version())]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Configuration file path
    ///
    /// Load this TOML file instead of the layered files in the configuration
    /// directory. NOTIFIER_* environment variables still apply on top.
    ///
    /// Example: --config /etc/visit-notifier/notifier.toml
    #[arg(short, long, value_name = "FILE", value_parser = super::validation::validate_config_file_path)]
    pub config: Option<PathBuf>,

    /// Override environment detection
    ///
    /// Selects which `{environment}.toml` layer is loaded, overriding
    /// NOTIFIER_APP_ENV.
    #[arg(short, long, value_enum)]
    pub env: Option<Environment>,

    /// Enable verbose logging
    ///
    /// Raises the log level to debug. Cannot be used with --quiet.
    #[arg(short, long)]
    pub verbose: bool,

    /// Suppress non-error output
    ///
    /// Lowers the log level to error. Cannot be used with --verbose.
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the web server (default)
    ///
    /// Examples:
    ///   visit-notifier serve                           # Start with defaults
    ///   visit-notifier serve --host 0.0.0.0 --port 80  # Bind to all interfaces on port 80
    ///   visit-notifier serve --dry-run                 # Validate and build clients only
    Serve {
        /// Host address to bind to
        ///
        /// Use 127.0.0.1 for localhost only, or 0.0.0.0 to accept connections
        /// from any interface.
        ///
        /// Default: 127.0.0.1
        #[arg(long, value_name = "ADDRESS", value_parser = super::validation::validate_host_address)]
        host: Option<String>,

        /// Port number to listen on
        ///
        /// Default: 3000
        #[arg(short, long, value_name = "PORT", value_parser = super::validation::validate_port)]
        port: Option<u16>,

        /// Log level override
        ///
        /// Overrides both the configuration file and the global --verbose/--quiet flags.
        #[arg(long, value_enum)]
        log_level: Option<LogLevel>,

        /// Validate configuration, build the API clients and exit
        ///
        /// Returns exit code 0 if the server could start, non-zero otherwise.
        #[arg(long)]
        dry_run: bool,
    },
    /// Load and validate the configuration, then print it with secrets redacted
    CheckConfig,
}

/// Environment options
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Environment {
    #[value(name = "development", alias = "dev")]
    Development,
    #[value(name = "test")]
    Test,
    #[value(name = "staging", alias = "stage")]
    Staging,
    #[value(name = "production", alias = "prod")]
    Production,
}

/// Log level options
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogLevel {
    #[value(name = "error")]
    Error,
    #[value(name = "warn", alias = "warning")]
    Warn,
    #[value(name = "info")]
    Info,
    #[value(name = "debug")]
    Debug,
    #[value(name = "trace")]
    Trace,
}

impl Cli {
    /// Checks argument combinations clap cannot express
    pub fn validate(&self) -> Result<(), String> {
        if self.verbose && self.quiet {
            return Err("Cannot use --verbose and --quiet together".to_string());
        }
        Ok(())
    }

    /// Whether the selected command is `serve --dry-run`
    pub fn is_dry_run(&self) -> bool {
        matches!(self.command, Some(Commands::Serve { dry_run: true, .. }))
    }
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

impl From<Environment> for crate::config::Environment {
    fn from(env: Environment) -> Self {
        match env {
            Environment::Development => crate::config::Environment::Development,
            Environment::Test => crate::config::Environment::Test,
            Environment::Staging => crate::config::Environment::Staging,
            Environment::Production => crate::config::Environment::Production,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_version_flag() {
        let err = Cli::try_parse_from(["visit-notifier", "--version"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayVersion);
    }

    #[test]
    fn test_default_behavior() {
        let cli = Cli::try_parse_from(["visit-notifier"]).unwrap();
        assert!(cli.command.is_none());
        assert!(!cli.verbose);
        assert!(!cli.quiet);
        assert!(cli.config.is_none());
        assert!(!cli.is_dry_run());
    }

    #[test]
    fn test_serve_arguments() {
        let cli = Cli::try_parse_from([
            "visit-notifier",
            "serve",
            "--host",
            "0.0.0.0",
            "--port",
            "8080",
            "--log-level",
            "warning",
            "--dry-run",
        ])
        .unwrap();

        match cli.command {
            Some(Commands::Serve {
                ref host,
                port,
                log_level,
                dry_run,
            }) => {
                assert_eq!(host.as_deref(), Some("0.0.0.0"));
                assert_eq!(port, Some(8080));
                assert_eq!(log_level, Some(LogLevel::Warn));
                assert!(dry_run);
            }
            ref other => panic!("Expected serve, got {:?}", other),
        }
        assert!(cli.is_dry_run());
    }

    #[test]
    fn test_check_config_with_env_alias() {
        let cli = Cli::try_parse_from(["visit-notifier", "--env", "prod", "check-config"]).unwrap();
        assert!(matches!(cli.command, Some(Commands::CheckConfig)));
        assert_eq!(cli.env, Some(Environment::Production));
        assert_eq!(
            crate::config::Environment::from(Environment::Production),
            crate::config::Environment::Production
        );
    }

    #[test]
    fn test_verbose_and_quiet_conflict() {
        assert!(Cli::try_parse_from(["visit-notifier", "--verbose", "--quiet"]).is_err());
    }

    #[test]
    fn test_invalid_port_rejected() {
        assert!(Cli::try_parse_from(["visit-notifier", "serve", "--port", "0"]).is_err());
    }
}
