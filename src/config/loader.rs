//! Settings loading from TOML layers and `NOTIFIER_*` environment variables.

use std::path::{Path, PathBuf};

use config::builder::{ConfigBuilder, DefaultState};
use config::{Config, Environment, File, FileFormat};

use crate::config::environment::Environment as AppEnvironment;
use crate::config::error::ConfigError;
use crate::config::settings::Settings;

const CONFIG_DIR_ENV: &str = "NOTIFIER_CONFIG_DIR";
const CONFIG_FILE_ENV: &str = "NOTIFIER_CONFIG_FILE";
const DEFAULT_CONFIG_DIR: &str = "config";

type Builder = ConfigBuilder<DefaultState>;

/// Where the TOML part of the settings comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// `default.toml` (required), then `{environment}.toml` and `local.toml`
    Directory(PathBuf),
    /// One file, no layering
    File(PathBuf),
}

/// Loads [`Settings`] and validates them.
///
/// Environment variables are applied last in every mode, with `__` between
/// section and key: `NOTIFIER_TWILIO__AUTH_TOKEN` sets `twilio.auth_token`.
#[derive(Debug)]
pub struct ConfigLoader {
    source: ConfigSource,
    environment: AppEnvironment,
}

impl ConfigLoader {
    /// Picks the source from `NOTIFIER_CONFIG_FILE` or `NOTIFIER_CONFIG_DIR`
    /// (setting both is an error) and the layer from `NOTIFIER_APP_ENV`.
    pub fn new() -> Result<Self, ConfigError> {
        let dir = std::env::var(CONFIG_DIR_ENV).ok();
        let file = std::env::var(CONFIG_FILE_ENV).ok();

        let source = match (dir, file) {
            (Some(_), Some(_)) => {
                return Err(ConfigError::mutual_exclusivity(format!(
                    "{CONFIG_DIR_ENV} and {CONFIG_FILE_ENV} cannot both be set"
                )));
            }
            (_, Some(file)) => ConfigSource::File(file.into()),
            (dir, None) => {
                ConfigSource::Directory(dir.unwrap_or_else(|| DEFAULT_CONFIG_DIR.to_string()).into())
            }
        };

        Ok(Self {
            source,
            environment: AppEnvironment::from_env(),
        })
    }

    /// Single-file loader for a path given on the command line
    pub fn from_file<P: Into<PathBuf>>(path: P) -> Self {
        Self {
            source: ConfigSource::File(path.into()),
            environment: AppEnvironment::from_env(),
        }
    }

    pub fn with_environment(mut self, environment: AppEnvironment) -> Self {
        self.environment = environment;
        self
    }

    pub fn environment(&self) -> AppEnvironment {
        self.environment
    }

    pub fn source(&self) -> &ConfigSource {
        &self.source
    }

    /// Human-readable source, for startup logs and `check-config`
    pub fn source_description(&self) -> String {
        match &self.source {
            ConfigSource::File(file) => format!("file {}", file.display()),
            ConfigSource::Directory(dir) => {
                format!("directory {} ({} layer)", dir.display(), self.environment)
            }
        }
    }

    /// Reads every source, deserializes and validates.
    ///
    /// # Errors
    ///
    /// `FileNotFound` when the required file is absent, `ParseError` when the
    /// merged values do not fit [`Settings`], and any validation error.
    pub fn load(&self) -> Result<Settings, ConfigError> {
        let settings: Settings = self.build()?.try_deserialize().map_err(|e| {
            ConfigError::ParseError(format!("Failed to deserialize configuration: {}", e))
        })?;

        settings.validate()?;
        Ok(settings)
    }

    fn build(&self) -> Result<Config, ConfigError> {
        let mut builder = Config::builder();
        for (path, required) in self.files() {
            builder = with_toml(builder, &path, required)?;
        }

        builder
            .add_source(
                Environment::with_prefix("NOTIFIER")
                    .prefix_separator("_")
                    .separator("__")
                    .ignore_empty(true)
                    // Phone numbers such as "+15551234567" must stay strings;
                    // numbers and booleans still convert when deserializing.
                    .try_parsing(false),
            )
            .build()
            .map_err(ConfigError::from)
    }

    /// TOML files in merge order, each with whether it must exist
    fn files(&self) -> Vec<(PathBuf, bool)> {
        match &self.source {
            ConfigSource::File(file) => vec![(file.clone(), true)],
            ConfigSource::Directory(dir) => vec![
                (dir.join("default.toml"), true),
                (dir.join(format!("{}.toml", self.environment.as_str())), false),
                (dir.join("local.toml"), false),
            ],
        }
    }
}

fn with_toml(builder: Builder, path: &Path, required: bool) -> Result<Builder, ConfigError> {
    if required && !path.exists() {
        return Err(ConfigError::file_not_found(format!(
            "Required configuration file not found: {}",
            path.display()
        )));
    }

    Ok(builder.add_source(File::from(path).format(FileFormat::Toml).required(required)))
}
