//! Configuration validation logic
//!
//! Settings are validated once after loading so a misconfigured deployment
//! refuses to start instead of failing on the first visitor.

use reqwest::Url;

use crate::config::error::ConfigError;
use crate::config::settings::{
    HttpClientConfig, LoggerSettings, NotifierConfig, ServerConfig, Settings, TwilioSettings,
    UserAgentApiSettings,
};

/// Valid log levels
const VALID_LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Valid log formats
const VALID_LOG_FORMATS: &[&str] = &["full", "compact", "json"];

impl ServerConfig {
    /// Validate server configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.host.trim().is_empty() {
            return Err(ConfigError::validation(
                "server.host",
                "Host cannot be empty.",
            ));
        }

        if self.port == 0 {
            return Err(ConfigError::validation(
                "server.port",
                "Port must be between 1 and 65535. Please specify a valid port number.",
            ));
        }

        Ok(())
    }
}

impl LoggerSettings {
    /// Validate logger configuration
    ///
    /// Plain level names are checked against the known set; anything containing
    /// `=` or `,` is treated as an `EnvFilter` directive and left to the filter
    /// parser at startup.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let level = self.level.to_lowercase();
        let is_directive = level.contains('=') || level.contains(',');
        if !is_directive && !VALID_LOG_LEVELS.contains(&level.as_str()) {
            return Err(ConfigError::ValidationError {
                field: "logger.level".to_string(),
                message: format!(
                    "Invalid log level '{}'. Valid levels are: {}",
                    self.level,
                    VALID_LOG_LEVELS.join(", ")
                ),
            });
        }

        if !self.console.enabled && !self.file.enabled {
            return Err(ConfigError::validation(
                "logger",
                "At least one output (console or file) must be enabled.",
            ));
        }

        if self.file.enabled {
            if self.file.path.trim().is_empty() {
                return Err(ConfigError::validation(
                    "logger.file.path",
                    "File path cannot be empty when file output is enabled.",
                ));
            }

            if !VALID_LOG_FORMATS.contains(&self.file.format.to_lowercase().as_str()) {
                return Err(ConfigError::ValidationError {
                    field: "logger.file.format".to_string(),
                    message: format!(
                        "Invalid log format '{}'. Valid formats are: {}",
                        self.file.format,
                        VALID_LOG_FORMATS.join(", ")
                    ),
                });
            }
        }

        Ok(())
    }
}

impl HttpClientConfig {
    /// Validate outbound client configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.timeout_seconds == 0 {
            return Err(ConfigError::validation(
                "http_client.timeout_seconds",
                "Timeout must be greater than 0 seconds.",
            ));
        }

        if self.connect_timeout_seconds == 0 {
            return Err(ConfigError::validation(
                "http_client.connect_timeout_seconds",
                "Connect timeout must be greater than 0 seconds.",
            ));
        }

        Ok(())
    }
}

impl NotifierConfig {
    /// Validate notifier configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.app_name.trim().is_empty() {
            return Err(ConfigError::missing("notifier.app_name"));
        }

        if let Some(message) = &self.fixed_message
            && message.trim().is_empty()
        {
            return Err(ConfigError::validation(
                "notifier.fixed_message",
                "Fixed message cannot be blank. Remove the key to use the default notice.",
            ));
        }

        Ok(())
    }
}

impl TwilioSettings {
    /// Validate Twilio credentials and numbers
    pub fn validate(&self) -> Result<(), ConfigError> {
        require("twilio.sid", &self.sid)?;
        require("twilio.auth_token", &self.auth_token)?;
        require("twilio.to_number", &self.to_number)?;
        require("twilio.from_number", &self.from_number)?;
        validate_base_url("twilio.api_base_url", &self.api_base_url)
    }
}

impl UserAgentApiSettings {
    /// Validate user-agent API settings
    pub fn validate(&self) -> Result<(), ConfigError> {
        require("useragent.api_key", &self.api_key)?;
        validate_base_url("useragent.base_url", &self.base_url)
    }
}

impl Settings {
    /// Validate the complete settings structure
    ///
    /// The user-agent API key and the geolocation endpoint are only checked
    /// when the configured message mode performs lookups.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.server.validate()?;
        self.logger.validate()?;
        self.http_client.validate()?;
        self.notifier.validate()?;
        self.twilio.validate()?;

        if self.notifier.mode.needs_lookups() {
            self.useragent.validate()?;
            validate_base_url("geo.base_url", &self.geo.base_url)?;
        }

        Ok(())
    }
}

fn require(key: &str, value: &str) -> Result<(), ConfigError> {
    if value.trim().is_empty() {
        return Err(ConfigError::missing(key));
    }
    Ok(())
}

fn validate_base_url(field: &str, value: &str) -> Result<(), ConfigError> {
    let url = Url::parse(value).map_err(|e| ConfigError::ValidationError {
        field: field.to_string(),
        message: format!("Invalid URL '{}': {}", value, e),
    })?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::ValidationError {
            field: field.to_string(),
            message: format!("URL must use http or https, got '{}'", url.scheme()),
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::settings::{FileSettings, GeoApiSettings, MessageMode};

    fn valid_settings() -> Settings {
        Settings {
            twilio: TwilioSettings {
                sid: "AC0123".to_string(),
                auth_token: "token".to_string(),
                to_number: "+15550001111".to_string(),
                from_number: "+15550002222".to_string(),
                ..TwilioSettings::default()
            },
            useragent: UserAgentApiSettings {
                api_key: "ua-key".to_string(),
                ..UserAgentApiSettings::default()
            },
            ..Settings::default()
        }
    }

    fn missing_key(result: Result<(), ConfigError>) -> String {
        match result {
            Err(ConfigError::MissingKey(key)) => key,
            other => panic!("Expected MissingKey, got {:?}", other),
        }
    }

    #[test]
    fn test_valid_settings_pass() {
        assert!(valid_settings().validate().is_ok());
    }

    #[test]
    fn test_each_twilio_key_is_required() {
        let mut settings = valid_settings();
        settings.twilio.sid.clear();
        assert_eq!(missing_key(settings.validate()), "twilio.sid");

        let mut settings = valid_settings();
        settings.twilio.auth_token = "   ".to_string();
        assert_eq!(missing_key(settings.validate()), "twilio.auth_token");

        let mut settings = valid_settings();
        settings.twilio.to_number.clear();
        assert_eq!(missing_key(settings.validate()), "twilio.to_number");

        let mut settings = valid_settings();
        settings.twilio.from_number.clear();
        assert_eq!(missing_key(settings.validate()), "twilio.from_number");
    }

    #[test]
    fn test_api_key_required_only_for_visit_summary() {
        let mut settings = valid_settings();
        settings.useragent.api_key.clear();
        assert_eq!(missing_key(settings.validate()), "useragent.api_key");

        settings.notifier.mode = MessageMode::Fixed;
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_invalid_base_url() {
        let mut settings = valid_settings();
        settings.geo = GeoApiSettings {
            base_url: "ftp://ip-api.com".to_string(),
        };
        let err = settings.validate().unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError { ref field, .. } if field == "geo.base_url"));

        let mut settings = valid_settings();
        settings.twilio.api_base_url = "not a url".to_string();
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_server_port_zero() {
        let mut settings = valid_settings();
        settings.server.port = 0;
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_logger_level_and_directives() {
        let mut logger = LoggerSettings::default();
        logger.level = "verbose".to_string();
        assert!(logger.validate().is_err());

        logger.level = "visit_notifier=debug,reqwest=warn".to_string();
        assert!(logger.validate().is_ok());

        logger.level = "WARN".to_string();
        assert!(logger.validate().is_ok());
    }

    #[test]
    fn test_logger_file_checks() {
        let logger = LoggerSettings {
            file: FileSettings {
                enabled: true,
                path: String::new(),
                ..FileSettings::default()
            },
            ..LoggerSettings::default()
        };
        assert!(logger.validate().is_err());
    }

    #[test]
    fn test_blank_fixed_message_rejected() {
        let mut settings = valid_settings();
        settings.notifier.fixed_message = Some("  ".to_string());
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_zero_timeouts_rejected() {
        let mut settings = valid_settings();
        settings.http_client.timeout_seconds = 0;
        assert!(settings.validate().is_err());
    }
}
