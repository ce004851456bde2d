//! Configuration settings structures for visit-notifier
//!
//! This module defines all configuration structures that can be loaded from
//! TOML files and environment variables.

use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::config::error::ConfigError;
use crate::logger::{ConsoleConfig, FileConfig, LogFormat, LoggerConfig};

// ============================================================================
// Default value functions
// ============================================================================

fn default_app_name() -> String {
    "visit-notifier".to_string()
}

fn default_app_version() -> String {
    crate::pkg_version().to_string()
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_true() -> bool {
    true
}

fn default_log_path() -> String {
    "logs/visit-notifier.log".to_string()
}

fn default_log_format() -> String {
    "json".to_string()
}

fn default_http_timeout() -> u64 {
    30
}

fn default_http_connect_timeout() -> u64 {
    10
}

fn default_http_user_agent() -> String {
    format!("visit-notifier/{}", crate::pkg_version())
}

fn default_notifier_app_name() -> String {
    "WordMaker".to_string()
}

fn default_twilio_api_base() -> String {
    "https://api.twilio.com".to_string()
}

fn default_useragent_base() -> String {
    "https://useragentapi.com".to_string()
}

fn default_geo_base() -> String {
    "http://ip-api.com".to_string()
}

// ============================================================================
// Application Configuration
// ============================================================================

/// Application basic information configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicationConfig {
    /// Application name
    #[serde(default = "default_app_name")]
    pub name: String,

    /// Application version
    #[serde(default = "default_app_version")]
    pub version: String,
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            name: default_app_name(),
            version: default_app_version(),
        }
    }
}

// ============================================================================
// Server Configuration
// ============================================================================

/// Axum HTTP server configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Take the visitor address from `X-Forwarded-For` instead of the peer
    /// address. Only enable this behind a reverse proxy that sets the header.
    #[serde(default)]
    pub trust_forwarded_for: bool,
}

impl ServerConfig {
    /// Get the full server address as "host:port"
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            trust_forwarded_for: false,
        }
    }
}

// ============================================================================
// Outbound HTTP Client Configuration
// ============================================================================

/// Settings for the shared `reqwest` client used by every integration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HttpClientConfig {
    /// Whole-request timeout in seconds
    #[serde(default = "default_http_timeout")]
    pub timeout_seconds: u64,

    /// TCP connect timeout in seconds
    #[serde(default = "default_http_connect_timeout")]
    pub connect_timeout_seconds: u64,

    /// User-Agent header sent on outbound requests
    #[serde(default = "default_http_user_agent")]
    pub user_agent: String,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: default_http_timeout(),
            connect_timeout_seconds: default_http_connect_timeout(),
            user_agent: default_http_user_agent(),
        }
    }
}

// ============================================================================
// Notifier Configuration
// ============================================================================

/// How the default message is built when the visitor posts no `message`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageMode {
    /// Compose a summary from the user-agent and geolocation lookups
    #[default]
    VisitSummary,
    /// Send a fixed notice without any lookups
    Fixed,
}

impl MessageMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            MessageMode::VisitSummary => "visit_summary",
            MessageMode::Fixed => "fixed",
        }
    }

    /// Whether this mode needs the user-agent and geolocation services
    pub fn needs_lookups(&self) -> bool {
        matches!(self, MessageMode::VisitSummary)
    }
}

/// Notification content settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotifierConfig {
    /// Default message strategy
    #[serde(default)]
    pub mode: MessageMode,

    /// Name of the site reported in notifications
    #[serde(default = "default_notifier_app_name")]
    pub app_name: String,

    /// Text sent in `fixed` mode; defaults to "<app_name> has been visited"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fixed_message: Option<String>,
}

impl NotifierConfig {
    /// The notice sent in `fixed` mode
    pub fn fixed_text(&self) -> String {
        self.fixed_message
            .clone()
            .unwrap_or_else(|| format!("{} has been visited", self.app_name))
    }
}

impl Default for NotifierConfig {
    fn default() -> Self {
        Self {
            mode: MessageMode::default(),
            app_name: default_notifier_app_name(),
            fixed_message: None,
        }
    }
}

// ============================================================================
// Integration Credentials
// ============================================================================

/// Twilio account credentials and phone numbers
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TwilioSettings {
    /// Account SID
    #[serde(default)]
    pub sid: String,

    /// Auth token paired with the account SID
    #[serde(default)]
    pub auth_token: String,

    /// Number the notification is delivered to
    #[serde(default)]
    pub to_number: String,

    /// Twilio number the notification is sent from
    #[serde(default)]
    pub from_number: String,

    /// REST API base URL
    #[serde(default = "default_twilio_api_base")]
    pub api_base_url: String,
}

impl Default for TwilioSettings {
    fn default() -> Self {
        Self {
            sid: String::new(),
            auth_token: String::new(),
            to_number: String::new(),
            from_number: String::new(),
            api_base_url: default_twilio_api_base(),
        }
    }
}

impl fmt::Debug for TwilioSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TwilioSettings")
            .field("sid", &self.sid)
            .field("auth_token", &redact(&self.auth_token))
            .field("to_number", &self.to_number)
            .field("from_number", &self.from_number)
            .field("api_base_url", &self.api_base_url)
            .finish()
    }
}

/// useragentapi.com settings
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserAgentApiSettings {
    /// API key embedded in the lookup path
    #[serde(default)]
    pub api_key: String,

    /// API base URL
    #[serde(default = "default_useragent_base")]
    pub base_url: String,
}

impl Default for UserAgentApiSettings {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: default_useragent_base(),
        }
    }
}

impl fmt::Debug for UserAgentApiSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserAgentApiSettings")
            .field("api_key", &redact(&self.api_key))
            .field("base_url", &self.base_url)
            .finish()
    }
}

/// ip-api.com settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeoApiSettings {
    /// API base URL
    #[serde(default = "default_geo_base")]
    pub base_url: String,
}

impl Default for GeoApiSettings {
    fn default() -> Self {
        Self {
            base_url: default_geo_base(),
        }
    }
}

fn redact(secret: &str) -> &'static str {
    if secret.is_empty() { "<unset>" } else { "<redacted>" }
}

// ============================================================================
// Logger Settings (compatible with LoggerConfig)
// ============================================================================

/// Console output settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsoleSettings {
    /// Whether console output is enabled
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Whether to use colored output
    #[serde(default = "default_true")]
    pub colored: bool,
}

impl Default for ConsoleSettings {
    fn default() -> Self {
        Self {
            enabled: default_true(),
            colored: default_true(),
        }
    }
}

/// File output settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileSettings {
    /// Whether file output is enabled
    #[serde(default)]
    pub enabled: bool,

    /// Path to the log file
    #[serde(default = "default_log_path")]
    pub path: String,

    /// Whether to append to existing file
    #[serde(default = "default_true")]
    pub append: bool,

    /// Log format: "full", "compact", or "json"
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for FileSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            path: default_log_path(),
            append: default_true(),
            format: default_log_format(),
        }
    }
}

/// Logger configuration settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggerSettings {
    /// Log level or `EnvFilter` directive, e.g. "info" or "visit_notifier=debug"
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Console output settings
    #[serde(default)]
    pub console: ConsoleSettings,

    /// File output settings
    #[serde(default)]
    pub file: FileSettings,
}

impl Default for LoggerSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            console: ConsoleSettings::default(),
            file: FileSettings::default(),
        }
    }
}

impl LoggerSettings {
    /// Convert LoggerSettings to the runtime LoggerConfig
    pub fn into_logger_config(self) -> Result<LoggerConfig, ConfigError> {
        let console = ConsoleConfig::new(self.console.enabled, self.console.colored);
        let file = self.file.into_file_config()?;

        LoggerConfig::new(console, file, self.level).map_err(|e| ConfigError::ValidationError {
            field: "logger".to_string(),
            message: e.to_string(),
        })
    }
}

impl FileSettings {
    /// Convert FileSettings to FileConfig
    pub fn into_file_config(self) -> Result<FileConfig, ConfigError> {
        let format = self
            .format
            .parse::<LogFormat>()
            .map_err(|e| ConfigError::ValidationError {
                field: "logger.file.format".to_string(),
                message: e.to_string(),
            })?;

        Ok(FileConfig {
            enabled: self.enabled,
            path: PathBuf::from(self.path),
            append: self.append,
            format,
        })
    }
}

// ============================================================================
// Main Settings Structure
// ============================================================================

/// Complete application settings
///
/// Loaded once at startup by [`crate::config::ConfigLoader`] and shared
/// read-only with every component.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Settings {
    #[serde(default)]
    pub application: ApplicationConfig,

    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub logger: LoggerSettings,

    #[serde(default)]
    pub http_client: HttpClientConfig,

    #[serde(default)]
    pub notifier: NotifierConfig,

    #[serde(default)]
    pub twilio: TwilioSettings,

    #[serde(default)]
    pub useragent: UserAgentApiSettings,

    #[serde(default)]
    pub geo: GeoApiSettings,
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn arb_server_config() -> impl Strategy<Value = ServerConfig> {
        (
            prop_oneof![Just("127.0.0.1".to_string()), Just("0.0.0.0".to_string())],
            1u16..=65535u16,
            any::<bool>(),
        )
            .prop_map(|(host, port, trust_forwarded_for)| ServerConfig {
                host,
                port,
                trust_forwarded_for,
            })
    }

    fn arb_notifier_config() -> impl Strategy<Value = NotifierConfig> {
        (
            prop_oneof![Just(MessageMode::VisitSummary), Just(MessageMode::Fixed)],
            "[A-Za-z][A-Za-z ]{0,20}",
            proptest::option::of("[A-Za-z !]{1,40}"),
        )
            .prop_map(|(mode, app_name, fixed_message)| NotifierConfig {
                mode,
                app_name,
                fixed_message,
            })
    }

    fn arb_twilio_settings() -> impl Strategy<Value = TwilioSettings> {
        ("AC[a-f0-9]{32}", "[a-f0-9]{32}", "\\+1[0-9]{10}", "\\+1[0-9]{10}").prop_map(
            |(sid, auth_token, to_number, from_number)| TwilioSettings {
                sid,
                auth_token,
                to_number,
                from_number,
                api_base_url: default_twilio_api_base(),
            },
        )
    }

    fn arb_settings() -> impl Strategy<Value = Settings> {
        (
            arb_server_config(),
            arb_notifier_config(),
            arb_twilio_settings(),
            "[a-z0-9]{8,16}",
            1u64..=120u64,
        )
            .prop_map(|(server, notifier, twilio, api_key, timeout_seconds)| Settings {
                server,
                notifier,
                twilio,
                useragent: UserAgentApiSettings {
                    api_key,
                    ..UserAgentApiSettings::default()
                },
                http_client: HttpClientConfig {
                    timeout_seconds,
                    ..HttpClientConfig::default()
                },
                ..Settings::default()
            })
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        #[test]
        fn prop_settings_toml_round_trip(settings in arb_settings()) {
            let toml_str = toml::to_string(&settings)
                .expect("Settings should serialize to TOML");
            let deserialized: Settings = toml::from_str(&toml_str)
                .expect("TOML should deserialize back to Settings");
            prop_assert_eq!(settings, deserialized);
        }
    }

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.server.address(), "127.0.0.1:3000");
        assert!(!settings.server.trust_forwarded_for);
        assert_eq!(settings.notifier.mode, MessageMode::VisitSummary);
        assert_eq!(settings.notifier.app_name, "WordMaker");
        assert_eq!(settings.twilio.api_base_url, "https://api.twilio.com");
        assert_eq!(settings.useragent.base_url, "https://useragentapi.com");
        assert_eq!(settings.geo.base_url, "http://ip-api.com");
        assert_eq!(settings.http_client.timeout_seconds, 30);
        assert_eq!(settings.http_client.connect_timeout_seconds, 10);
    }

    #[test]
    fn test_deserialize_partial_notifier_section() {
        let settings: Settings = toml::from_str(
            r#"
[notifier]
mode = "fixed"
app_name = "Word Puzzle"

[twilio]
sid = "AC123"
"#,
        )
        .unwrap();

        assert_eq!(settings.notifier.mode, MessageMode::Fixed);
        assert_eq!(settings.notifier.fixed_text(), "Word Puzzle has been visited");
        assert_eq!(settings.twilio.sid, "AC123");
        assert!(settings.twilio.auth_token.is_empty());
        assert_eq!(settings.server.port, 3000);
    }

    #[test]
    fn test_unknown_mode_is_rejected() {
        let result: Result<Settings, _> = toml::from_str("[notifier]\nmode = \"carrier_pigeon\"\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_fixed_text_prefers_explicit_message() {
        let notifier = NotifierConfig {
            mode: MessageMode::Fixed,
            app_name: "Word Puzzle".to_string(),
            fixed_message: Some("Someone is solving puzzles".to_string()),
        };
        assert_eq!(notifier.fixed_text(), "Someone is solving puzzles");
    }

    #[test]
    fn test_debug_output_redacts_secrets() {
        let twilio = TwilioSettings {
            sid: "AC1".to_string(),
            auth_token: "super-secret-token".to_string(),
            ..TwilioSettings::default()
        };
        let rendered = format!("{:?}", twilio);
        assert!(rendered.contains("AC1"));
        assert!(rendered.contains("<redacted>"));
        assert!(!rendered.contains("super-secret-token"));

        let ua = UserAgentApiSettings::default();
        assert!(format!("{:?}", ua).contains("<unset>"));
    }

    #[test]
    fn test_logger_settings_into_logger_config() {
        let settings = LoggerSettings {
            level: "debug".to_string(),
            console: ConsoleSettings {
                enabled: true,
                colored: false,
            },
            file: FileSettings {
                enabled: true,
                path: "logs/test.log".to_string(),
                append: false,
                format: "compact".to_string(),
            },
        };

        let config = settings.into_logger_config().unwrap();
        assert_eq!(config.level, "debug");
        assert!(!config.console.colored);
        assert_eq!(config.file.format, LogFormat::Compact);
        assert_eq!(config.file.path, PathBuf::from("logs/test.log"));
        assert!(!config.file.append);
    }

    #[test]
    fn test_file_settings_invalid_format() {
        let settings = FileSettings {
            format: "xml".to_string(),
            ..FileSettings::default()
        };
        let err = settings.into_file_config().unwrap_err();
        assert!(
            matches!(err, ConfigError::ValidationError { ref field, .. } if field == "logger.file.format")
        );
    }

    #[test]
    fn test_logger_settings_both_outputs_disabled() {
        let settings = LoggerSettings {
            console: ConsoleSettings {
                enabled: false,
                colored: false,
            },
            ..LoggerSettings::default()
        };
        assert!(settings.into_logger_config().is_err());
    }
}
