//! Application state for Axum web framework.
//!
//! Contains the settings and the notification handler shared by all
//! request handlers.

use std::sync::Arc;

use crate::config::Settings;
use crate::error::AppResult;
use crate::external::{IpApiClient, UserAgentApiClient, build_http_client};
use crate::services::NotificationHandler;
use crate::services::notifications::{MessageComposer, TwilioProvider};

/// Application state shared with every handler.
///
/// Cloning is cheap; both fields are behind `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// Settings loaded at startup, read-only
    pub settings: Arc<Settings>,
    /// Notification flow wired to the production integrations
    pub notifier: Arc<NotificationHandler>,
}

impl AppState {
    pub fn new(settings: Arc<Settings>, notifier: Arc<NotificationHandler>) -> Self {
        Self { settings, notifier }
    }

    /// Builds the HTTP client and the three API clients from settings.
    ///
    /// # Example
    /// ```ignore
    /// let settings = ConfigLoader::new()?.load()?;
    /// let state = AppState::from_settings(settings)?;
    /// ```
    pub fn from_settings(settings: Settings) -> AppResult<Self> {
        let http = build_http_client(&settings.http_client)?;

        let user_agents = UserAgentApiClient::new(http.clone(), &settings.useragent)?;
        let geo = IpApiClient::new(http.clone(), &settings.geo)?;
        let composer = MessageComposer::new(
            settings.notifier.clone(),
            Arc::new(user_agents),
            Arc::new(geo),
        );
        let sender = TwilioProvider::new(http, settings.twilio.clone())?;

        let notifier = NotificationHandler::new(composer, Arc::new(sender));
        Ok(Self::new(Arc::new(settings), Arc::new(notifier)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{TwilioSettings, UserAgentApiSettings};
    use crate::error::AppError;

    #[test]
    fn test_from_settings_wires_clients() {
        let settings = Settings {
            twilio: TwilioSettings {
                sid: "AC1".to_string(),
                auth_token: "t".to_string(),
                to_number: "+15550001111".to_string(),
                from_number: "+15550002222".to_string(),
                ..TwilioSettings::default()
            },
            useragent: UserAgentApiSettings {
                api_key: "k".to_string(),
                ..UserAgentApiSettings::default()
            },
            ..Settings::default()
        };

        let state = AppState::from_settings(settings).unwrap();
        assert_eq!(state.settings.twilio.sid, "AC1");
    }

    #[test]
    fn test_from_settings_rejects_bad_url() {
        let mut settings = Settings::default();
        settings.geo.base_url = "::not-a-url".to_string();
        let result = AppState::from_settings(settings);
        assert!(matches!(result, Err(AppError::Configuration { ref key, .. }) if key == "geo.base_url"));
    }
}
