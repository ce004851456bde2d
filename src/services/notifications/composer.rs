//! Builds the default notification text when the visitor posts no message.

use std::net::IpAddr;
use std::sync::Arc;

use crate::config::{MessageMode, NotifierConfig};
use crate::error::AppResult;
use crate::external::{GeoResolver, UserAgentResolver};

/// Composes the default message according to the configured [`MessageMode`]
pub struct MessageComposer {
    config: NotifierConfig,
    user_agents: Arc<dyn UserAgentResolver>,
    geo: Arc<dyn GeoResolver>,
}

impl MessageComposer {
    pub fn new(
        config: NotifierConfig,
        user_agents: Arc<dyn UserAgentResolver>,
        geo: Arc<dyn GeoResolver>,
    ) -> Self {
        Self {
            config,
            user_agents,
            geo,
        }
    }

    /// The default message for a visit
    ///
    /// In `visit_summary` mode both lookups run concurrently and must finish
    /// before the text is returned. A degraded geolocation leaves the
    /// location line empty; any lookup error aborts composition.
    pub async fn compose_default(&self, user_agent: &str, remote_ip: IpAddr) -> AppResult<String> {
        match self.config.mode {
            MessageMode::Fixed => Ok(self.config.fixed_text()),
            MessageMode::VisitSummary => {
                let (agent, location) = tokio::try_join!(
                    self.user_agents.resolve(user_agent),
                    self.geo.resolve(remote_ip),
                )?;

                let location = location.map(|geo| geo.to_string()).unwrap_or_default();
                Ok(format!(
                    "{} has been visited\nby {}\nin {}",
                    self.config.app_name, agent, location
                ))
            }
        }
    }
}
