//! Twilio SMS provider implementation.
//!
//! Creates a message through the Twilio REST API:
//! `POST {base}/2010-04-01/Accounts/{sid}/Messages.json` with HTTP basic auth
//! and the form fields `To`, `From` and `Body`.

use std::time::Instant;

use async_trait::async_trait;
use reqwest::Url;
use serde::Deserialize;

use super::provider::{NotificationMessage, SmsReceipt, SmsSender};
use crate::config::TwilioSettings;
use crate::error::{AppError, AppResult};
use crate::external::client::decode_json;

const SERVICE: &str = "twilio";

/// Subset of the Twilio message resource we read back
#[derive(Debug, Deserialize)]
struct MessageResource {
    sid: String,
    #[serde(default)]
    status: Option<String>,
}

/// Twilio SMS provider
///
/// Holds the account credentials and both phone numbers; every message goes
/// from `from_number` to `to_number`.
pub struct TwilioProvider {
    http: reqwest::Client,
    settings: TwilioSettings,
    messages_url: Url,
}

impl TwilioProvider {
    /// Creates a provider, resolving the Messages endpoint up front
    pub fn new(http: reqwest::Client, settings: TwilioSettings) -> AppResult<Self> {
        let messages_url = Self::build_messages_url(&settings)?;
        Ok(Self {
            http,
            settings,
            messages_url,
        })
    }

    fn build_messages_url(settings: &TwilioSettings) -> AppResult<Url> {
        let configuration_error = |source: anyhow::Error| AppError::Configuration {
            key: "twilio.api_base_url".to_string(),
            source,
        };

        let mut url = Url::parse(&settings.api_base_url).map_err(|e| configuration_error(e.into()))?;
        url.path_segments_mut()
            .map_err(|_| configuration_error(anyhow::anyhow!("base URL cannot carry a path")))?
            .pop_if_empty()
            .extend([
                "2010-04-01",
                "Accounts",
                settings.sid.as_str(),
                "Messages.json",
            ]);
        Ok(url)
    }
}

#[async_trait]
impl SmsSender for TwilioProvider {
    async fn send(&self, message: &NotificationMessage) -> AppResult<SmsReceipt> {
        let start = Instant::now();

        let response = self
            .http
            .post(self.messages_url.clone())
            .basic_auth(&self.settings.sid, Some(&self.settings.auth_token))
            .form(&[
                ("To", self.settings.to_number.as_str()),
                ("From", self.settings.from_number.as_str()),
                ("Body", message.body.as_str()),
            ])
            .send()
            .await
            .map_err(|source| AppError::UpstreamUnreachable {
                service: SERVICE,
                source,
            })?;

        let resource: MessageResource = decode_json(SERVICE, response).await?;
        let receipt = SmsReceipt {
            sid: resource.sid,
            status: resource.status.unwrap_or_else(|| "unknown".to_string()),
        };

        tracing::info!(
            message_sid = %receipt.sid,
            status = %receipt.status,
            duration_ms = start.elapsed().as_millis() as u64,
            "SMS accepted by Twilio"
        );

        Ok(receipt)
    }

    fn name(&self) -> &'static str {
        SERVICE
    }
}
