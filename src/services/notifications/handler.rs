//! Entry point of the notification flow.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::composer::MessageComposer;
use super::provider::{NotificationMessage, SmsReceipt, SmsSender};
use crate::error::AppResult;
use crate::models::InboundRequest;

/// Where the SMS body came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageSource {
    /// The visitor posted a `message` field
    Custom,
    /// Built by the [`MessageComposer`]
    Composed,
}

/// Result of handling one inbound request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotifyOutcome {
    /// Not a POST; nothing was sent
    Ignored,
    /// Exactly one SMS was accepted by the provider
    Sent {
        source: MessageSource,
        receipt: SmsReceipt,
    },
}

/// Decides whether to notify and with what text, then sends one SMS
pub struct NotificationHandler {
    composer: MessageComposer,
    sender: Arc<dyn SmsSender>,
}

impl NotificationHandler {
    pub fn new(composer: MessageComposer, sender: Arc<dyn SmsSender>) -> Self {
        Self { composer, sender }
    }

    /// Handles one inbound request
    ///
    /// Non-POST requests are ignored without any outbound call. A posted
    /// `message` is sent verbatim, even when empty. Otherwise the default
    /// message is composed first, so a failed lookup sends nothing.
    pub async fn handle(&self, request: &InboundRequest) -> AppResult<NotifyOutcome> {
        if !request.is_post() {
            tracing::debug!(method = %request.method, "Ignoring non-POST request");
            return Ok(NotifyOutcome::Ignored);
        }

        let (source, body) = match &request.message {
            Some(message) => (MessageSource::Custom, message.clone()),
            None => {
                let body = self
                    .composer
                    .compose_default(&request.user_agent, request.remote_ip)
                    .await?;
                (MessageSource::Composed, body)
            }
        };

        tracing::info!(
            provider = self.sender.name(),
            source = ?source,
            remote_ip = %request.remote_ip,
            chars = body.chars().count(),
            "Sending visit notification"
        );

        let receipt = self.sender.send(&NotificationMessage::new(body)).await?;
        Ok(NotifyOutcome::Sent { source, receipt })
    }
}

#[cfg(test)]
pub(crate) mod fakes {
    use std::sync::Mutex;

    use async_trait::async_trait;

    use super::*;
    use crate::error::AppError;

    /// Records every message instead of sending it
    #[derive(Default)]
    pub struct RecordingSender {
        pub sent: Mutex<Vec<String>>,
        pub fail: bool,
    }

    impl RecordingSender {
        pub fn failing() -> Self {
            Self {
                sent: Mutex::new(Vec::new()),
                fail: true,
            }
        }

        pub fn bodies(&self) -> Vec<String> {
            self.sent.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl SmsSender for RecordingSender {
        async fn send(&self, message: &NotificationMessage) -> AppResult<SmsReceipt> {
            let count = {
                let mut sent = self.sent.lock().unwrap();
                sent.push(message.body.clone());
                sent.len()
            };
            if self.fail {
                return Err(AppError::UpstreamRejected {
                    service: "twilio",
                    status: 401,
                    message: "Authenticate".to_string(),
                });
            }
            Ok(SmsReceipt {
                sid: format!("SM{:04}", count),
                status: "queued".to_string(),
            })
        }

        fn name(&self) -> &'static str {
            "recording"
        }
    }
}
