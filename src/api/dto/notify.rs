//! Notify endpoint DTOs.

use serde::{Deserialize, Serialize};

use crate::services::NotifyOutcome;
use crate::services::notifications::MessageSource;

/// Form body of `POST /notify`
#[derive(Debug, Default, Deserialize)]
pub struct NotifyForm {
    /// Text to send instead of the composed visit summary
    pub message: Option<String>,
}

/// Body returned by `/notify`
#[derive(Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotifyResponse {
    /// `sent` or `ignored`
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<MessageSource>,
    /// Provider message SID
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sid: Option<String>,
}

impl From<NotifyOutcome> for NotifyResponse {
    fn from(outcome: NotifyOutcome) -> Self {
        match outcome {
            NotifyOutcome::Ignored => Self {
                status: "ignored".to_string(),
                source: None,
                sid: None,
            },
            NotifyOutcome::Sent { source, receipt } => Self {
                status: "sent".to_string(),
                source: Some(source),
                sid: Some(receipt.sid),
            },
        }
    }
}
