//! Core SMS sender trait and types.
//!
//! The notification handler talks to the SMS provider only through
//! [`SmsSender`], so tests and alternative providers plug in without
//! touching the handler.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::AppResult;

/// Message to be sent via the SMS provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationMessage {
    /// Message body, sent as-is
    pub body: String,
}

impl NotificationMessage {
    pub fn new(body: impl Into<String>) -> Self {
        Self { body: body.into() }
    }
}

/// Provider acknowledgement of an accepted message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SmsReceipt {
    /// Provider-assigned message identifier
    pub sid: String,
    /// Provider delivery status at creation time, e.g. "queued"
    pub status: String,
}

/// Trait for SMS providers
///
/// Uses `async_trait` to support async methods with dynamic dispatch.
/// Implementations make exactly one request per call and never retry.
#[async_trait]
pub trait SmsSender: Send + Sync {
    /// Sends a message to the configured destination number
    async fn send(&self, message: &NotificationMessage) -> AppResult<SmsReceipt>;

    /// Returns the provider name for logging
    fn name(&self) -> &'static str;
}
