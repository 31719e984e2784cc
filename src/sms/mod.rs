//! SMS provider module
//!
//! The seam between the relay handler and the messaging provider.

mod twilio;

pub use twilio::TwilioClient;

use async_trait::async_trait;
use thiserror::Error;

use crate::config::SmsCredentials;

/// One text message to send
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundMessage {
    pub from: String,
    pub to: String,
    pub body: String,
}

impl OutboundMessage {
    /// Address a message from the configured sender to the configured recipient
    pub fn new(credentials: &SmsCredentials, body: String) -> Self {
        Self {
            from: credentials.from_phone.clone(),
            to: credentials.to_phone.clone(),
            body,
        }
    }
}

#[derive(Debug, Error)]
pub enum SendError {
    /// The provider answered with a non-success status
    #[error("provider rejected message with status {status}: {}", .message.as_deref().unwrap_or("no message"))]
    Rejected { status: u16, message: Option<String> },

    /// The request never got a response
    #[error("provider request failed: {0}")]
    Transport(#[from] reqwest::Error),
}

/// Sends a text message through an SMS provider. One attempt, no retry.
#[async_trait]
pub trait SmsSender: Send + Sync {
    async fn send(
        &self,
        credentials: &SmsCredentials,
        message: &OutboundMessage,
    ) -> Result<(), SendError>;
}
