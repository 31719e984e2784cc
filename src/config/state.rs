// Application state module
// Shared, read-only state handed to every request

use std::sync::Arc;

use super::credentials::{CredentialSource, ProcessEnv};
use super::types::Config;
use crate::sms::{SendError, SmsSender, TwilioClient};

/// Application state
pub struct AppState {
    pub config: Config,
    /// Outbound SMS provider
    pub sender: Arc<dyn SmsSender>,
    /// Where SMS credentials are read from on each request
    pub credentials: Arc<dyn CredentialSource>,
}

impl AppState {
    /// Production state: Twilio client and the process environment
    pub fn new(config: Config) -> Result<Self, SendError> {
        let sender = TwilioClient::new(&config.sms.api_base)?;
        Ok(Self::with_parts(config, Arc::new(sender), Arc::new(ProcessEnv)))
    }

    pub fn with_parts(
        config: Config,
        sender: Arc<dyn SmsSender>,
        credentials: Arc<dyn CredentialSource>,
    ) -> Self {
        Self {
            config,
            sender,
            credentials,
        }
    }
}
