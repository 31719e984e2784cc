//! Twilio REST client
//!
//! `POST {api_base}/Accounts/{sid}/Messages.json` with HTTP Basic auth and a
//! form-encoded `From`, `To`, `Body`.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, warn};

use super::{OutboundMessage, SendError, SmsSender};
use crate::config::SmsCredentials;

/// Error body returned by the provider on failure
#[derive(Debug, Deserialize)]
struct ProviderError {
    message: Option<String>,
    code: Option<i64>,
}

pub struct TwilioClient {
    client: Client,
    api_base: String,
}

impl TwilioClient {
    /// Create a client against the given API base, using the HTTP client's default timeouts
    pub fn new(api_base: &str) -> Result<Self, SendError> {
        let client = Client::builder()
            .user_agent(concat!("estimate-relay/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            api_base: api_base.trim_end_matches('/').to_string(),
        })
    }

    fn messages_url(&self, account_sid: &str) -> String {
        format!("{}/Accounts/{account_sid}/Messages.json", self.api_base)
    }
}

#[async_trait]
impl SmsSender for TwilioClient {
    async fn send(
        &self,
        credentials: &SmsCredentials,
        message: &OutboundMessage,
    ) -> Result<(), SendError> {
        let url = self.messages_url(&credentials.account_sid);
        debug!(to = %message.to, "sending estimate text");

        let response = self
            .client
            .post(&url)
            .basic_auth(&credentials.account_sid, Some(&credentials.auth_token))
            .form(&[
                ("From", message.from.as_str()),
                ("To", message.to.as_str()),
                ("Body", message.body.as_str()),
            ])
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            debug!(status = status.as_u16(), "provider accepted message");
            return Ok(());
        }

        // Error bodies are JSON when the provider is reachable; anything else gets the fallback
        let failure = response.json::<ProviderError>().await.ok();
        let code = failure.as_ref().and_then(|f| f.code);
        let message = failure.and_then(|f| f.message);

        warn!(status = status.as_u16(), ?code, "provider rejected message");
        Err(SendError::Rejected {
            status: status.as_u16(),
            message,
        })
    }
}
