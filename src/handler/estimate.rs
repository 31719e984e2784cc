//! Estimate relay handler
//!
//! Validates an estimate request and forwards it as a single text message.
//! The sequence is linear: parse, honeypot, clean and validate, read SMS
//! configuration, compose, send once.

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Response, StatusCode};
use tracing::{error, info, warn};

use crate::config::{AppState, SmsCredentials};
use crate::error::RelayError;
use crate::estimate::{EstimatePayload, EstimateRequest};
use crate::http;
use crate::sms::OutboundMessage;

/// How a well-formed submission ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelayOutcome {
    /// The text message went out
    Sent,
    /// Honeypot filled: accepted silently, nothing sent
    Discarded,
}

impl RelayOutcome {
    pub const fn message(self) -> &'static str {
        match self {
            Self::Sent => "Your request was sent. We will contact you soon.",
            Self::Discarded => "Request received.",
        }
    }
}

/// Run the relay for one request body
pub async fn relay_estimate(body: &[u8], state: &AppState) -> Result<RelayOutcome, RelayError> {
    let payload = EstimatePayload::from_slice(body)?;

    if payload.is_spam() {
        info!("Honeypot field filled, discarding estimate request");
        return Ok(RelayOutcome::Discarded);
    }

    let request = EstimateRequest::from_payload(&payload)?;

    // Read on every request, never cached
    let credentials = SmsCredentials::from_source(state.credentials.as_ref())?;

    let message = OutboundMessage::new(&credentials, request.compose_message());
    state
        .sender
        .send(&credentials, &message)
        .await
        .map_err(|e| {
            error!(error = %e, "Estimate text was not delivered");
            RelayError::from(e)
        })?;

    info!(
        service = %request.service_type,
        preferred_contact = %request.preferred_contact,
        "Estimate request relayed"
    );
    Ok(RelayOutcome::Sent)
}

/// Run the relay and render the JSON response
pub async fn serve_estimate(body: &[u8], state: &AppState) -> Response<Full<Bytes>> {
    match relay_estimate(body, state).await {
        Ok(outcome) => http::build_message_response(StatusCode::OK, outcome.message()),
        Err(err) => {
            if err.is_client_error() {
                warn!(status = err.status().as_u16(), "Rejected estimate request: {err}");
            } else if !matches!(err, RelayError::Upstream(_)) {
                error!(status = err.status().as_u16(), "Estimate relay misconfigured: {err}");
            }
            http::build_error_response(err.status(), &err.to_string())
        }
    }
}
