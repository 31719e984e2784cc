//! Relay error taxonomy
//!
//! Every failure the estimate endpoint can report, with the HTTP status and
//! the user-facing message that goes with it.

use hyper::StatusCode;
use thiserror::Error;

use crate::sms::SendError;

/// Fallback text when the provider rejects a send without a readable message
pub const UPSTREAM_FALLBACK: &str = "Could not send estimate text message.";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RelayError {
    #[error("Invalid request payload.")]
    InvalidPayload,

    #[error("Please complete all required fields before submitting.")]
    MissingFields,

    #[error("Please enter a valid email address.")]
    InvalidEmail,

    #[error("Please enter a valid phone number.")]
    InvalidPhone,

    #[error("Server texting is not configured yet. Please call us for now.")]
    NotConfigured,

    #[error("Phone configuration must use E.164 format (example: +12175550123).")]
    BadPhoneConfig,

    #[error("{}", .0.as_deref().unwrap_or(UPSTREAM_FALLBACK))]
    Upstream(Option<String>),
}

impl RelayError {
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::InvalidPayload | Self::MissingFields | Self::InvalidEmail | Self::InvalidPhone => {
                StatusCode::BAD_REQUEST
            }
            Self::NotConfigured | Self::BadPhoneConfig => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Upstream(_) => StatusCode::BAD_GATEWAY,
        }
    }

    /// Client input errors are the caller's to fix; everything else is ours
    pub fn is_client_error(&self) -> bool {
        self.status().is_client_error()
    }
}

impl From<SendError> for RelayError {
    fn from(err: SendError) -> Self {
        match err {
            SendError::Rejected { message, .. } => Self::Upstream(message),
            SendError::Transport(_) => Self::Upstream(None),
        }
    }
}
