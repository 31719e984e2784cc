//! Client side of the estimate form
//!
//! Mirrors what the contact page does: holds field values, decides when the
//! submit button is enabled, posts the form to the relay and turns the reply
//! into user-facing feedback.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::estimate::{PreferredContact, SiteVisit};

const ERROR_FALLBACK: &str = "We could not send your request. Please call instead.";
const SUCCESS_FALLBACK: &str = "Thanks, your estimate request was sent.";
const NETWORK_ERROR: &str = "Network error. Please try again or call us directly.";

/// Field values as the user typed them
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EstimateForm {
    pub full_name: String,
    pub phone: String,
    pub email: String,
    pub service_type: String,
    pub property_address: String,
    pub timeline: String,
    pub preferred_contact: PreferredContact,
    pub site_visit_needed: SiteVisit,
    pub details: String,
    /// Hidden honeypot; people never fill it in
    pub website: String,
}

impl EstimateForm {
    /// Whether every required field is long enough to be worth sending.
    ///
    /// This is a convenience gate only. The relay validates again.
    pub fn can_submit(&self) -> bool {
        let longer_than = |value: &str, min: usize| value.trim().chars().count() > min;

        longer_than(&self.full_name, 1)
            && longer_than(&self.phone, 6)
            && longer_than(&self.email, 4)
            && longer_than(&self.service_type, 1)
            && longer_than(&self.property_address, 4)
            && longer_than(&self.timeline, 1)
            && longer_than(&self.details, 9)
    }

    /// Back to the initial state
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// What the user is shown after a submit
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Feedback {
    Success(String),
    Error(String),
}

#[derive(Debug, Default, Deserialize)]
struct RelayReply {
    message: Option<String>,
    error: Option<String>,
}

/// Posts forms to a relay endpoint
#[derive(Debug, Clone)]
pub struct FormClient {
    client: reqwest::Client,
    endpoint: String,
}

impl FormClient {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: endpoint.into(),
        }
    }

    /// Submit once. Returns `None` without sending when the form is not
    /// ready; on success the form is reset.
    pub async fn submit(&self, form: &mut EstimateForm) -> Option<Feedback> {
        if !form.can_submit() {
            debug!("Form incomplete, submit skipped");
            return None;
        }

        let response = match self.client.post(&self.endpoint).json(form).send().await {
            Ok(response) => response,
            Err(e) => {
                warn!("Estimate submit failed: {e}");
                return Some(Feedback::Error(NETWORK_ERROR.to_string()));
            }
        };

        let success = response.status().is_success();
        // A reply that is not JSON still decides success by status alone
        let reply = response.json::<RelayReply>().await.unwrap_or_default();

        if !success {
            return Some(Feedback::Error(
                reply.error.unwrap_or_else(|| ERROR_FALLBACK.to_string()),
            ));
        }

        form.reset();
        Some(Feedback::Success(
            reply.message.unwrap_or_else(|| SUCCESS_FALLBACK.to_string()),
        ))
    }
}
