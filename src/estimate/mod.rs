//! Estimate request model
//!
//! The transient entity submitted by the contact form. It is parsed from
//! the request body, cleaned, validated, turned into a text message, and
//! then dropped.

pub mod validate;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::RelayError;
use validate::{collapse_whitespace, is_valid_email, is_valid_phone};

/// Raw request body as sent by the browser
///
/// Every field is kept as a loose JSON value: anything that is not a string
/// cleans to the empty string instead of failing the whole parse.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EstimatePayload {
    pub full_name: Option<Value>,
    pub phone: Option<Value>,
    pub email: Option<Value>,
    pub service_type: Option<Value>,
    pub property_address: Option<Value>,
    pub timeline: Option<Value>,
    pub preferred_contact: Option<Value>,
    pub site_visit_needed: Option<Value>,
    pub details: Option<Value>,
    /// Honeypot, hidden from humans
    pub website: Option<Value>,
}

impl EstimatePayload {
    /// Parse a request body, accepting only a JSON object
    pub fn from_slice(body: &[u8]) -> Result<Self, RelayError> {
        let value: Value = serde_json::from_slice(body).map_err(|_| RelayError::InvalidPayload)?;
        if !value.is_object() {
            return Err(RelayError::InvalidPayload);
        }
        serde_json::from_value(value).map_err(|_| RelayError::InvalidPayload)
    }

    /// A filled honeypot marks an automated submission
    pub fn is_spam(&self) -> bool {
        !clean(self.website.as_ref()).is_empty()
    }
}

/// Trimmed string value, or empty for missing and non-string values
fn clean(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) => s.trim().to_string(),
        _ => String::new(),
    }
}

/// Like [`clean`], but a missing or `null` field takes `default`.
/// Anything that was sent, even an empty string, is kept as sent.
fn clean_or(value: Option<&Value>, default: &str) -> String {
    value.map_or_else(|| default.to_string(), |v| clean(Some(v)))
}

/// Choices offered by the form. The relay forwards whatever text was
/// submitted and only uses these for the defaults.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PreferredContact {
    #[default]
    Phone,
    Email,
    Text,
}

impl PreferredContact {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Phone => "phone",
            Self::Email => "email",
            Self::Text => "text",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SiteVisit {
    Yes,
    No,
    #[default]
    Unsure,
}

impl SiteVisit {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Yes => "yes",
            Self::No => "no",
            Self::Unsure => "unsure",
        }
    }
}

/// A cleaned and validated estimate request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EstimateRequest {
    pub full_name: String,
    pub phone: String,
    pub email: String,
    pub service_type: String,
    pub property_address: String,
    pub timeline: String,
    /// As submitted; `phone` when absent
    pub preferred_contact: String,
    /// As submitted; `unsure` when absent
    pub site_visit_needed: String,
    pub details: String,
}

impl EstimateRequest {
    /// Clean the payload, fill in absent choices, and run the field checks in order:
    /// required fields, email shape, phone digit count.
    pub fn from_payload(payload: &EstimatePayload) -> Result<Self, RelayError> {
        let request = Self {
            full_name: clean(payload.full_name.as_ref()),
            phone: clean(payload.phone.as_ref()),
            email: clean(payload.email.as_ref()),
            service_type: clean(payload.service_type.as_ref()),
            property_address: clean(payload.property_address.as_ref()),
            timeline: clean(payload.timeline.as_ref()),
            preferred_contact: clean_or(
                payload.preferred_contact.as_ref(),
                PreferredContact::default().as_str(),
            ),
            site_visit_needed: clean_or(
                payload.site_visit_needed.as_ref(),
                SiteVisit::default().as_str(),
            ),
            details: clean(payload.details.as_ref()),
        };

        let required = [
            &request.full_name,
            &request.phone,
            &request.email,
            &request.service_type,
            &request.property_address,
            &request.timeline,
            &request.details,
        ];
        if required.iter().any(|field| field.is_empty()) {
            return Err(RelayError::MissingFields);
        }

        if !is_valid_email(&request.email) {
            return Err(RelayError::InvalidEmail);
        }

        if !is_valid_phone(&request.phone) {
            return Err(RelayError::InvalidPhone);
        }

        Ok(request)
    }

    /// Render the text message sent to the business owner
    pub fn compose_message(&self) -> String {
        [
            "New estimate request".to_string(),
            format!("Name: {}", self.full_name),
            format!("Phone: {}", self.phone),
            format!("Email: {}", self.email),
            format!("Service: {}", self.service_type),
            format!("Address: {}", self.property_address),
            format!("Timeline: {}", self.timeline),
            format!("Contact pref: {}", self.preferred_contact),
            format!("Site visit needed: {}", self.site_visit_needed),
            format!("Details: {}", collapse_whitespace(&self.details)),
        ]
        .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn payload(value: &Value) -> EstimatePayload {
        EstimatePayload::from_slice(value.to_string().as_bytes()).unwrap()
    }

    fn valid_body() -> Value {
        json!({
            "fullName": "Jo",
            "phone": "217-555-0123",
            "email": "jo@x.com",
            "serviceType": "Grading",
            "propertyAddress": "1 Main St",
            "timeline": "ASAP",
            "details": "Need a pad leveled",
            "website": ""
        })
    }

    #[test]
    fn test_malformed_body() {
        assert_eq!(
            EstimatePayload::from_slice(b"{not json").unwrap_err(),
            RelayError::InvalidPayload
        );
        assert_eq!(
            EstimatePayload::from_slice(b"[1, 2]").unwrap_err(),
            RelayError::InvalidPayload
        );
        assert_eq!(
            EstimatePayload::from_slice(b"null").unwrap_err(),
            RelayError::InvalidPayload
        );
        assert!(EstimatePayload::from_slice(b"{}").is_ok());
    }

    #[test]
    fn test_honeypot() {
        let mut body = valid_body();
        assert!(!payload(&body).is_spam());

        body["website"] = json!("   ");
        assert!(!payload(&body).is_spam());

        body["website"] = json!("http://spam.example");
        assert!(payload(&body).is_spam());

        // Spam even when the rest of the form is empty
        assert!(payload(&json!({ "website": "x" })).is_spam());
    }

    #[test]
    fn test_trims_and_defaults() {
        let mut body = valid_body();
        body["fullName"] = json!("  Jo Smith \n");
        let request = EstimateRequest::from_payload(&payload(&body)).unwrap();

        assert_eq!(request.full_name, "Jo Smith");
        assert_eq!(request.preferred_contact, "phone");
        assert_eq!(request.site_visit_needed, "unsure");
    }

    #[test]
    fn test_choices_pass_through_as_submitted() {
        let lines = |contact: Value, visit: Value| {
            let mut body = valid_body();
            body["preferredContact"] = contact;
            body["siteVisitNeeded"] = visit;
            let message = EstimateRequest::from_payload(&payload(&body))
                .unwrap()
                .compose_message();
            message
                .lines()
                .filter(|l| l.starts_with("Contact pref:") || l.starts_with("Site visit needed:"))
                .map(String::from)
                .collect::<Vec<_>>()
        };

        assert_eq!(
            lines(json!("Text"), json!(" Yes ")),
            ["Contact pref: Text", "Site visit needed: Yes"]
        );
        assert_eq!(
            lines(json!("carrier pigeon"), json!("maybe")),
            ["Contact pref: carrier pigeon", "Site visit needed: maybe"]
        );
        // Sent but empty stays empty
        assert_eq!(
            lines(json!(""), json!("")),
            ["Contact pref: ", "Site visit needed: "]
        );
        // Only null or absent takes the default
        assert_eq!(
            lines(Value::Null, Value::Null),
            ["Contact pref: phone", "Site visit needed: unsure"]
        );
        // Non-string values clean like every other field
        assert_eq!(
            lines(json!(42), json!(true)),
            ["Contact pref: ", "Site visit needed: "]
        );
    }

    #[test]
    fn test_each_required_field() {
        for field in [
            "fullName",
            "phone",
            "email",
            "serviceType",
            "propertyAddress",
            "timeline",
            "details",
        ] {
            let mut missing = valid_body();
            missing.as_object_mut().unwrap().remove(field);
            assert_eq!(
                EstimateRequest::from_payload(&payload(&missing)).unwrap_err(),
                RelayError::MissingFields,
                "missing {field}"
            );

            let mut blank = valid_body();
            blank[field] = json!("   ");
            assert_eq!(
                EstimateRequest::from_payload(&payload(&blank)).unwrap_err(),
                RelayError::MissingFields,
                "blank {field}"
            );

            let mut wrong_type = valid_body();
            wrong_type[field] = json!(12);
            assert_eq!(
                EstimateRequest::from_payload(&payload(&wrong_type)).unwrap_err(),
                RelayError::MissingFields,
                "non-string {field}"
            );
        }
    }

    #[test]
    fn test_check_order() {
        // Missing fields win over a bad email
        let mut body = valid_body();
        body["email"] = json!("nope");
        body["details"] = json!("");
        assert_eq!(
            EstimateRequest::from_payload(&payload(&body)).unwrap_err(),
            RelayError::MissingFields
        );

        // Bad email wins over a bad phone
        let mut body = valid_body();
        body["email"] = json!("nope");
        body["phone"] = json!("555");
        assert_eq!(
            EstimateRequest::from_payload(&payload(&body)).unwrap_err(),
            RelayError::InvalidEmail
        );

        let mut body = valid_body();
        body["phone"] = json!("555-0123");
        assert_eq!(
            EstimateRequest::from_payload(&payload(&body)).unwrap_err(),
            RelayError::InvalidPhone
        );
    }

    #[test]
    fn test_compose_message() {
        let mut body = valid_body();
        body["details"] = json!("Need a pad\n  leveled\tbefore spring");
        body["preferredContact"] = json!("email");
        let request = EstimateRequest::from_payload(&payload(&body)).unwrap();

        assert_eq!(
            request.compose_message(),
            "New estimate request\n\
             Name: Jo\n\
             Phone: 217-555-0123\n\
             Email: jo@x.com\n\
             Service: Grading\n\
             Address: 1 Main St\n\
             Timeline: ASAP\n\
             Contact pref: email\n\
             Site visit needed: unsure\n\
             Details: Need a pad leveled before spring"
        );
    }
}
