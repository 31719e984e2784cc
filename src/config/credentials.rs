// SMS credentials module
// Reads provider credentials and phone numbers from the environment at request time

use std::collections::HashMap;
use std::fmt;

use crate::error::RelayError;
use crate::estimate::validate::is_e164;

pub const ENV_ACCOUNT_SID: &str = "TWILIO_ACCOUNT_SID";
pub const ENV_AUTH_TOKEN: &str = "TWILIO_AUTH_TOKEN";
pub const ENV_FROM_PHONE: &str = "TWILIO_FROM_PHONE";
pub const ENV_TO_PHONE: &str = "ESTIMATE_TO_PHONE";

/// Where credential values come from
pub trait CredentialSource: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
}

/// The process environment
#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessEnv;

impl CredentialSource for ProcessEnv {
    fn get(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}

impl CredentialSource for HashMap<String, String> {
    fn get(&self, key: &str) -> Option<String> {
        HashMap::get(self, key).cloned()
    }
}

/// Provider credentials plus sender and recipient numbers
#[derive(Clone, PartialEq, Eq)]
pub struct SmsCredentials {
    pub account_sid: String,
    pub auth_token: String,
    /// Sender number, E.164
    pub from_phone: String,
    /// Recipient number, E.164
    pub to_phone: String,
}

impl SmsCredentials {
    /// Read all four values; any missing or empty value means texting is
    /// not configured, and both numbers must be E.164.
    pub fn from_source(source: &dyn CredentialSource) -> Result<Self, RelayError> {
        let read = |key: &str| source.get(key).filter(|value| !value.is_empty());

        let (Some(account_sid), Some(auth_token), Some(from_phone), Some(to_phone)) = (
            read(ENV_ACCOUNT_SID),
            read(ENV_AUTH_TOKEN),
            read(ENV_FROM_PHONE),
            read(ENV_TO_PHONE),
        ) else {
            return Err(RelayError::NotConfigured);
        };

        if !is_e164(&from_phone) || !is_e164(&to_phone) {
            return Err(RelayError::BadPhoneConfig);
        }

        Ok(Self {
            account_sid,
            auth_token,
            from_phone,
            to_phone,
        })
    }
}

// Keep the auth token out of logs
impl fmt::Debug for SmsCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SmsCredentials")
            .field("account_sid", &self.account_sid)
            .field("auth_token", &"<redacted>")
            .field("from_phone", &self.from_phone)
            .field("to_phone", &self.to_phone)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_env() -> HashMap<String, String> {
        HashMap::from([
            (ENV_ACCOUNT_SID.to_string(), "AC123".to_string()),
            (ENV_AUTH_TOKEN.to_string(), "secret".to_string()),
            (ENV_FROM_PHONE.to_string(), "+12175550100".to_string()),
            (ENV_TO_PHONE.to_string(), "+12175550199".to_string()),
        ])
    }

    #[test]
    fn test_complete_configuration() {
        let creds = SmsCredentials::from_source(&full_env()).unwrap();
        assert_eq!(creds.account_sid, "AC123");
        assert_eq!(creds.auth_token, "secret");
        assert_eq!(creds.from_phone, "+12175550100");
        assert_eq!(creds.to_phone, "+12175550199");
    }

    #[test]
    fn test_any_missing_value() {
        for key in [ENV_ACCOUNT_SID, ENV_AUTH_TOKEN, ENV_FROM_PHONE, ENV_TO_PHONE] {
            let mut env = full_env();
            env.remove(key);
            assert_eq!(
                SmsCredentials::from_source(&env).unwrap_err(),
                RelayError::NotConfigured,
                "without {key}"
            );

            let mut env = full_env();
            env.insert(key.to_string(), String::new());
            assert_eq!(
                SmsCredentials::from_source(&env).unwrap_err(),
                RelayError::NotConfigured,
                "empty {key}"
            );
        }
    }

    #[test]
    fn test_numbers_must_be_e164() {
        let mut env = full_env();
        env.insert(ENV_FROM_PHONE.to_string(), "217-555-0100".to_string());
        assert_eq!(
            SmsCredentials::from_source(&env).unwrap_err(),
            RelayError::BadPhoneConfig
        );

        let mut env = full_env();
        env.insert(ENV_TO_PHONE.to_string(), "12175550199".to_string());
        assert_eq!(
            SmsCredentials::from_source(&env).unwrap_err(),
            RelayError::BadPhoneConfig
        );
    }

    #[test]
    fn test_debug_hides_token() {
        let creds = SmsCredentials::from_source(&full_env()).unwrap();
        let debug = format!("{creds:?}");
        assert!(debug.contains("AC123"));
        assert!(!debug.contains("secret"));
    }
}
