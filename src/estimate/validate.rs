//! Field validation predicates
//!
//! Small pure checks applied to cleaned estimate fields and to the
//! configured sender/recipient numbers.

use std::sync::LazyLock;

use regex::Regex;

/// Minimum digits a customer phone number must contain
pub const MIN_PHONE_DIGITS: usize = 10;

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern compiles")
});

// `\d` matches any Unicode digit here; E.164 is ASCII only
static E164_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\+[1-9][0-9]{7,14}$").expect("E.164 pattern compiles"));

/// Check the basic `local@domain.tld` shape.
///
/// # Examples
/// ```
/// use estimate_relay::estimate::validate::is_valid_email;
/// assert!(is_valid_email("jo@x.com"));
/// assert!(!is_valid_email("jo@localhost"));
/// ```
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

/// Count ASCII digits, ignoring separators like dashes, spaces, and parens
pub fn phone_digit_count(phone: &str) -> usize {
    phone.chars().filter(char::is_ascii_digit).count()
}

pub fn is_valid_phone(phone: &str) -> bool {
    phone_digit_count(phone) >= MIN_PHONE_DIGITS
}

/// Check international dialing format: `+`, a non-zero digit, 8 to 15 digits in all
pub fn is_e164(number: &str) -> bool {
    E164_RE.is_match(number)
}

/// Collapse every run of whitespace into a single space and trim the ends
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
