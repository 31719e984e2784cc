//! Estimate relay service
//!
//! Accepts estimate requests from the website contact form, validates them,
//! and forwards them as a text message through the Twilio REST API.

pub mod config;
pub mod error;
pub mod estimate;
pub mod form;
pub mod handler;
pub mod http;
pub mod logger;
pub mod server;
pub mod sms;

#[cfg(test)]
pub(crate) mod testing;
