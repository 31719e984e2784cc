//! Request handler module
//!
//! Responsible for request routing dispatch and the estimate relay itself.

pub mod estimate;
pub mod router;

// Re-export main entry point
pub use router::handle_request;
