//! Data Transfer Objects for API responses.
//!
//! Request bodies are validated by [`crate::application::validation`] rather
//! than deserialized directly, so only response types live here.

pub mod health;
pub mod url;
