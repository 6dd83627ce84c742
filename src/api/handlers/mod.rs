//! HTTP request handlers for API endpoints.
//!
//! Each handler module corresponds to a logical grouping of endpoints.

pub mod decode;
pub mod encode;
pub mod fallback;
pub mod health;

pub use decode::{decode_fallback_handler, decode_handler};
pub use encode::encode_handler;
pub use fallback::{method_not_allowed_handler, route_not_found_handler};
pub use health::health_handler;
