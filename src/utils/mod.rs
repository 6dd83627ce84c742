//! Helpers for code rendering, URL handling, and request inspection.
//!
//! - [`id_codec`] - Reversible id ↔ short code transform
//! - [`short_url`] - Building short URLs and extracting their codes
//! - [`client_ip`] - Client key resolution for rate limiting

pub mod client_ip;
pub mod id_codec;
pub mod short_url;
