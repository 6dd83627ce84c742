//! Repository trait definitions for the domain layer.
//!
//! Traits define the contract for data operations; implementations live in
//! `crate::infrastructure::persistence`. Mock implementations are generated
//! via `mockall` for testing.

pub mod url_repository;

pub use url_repository::{StoreError, UrlRepository};

#[cfg(test)]
pub use url_repository::MockUrlRepository;
