//! Repository implementations.
//!
//! # Repositories
//!
//! - [`InMemoryUrlRepository`] - Id allocation and url storage for the
//!   lifetime of the process

pub mod memory_url_repository;

pub use memory_url_repository::InMemoryUrlRepository;
