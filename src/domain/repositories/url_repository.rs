//! Repository trait for the id → URL store.

use crate::domain::entities::UrlRecord;
use thiserror::Error;

/// Violations of the store's allocation discipline.
///
/// These never come from client input; they mean an id was written without
/// going through [`UrlRepository::reserve_next_id`] first, or written twice.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("id {id} was never reserved (next id is {next_id})")]
    Unreserved { id: u64, next_id: u64 },

    #[error("id {id} already has a stored url")]
    AlreadyStored { id: u64 },
}

/// Owner of the id counter and the issued URL mappings.
///
/// The counter starts at 1 and only moves forward. Every stored id is lower
/// than the current counter value and is never reused.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::InMemoryUrlRepository`] - process-local store
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
pub trait UrlRepository: Send + Sync {
    /// Returns the current counter value and advances it.
    ///
    /// No two callers ever observe the same value.
    fn reserve_next_id(&self) -> u64;

    /// Stores `url` under a previously reserved `id`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if `id` was not reserved or is already stored.
    fn put(&self, id: u64, url: String) -> Result<UrlRecord, StoreError>;

    /// Looks up the record stored under `id`.
    ///
    /// # Returns
    ///
    /// - `Some(UrlRecord)` if the id was issued and stored
    /// - `None` otherwise
    fn get(&self, id: u64) -> Option<UrlRecord>;

    /// Number of stored records.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
