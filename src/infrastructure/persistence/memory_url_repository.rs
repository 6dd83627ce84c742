//! In-memory implementation of the url repository.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::domain::entities::UrlRecord;
use crate::domain::repositories::{StoreError, UrlRepository};

/// First id handed out. Zero is never issued.
pub const FIRST_ID: u64 = 1;

struct Inner {
    next_id: u64,
    records: HashMap<u64, UrlRecord>,
}

/// Process-local store for issued ids.
///
/// Counter and mapping sit behind one mutex, held only for the duration of a
/// single read-modify-write. State lives as long as the value does.
pub struct InMemoryUrlRepository {
    inner: Mutex<Inner>,
}

impl InMemoryUrlRepository {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Inner {
                next_id: FIRST_ID,
                records: HashMap::new(),
            }),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        // Every critical section leaves `Inner` consistent, so a poisoned
        // lock still guards valid data.
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for InMemoryUrlRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl UrlRepository for InMemoryUrlRepository {
    fn reserve_next_id(&self) -> u64 {
        let mut inner = self.lock();
        let id = inner.next_id;
        inner.next_id += 1;
        id
    }

    fn put(&self, id: u64, url: String) -> Result<UrlRecord, StoreError> {
        let mut inner = self.lock();

        if id < FIRST_ID || id >= inner.next_id {
            return Err(StoreError::Unreserved {
                id,
                next_id: inner.next_id,
            });
        }
        if inner.records.contains_key(&id) {
            return Err(StoreError::AlreadyStored { id });
        }

        let record = UrlRecord::new(id, url);
        inner.records.insert(id, record.clone());
        Ok(record)
    }

    fn get(&self, id: u64) -> Option<UrlRecord> {
        self.lock().records.get(&id).cloned()
    }

    fn len(&self) -> usize {
        self.lock().records.len()
    }
}
