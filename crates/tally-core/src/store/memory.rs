use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, PoisonError};

use crate::error::{StoreError, StoreResult};
use crate::store::traits::QueueStore;

/// In-memory queue store for tests and embedded use.
///
/// The availability toggle simulates an unreachable backing store so the
/// degrade-on-failure paths can be exercised deterministically.
#[derive(Default)]
pub struct MemoryStore {
    entries: Mutex<VecDeque<Vec<u8>>>,
    unavailable: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// While unavailable, every store operation fails with
    /// `StoreError::Unavailable`. Entries already held are kept.
    pub fn set_available(&self, available: bool) {
        self.unavailable.store(!available, Ordering::SeqCst);
    }

    fn check_available(&self) -> StoreResult<()> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("memory store offline".to_string()));
        }
        Ok(())
    }

    fn entries(&self) -> std::sync::MutexGuard<'_, VecDeque<Vec<u8>>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl QueueStore for MemoryStore {
    fn push_back(&self, entry: &[u8]) -> StoreResult<()> {
        self.check_available()?;
        self.entries().push_back(entry.to_vec());
        Ok(())
    }

    fn pop_front(&self) -> StoreResult<Option<Vec<u8>>> {
        self.check_available()?;
        Ok(self.entries().pop_front())
    }

    fn len(&self) -> StoreResult<u64> {
        self.check_available()?;
        Ok(self.entries().len() as u64)
    }
}
