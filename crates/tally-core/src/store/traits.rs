use crate::error::StoreResult;

/// Backing store for the stats queue: a persistent list and nothing else.
///
/// FIFO order across push/pop is the only ordering contract. Implementations
/// must be thread-safe, though the worker is the sole caller in practice.
pub trait QueueStore: Send + Sync {
    /// Append an encoded entry to the tail of the list.
    fn push_back(&self, entry: &[u8]) -> StoreResult<()>;

    /// Remove and return the head entry, or `None` when the list is empty.
    fn pop_front(&self) -> StoreResult<Option<Vec<u8>>>;

    /// Current backlog size.
    fn len(&self) -> StoreResult<u64>;

    /// True when the list has no entries.
    fn is_empty(&self) -> StoreResult<bool> {
        Ok(self.len()? == 0)
    }
}
